//! Deployment version table parsing and prune selection.
//!
//! The listing tool prints a table whose data rows carry the version id in a
//! `|`-delimited cell. Everything here is a pure function of that text.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Marker the listing tool prints on the row of the version serving traffic.
pub const ACTIVE_MARKER: &str = "Active";

/// Upper bound on how many versions one run deletes.
pub const DELETE_BATCH_LIMIT: usize = 3;

// A cell holding 16 or more ASCII digits, with optional padding inside the bars.
static VERSION_ROW_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|\s*([0-9]{16,})\s*\|").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentVersion {
    pub id: String,
    pub active: bool,
}

/// Parsed listing plus the versions chosen for deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployPlan {
    pub versions: Vec<DeploymentVersion>,
    pub inactive: Vec<String>,
    pub to_delete: Vec<String>,
    pub retained: Vec<String>,
}

impl DeployPlan {
    pub fn has_deletions(&self) -> bool {
        !self.to_delete.is_empty()
    }
}

/// Extract every version row from the listing, in source order.
///
/// Lines without a qualifying id cell (headers, separators, truncated rows)
/// are skipped.
pub fn parse_versions(output: &str) -> Vec<DeploymentVersion> {
    output
        .lines()
        .filter_map(|line| {
            let id = VERSION_ROW_PATTERN.captures(line)?.get(1)?.as_str();
            Some(DeploymentVersion {
                id: id.to_string(),
                active: line.contains(ACTIVE_MARKER),
            })
        })
        .collect()
}

/// Ids of every non-active row, in source order. Duplicates are kept.
pub fn inactive_versions(output: &str) -> Vec<String> {
    inactive_ids(&parse_versions(output))
}

fn inactive_ids(versions: &[DeploymentVersion]) -> Vec<String> {
    versions
        .iter()
        .filter(|version| !version.active)
        .map(|version| version.id.clone())
        .collect()
}

/// The first `DELETE_BATCH_LIMIT` ids, order preserved.
pub fn select_for_deletion(inactive: &[String]) -> Vec<String> {
    inactive.iter().take(DELETE_BATCH_LIMIT).cloned().collect()
}

pub fn plan(output: &str) -> DeployPlan {
    let versions = parse_versions(output);
    let inactive = inactive_ids(&versions);
    let to_delete = select_for_deletion(&inactive);
    let retained = inactive[to_delete.len()..].to_vec();

    DeployPlan {
        versions,
        inactive,
        to_delete,
        retained,
    }
}
