//! Prune-then-deploy pipeline.
//!
//! list → parse/select → delete (skipped when nothing qualifies) → deploy.
//! The first failing step aborts the run; earlier steps are not undone.

use chrono::Local;
use serde::Serialize;

use crate::config::CliConfig;
use crate::error::Result;
use crate::runner::{CommandRunner, Invocation, OutputMode};
use crate::versions::{self, DeployPlan};

#[derive(Debug, Clone, Copy, Default)]
pub struct DeployOptions {
    /// List and plan, but skip delete and deploy.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployReport {
    pub plan: DeployPlan,
    pub deleted: Vec<String>,
    pub deployed: bool,
    pub dry_run: bool,
    pub started_at: String,
    pub finished_at: String,
}

pub fn list_invocation(cli: &CliConfig) -> Invocation {
    Invocation::new(
        "list",
        &cli.program,
        cli.list_args.clone(),
        OutputMode::Captured,
    )
}

/// Ids are appended as separate positional arguments.
pub fn delete_invocation(cli: &CliConfig, ids: &[String]) -> Invocation {
    let mut args = cli.delete_args.clone();
    args.extend(ids.iter().cloned());
    Invocation::new("delete", &cli.program, args, OutputMode::Inherit)
}

pub fn deploy_invocation(cli: &CliConfig) -> Invocation {
    Invocation::new(
        "deploy",
        &cli.program,
        cli.deploy_args.clone(),
        OutputMode::Inherit,
    )
}

/// Run the listing command and return its full stdout.
pub fn list<R: CommandRunner>(runner: &R, cli: &CliConfig) -> Result<String> {
    log_status!("list", "Fetching deployment versions...");
    runner.run(&list_invocation(cli))
}

/// List, parse and select without touching anything.
pub fn plan<R: CommandRunner>(runner: &R, cli: &CliConfig) -> Result<DeployPlan> {
    let output = list(runner, cli)?;
    let plan = versions::plan(&output);
    log_status!(
        "list",
        "Found {} inactive version(s) out of {}",
        plan.inactive.len(),
        plan.versions.len()
    );
    Ok(plan)
}

/// Delete the given versions. An empty batch invokes nothing.
pub fn delete<R: CommandRunner>(runner: &R, cli: &CliConfig, ids: &[String]) -> Result<()> {
    if ids.is_empty() {
        log_status!("prune", "No old versions to delete");
        return Ok(());
    }

    log_status!("prune", "Deleting {} old version(s):", ids.len());
    for (i, id) in ids.iter().enumerate() {
        log_status!("prune", "  {}. {}", i + 1, id);
    }

    runner.run(&delete_invocation(cli, ids))?;
    log_status!("prune", "Old versions deleted");
    Ok(())
}

pub fn deploy<R: CommandRunner>(runner: &R, cli: &CliConfig) -> Result<()> {
    log_status!("deploy", "Starting deployment...");
    runner.run(&deploy_invocation(cli))?;
    log_status!("deploy", "Deployment complete");
    Ok(())
}

/// Run the full housekeeping routine.
pub fn run<R: CommandRunner>(
    runner: &R,
    cli: &CliConfig,
    options: &DeployOptions,
) -> Result<DeployReport> {
    let started_at = Local::now().to_rfc3339();
    let plan = plan(runner, cli)?;

    if options.dry_run {
        log_status!(
            "deploy",
            "Dry run: would delete {} version(s) and deploy",
            plan.to_delete.len()
        );
        return Ok(DeployReport {
            plan,
            deleted: Vec::new(),
            deployed: false,
            dry_run: true,
            started_at,
            finished_at: Local::now().to_rfc3339(),
        });
    }

    delete(runner, cli, &plan.to_delete)?;
    deploy(runner, cli)?;

    Ok(DeployReport {
        deleted: plan.to_delete.clone(),
        plan,
        deployed: true,
        dry_run: false,
        started_at,
        finished_at: Local::now().to_rfc3339(),
    })
}
