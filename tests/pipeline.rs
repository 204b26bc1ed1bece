use std::cell::RefCell;
use std::collections::VecDeque;

use esa_deploy::config::CliConfig;
use esa_deploy::deploy::{self, DeployOptions};
use esa_deploy::error::CommandFailedDetails;
use esa_deploy::output::map_cmd_result_to_json;
use esa_deploy::runner::{CommandRunner, Invocation, OutputMode};
use esa_deploy::{Error, ErrorCode, Result};

/// Replays scripted results in order and records every invocation.
#[derive(Default)]
struct FakeRunner {
    responses: RefCell<VecDeque<Result<String>>>,
    calls: RefCell<Vec<Invocation>>,
}

impl FakeRunner {
    fn new(responses: Vec<Result<String>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn steps(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.step.clone()).collect()
    }

    fn call(&self, index: usize) -> Invocation {
        self.calls.borrow()[index].clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> Result<String> {
        self.calls.borrow_mut().push(invocation.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

fn failure(invocation: &Invocation, exit_code: i32) -> Error {
    Error::command_failed(CommandFailedDetails {
        step: invocation.step.clone(),
        command: invocation.display(),
        exit_code: Some(exit_code),
        stderr: "boom".to_string(),
    })
}

fn listing(rows: &[(&str, &str)]) -> String {
    let mut out = String::from(
        "┌──────────────────┬─────────────────────┬─────────────┐\n\
         | Version          | Created             | Description |\n\
         ├──────────────────┼─────────────────────┼─────────────┤\n",
    );
    for (id, description) in rows {
        out.push_str(&format!("| {} | 2024-05-01 12:00:00 | {} |\n", id, description));
    }
    out.push_str("└──────────────────┴─────────────────────┴─────────────┘\n");
    out
}

const A: &str = "1000000000000001";
const B: &str = "1000000000000002";
const C: &str = "1000000000000003";
const D: &str = "1000000000000004";
const LIVE: &str = "1234567890123456";

#[test]
fn deletes_oldest_three_then_deploys() {
    let cli = CliConfig::default();
    let runner = FakeRunner::new(vec![Ok(listing(&[
        (A, "first"),
        (B, "second"),
        (LIVE, "Active"),
        (C, "third"),
        (D, "fourth"),
    ]))]);

    let report = deploy::run(&runner, &cli, &DeployOptions::default()).unwrap();

    assert_eq!(runner.steps(), vec!["list", "delete", "deploy"]);
    assert_eq!(runner.call(0).output, OutputMode::Captured);
    assert_eq!(
        runner.call(1).args,
        vec!["deployments", "delete", A, B, C]
    );
    assert_eq!(runner.call(2).args, vec!["deploy"]);
    assert_eq!(report.deleted, vec![A, B, C]);
    assert_eq!(report.plan.retained, vec![D]);
    assert!(report.deployed);
    assert!(!report.dry_run);
}

#[test]
fn single_inactive_version_is_deleted() {
    let runner = FakeRunner::new(vec![Ok(listing(&[
        (LIVE, "Active"),
        ("9876543210987654", "old"),
    ]))]);

    let report = deploy::run(&runner, &CliConfig::default(), &DeployOptions::default()).unwrap();

    assert_eq!(report.plan.inactive, vec!["9876543210987654"]);
    assert_eq!(report.deleted, vec!["9876543210987654"]);
    assert_eq!(
        runner.call(1).display(),
        "esa-cli deployments delete 9876543210987654"
    );
}

#[test]
fn empty_listing_skips_delete_but_still_deploys() {
    for output in ["", "   \n  \n"] {
        let runner = FakeRunner::new(vec![Ok(output.to_string())]);

        let report =
            deploy::run(&runner, &CliConfig::default(), &DeployOptions::default()).unwrap();

        assert_eq!(runner.steps(), vec!["list", "deploy"]);
        assert!(report.deleted.is_empty());
        assert!(report.deployed);
    }
}

#[test]
fn only_active_version_skips_delete() {
    let runner = FakeRunner::new(vec![Ok(listing(&[(LIVE, "Active")]))]);

    deploy::run(&runner, &CliConfig::default(), &DeployOptions::default()).unwrap();

    assert_eq!(runner.steps(), vec!["list", "deploy"]);
}

#[test]
fn list_failure_stops_before_delete_and_deploy() {
    let cli = CliConfig::default();
    let list_error = failure(&deploy::list_invocation(&cli), 1);
    let runner = FakeRunner::new(vec![Err(list_error)]);

    let err = deploy::run(&runner, &cli, &DeployOptions::default()).unwrap_err();

    assert_eq!(err.code, ErrorCode::CommandFailed);
    assert_eq!(err.details["step"], "list");
    assert_eq!(runner.steps(), vec!["list"]);

    let (_value, exit_code) = map_cmd_result_to_json::<serde_json::Value>(Err(err));
    assert_eq!(exit_code, 1);
}

#[test]
fn delete_failure_stops_before_deploy() {
    let cli = CliConfig::default();
    let ids = vec![A.to_string()];
    let delete_error = failure(&deploy::delete_invocation(&cli, &ids), 3);
    let runner = FakeRunner::new(vec![Ok(listing(&[(A, "old")])), Err(delete_error)]);

    let err = deploy::run(&runner, &cli, &DeployOptions::default()).unwrap_err();

    assert_eq!(err.details["step"], "delete");
    assert_eq!(err.details["exitCode"], 3);
    assert_eq!(runner.steps(), vec!["list", "delete"]);
}

#[test]
fn deploy_failure_after_delete_is_propagated() {
    let cli = CliConfig::default();
    let deploy_error = failure(&deploy::deploy_invocation(&cli), 1);
    let runner = FakeRunner::new(vec![
        Ok(listing(&[(A, "old")])),
        Ok(String::new()),
        Err(deploy_error),
    ]);

    let err = deploy::run(&runner, &cli, &DeployOptions::default()).unwrap_err();

    assert_eq!(err.details["step"], "deploy");
    assert_eq!(runner.steps(), vec!["list", "delete", "deploy"]);
}

#[test]
fn dry_run_only_lists() {
    let runner = FakeRunner::new(vec![Ok(listing(&[(A, "old"), (B, "old")]))]);

    let report = deploy::run(
        &runner,
        &CliConfig::default(),
        &DeployOptions { dry_run: true },
    )
    .unwrap();

    assert_eq!(runner.steps(), vec!["list"]);
    assert!(report.dry_run);
    assert!(!report.deployed);
    assert!(report.deleted.is_empty());
    assert_eq!(report.plan.to_delete, vec![A, B]);
}

#[test]
fn plan_never_deletes_or_deploys() {
    let runner = FakeRunner::new(vec![Ok(listing(&[(A, "old"), (LIVE, "Active")]))]);

    let plan = deploy::plan(&runner, &CliConfig::default()).unwrap();

    assert_eq!(runner.steps(), vec!["list"]);
    assert_eq!(plan.versions.len(), 2);
    assert_eq!(plan.to_delete, vec![A]);
}

#[test]
fn delete_with_empty_batch_invokes_nothing() {
    let runner = FakeRunner::default();

    deploy::delete(&runner, &CliConfig::default(), &[]).unwrap();

    assert!(runner.steps().is_empty());
}

#[test]
fn report_serializes_camel_case() {
    let runner = FakeRunner::new(vec![Ok(listing(&[(A, "old")]))]);
    let report = deploy::run(&runner, &CliConfig::default(), &DeployOptions::default()).unwrap();

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["plan"]["toDelete"][0], A);
    assert_eq!(value["deployed"], true);
    assert_eq!(value["dryRun"], false);
    assert!(value["startedAt"].as_str().is_some_and(|s| !s.is_empty()));
}
