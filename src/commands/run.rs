use clap::Args;
use serde::Serialize;

use esa_deploy::config;
use esa_deploy::deploy::{self, DeployOptions, DeployReport};
use esa_deploy::runner::SystemRunner;

use super::CmdResult;

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// List and plan deletions without deleting or deploying
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutput {
    pub command: String,
    #[serde(flatten)]
    pub report: DeployReport,
}

pub fn run(args: RunArgs, global: &crate::commands::GlobalArgs) -> CmdResult<RunOutput> {
    let loaded = config::load(global.config.as_deref())?;
    let options = DeployOptions {
        dry_run: args.dry_run,
    };

    let report = deploy::run(&SystemRunner, &loaded.config.cli, &options)?;

    Ok((
        RunOutput {
            command: "deploy.run".to_string(),
            report,
        },
        0,
    ))
}
