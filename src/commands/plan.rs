use clap::Args;
use serde::Serialize;

use esa_deploy::config;
use esa_deploy::deploy;
use esa_deploy::runner::SystemRunner;
use esa_deploy::versions::DeployPlan;

use super::CmdResult;

#[derive(Args, Debug)]
pub struct PlanArgs {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOutput {
    pub command: String,
    #[serde(flatten)]
    pub plan: DeployPlan,
}

pub fn run(_args: PlanArgs, global: &crate::commands::GlobalArgs) -> CmdResult<PlanOutput> {
    let loaded = config::load(global.config.as_deref())?;
    let plan = deploy::plan(&SystemRunner, &loaded.config.cli)?;

    Ok((
        PlanOutput {
            command: "deploy.plan".to_string(),
            plan,
        },
        0,
    ))
}
