use clap::{Args, Subcommand};
use serde::Serialize;

use esa_deploy::config::{self, AppConfig, ConfigSource};

use super::CmdResult;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display the effective configuration (file merged over built-in defaults)
    Show {
        /// Show only built-in defaults (ignore esa-deploy.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Show the path to esa-deploy.json
    Path,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<AppConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<ConfigSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exists: Option<bool>,
}

pub fn run(args: ConfigArgs, global: &crate::commands::GlobalArgs) -> CmdResult<ConfigOutput> {
    match args.command {
        ConfigCommand::Show { builtin } => show(builtin, global),
        ConfigCommand::Path => path(global),
    }
}

fn show(builtin: bool, global: &crate::commands::GlobalArgs) -> CmdResult<ConfigOutput> {
    if builtin {
        return Ok((
            ConfigOutput {
                command: "config.show".to_string(),
                config: Some(AppConfig::default()),
                source: Some(ConfigSource::Builtin),
                path: None,
                exists: None,
            },
            0,
        ));
    }

    let loaded = config::load(global.config.as_deref())?;
    Ok((
        ConfigOutput {
            command: "config.show".to_string(),
            config: Some(loaded.config),
            source: Some(loaded.source),
            path: loaded.path,
            exists: None,
        },
        0,
    ))
}

fn path(global: &crate::commands::GlobalArgs) -> CmdResult<ConfigOutput> {
    let path = config::resolve_path(global.config.as_deref())?;
    Ok((
        ConfigOutput {
            command: "config.path".to_string(),
            config: None,
            source: None,
            exists: Some(path.exists()),
            path: Some(path.display().to_string()),
        },
        0,
    ))
}
