use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::paths;

/// Root configuration structure for esa-deploy.json
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub cli: CliConfig,
}

/// How the deployment tool is invoked for each step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_list_args")]
    pub list_args: Vec<String>,

    #[serde(default = "default_delete_args")]
    pub delete_args: Vec<String>,

    #[serde(default = "default_deploy_args")]
    pub deploy_args: Vec<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            list_args: default_list_args(),
            delete_args: default_delete_args(),
            deploy_args: default_deploy_args(),
        }
    }
}

fn default_program() -> String {
    "esa-cli".to_string()
}

fn default_list_args() -> Vec<String> {
    vec!["deployments".to_string(), "list".to_string()]
}

fn default_delete_args() -> Vec<String> {
    vec!["deployments".to_string(), "delete".to_string()]
}

fn default_deploy_args() -> Vec<String> {
    vec!["deploy".to_string()]
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigSource {
    File,
    Builtin,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedConfig {
    /// `None` when no default location could be resolved (e.g. `HOME` unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub source: ConfigSource,
    pub config: AppConfig,
}

impl LoadedConfig {
    fn builtin(path: Option<&Path>) -> Self {
        Self {
            path: path.map(|p| p.display().to_string()),
            source: ConfigSource::Builtin,
            config: AppConfig::default(),
        }
    }
}

/// Resolve the config path: an explicit path (with `~` expanded) or the
/// default location.
pub fn resolve_path(explicit: Option<&str>) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.trim().is_empty() => Err(Error::validation_invalid_argument(
            "config",
            "Config path cannot be empty",
        )),
        Some(path) => Ok(PathBuf::from(shellexpand::tilde(path).to_string())),
        None => paths::config_json(),
    }
}

/// Load the effective configuration.
///
/// A missing file at the default location, or no resolvable default
/// location at all, means built-in defaults; a missing explicit path is an
/// error.
pub fn load(explicit: Option<&str>) -> Result<LoadedConfig> {
    match explicit {
        Some(_) => load_file(&resolve_path(explicit)?),
        None => load_default(paths::config_json()),
    }
}

fn load_default(default_path: Result<PathBuf>) -> Result<LoadedConfig> {
    match default_path {
        Ok(path) if path.exists() => load_file(&path),
        Ok(path) => Ok(LoadedConfig::builtin(Some(&path))),
        Err(err) => {
            log_status!("config", "No config location ({}); using built-in defaults", err);
            Ok(LoadedConfig::builtin(None))
        }
    }
}

fn load_file(path: &Path) -> Result<LoadedConfig> {
    let config = load_from_file(path)?;
    Ok(LoadedConfig {
        path: Some(path.display().to_string()),
        source: ConfigSource::File,
        config,
    })
}

/// Read, parse and validate a config file.
pub fn load_from_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    let config: AppConfig = serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;

    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &AppConfig) -> Result<()> {
    if config.cli.program.trim().is_empty() {
        return Err(Error::config_invalid_value(
            "cli.program",
            Some(config.cli.program.clone()),
            "Program cannot be empty",
        )
        .with_hint("Remove the key to use the default 'esa-cli'"));
    }
    Ok(())
}
