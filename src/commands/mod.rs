pub type CmdResult<T> = esa_deploy::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    /// Explicit config file path; `None` means the default location.
    pub config: Option<String>,
}

pub mod config;
pub mod plan;
pub mod run;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        esa_deploy::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (esa_deploy::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Run(args) => dispatch!(args, global, run),
        crate::Commands::Plan(args) => dispatch!(args, global, plan),
        crate::Commands::Config(args) => dispatch!(args, global, config),
    }
}
