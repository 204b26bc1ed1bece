use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

mod commands;

use commands::GlobalArgs;
use esa_deploy::output;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "esa-deploy")]
#[command(version = VERSION)]
#[command(about = "Prune old inactive edge deployment versions, then deploy")]
struct Cli {
    /// Path to esa-deploy.json (defaults to ~/.config/esa-deploy/esa-deploy.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<String>,

    /// Arguments for the default `run` command (rejected before other subcommands)
    #[command(flatten)]
    run: commands::run::RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete the oldest inactive versions (at most 3) and deploy (default)
    Run(commands::run::RunArgs),
    /// Show which versions would be deleted, without changing anything
    Plan(commands::plan::PlanArgs),
    /// Inspect esa-deploy configuration
    Config(commands::config::ConfigArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Run(_) => "run",
            Commands::Plan(_) => "plan",
            Commands::Config(_) => "config",
        }
    }

    fn failure_label(&self) -> &'static str {
        match self {
            Commands::Run(_) => "Deploy failed",
            Commands::Plan(_) => "Plan failed",
            Commands::Config(_) => "Config failed",
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs { config: cli.config };

    let command = match cli.command {
        Some(Commands::Run(mut args)) => {
            args.dry_run |= cli.run.dry_run;
            Commands::Run(args)
        }
        Some(other) if cli.run.dry_run => Cli::command()
            .error(
                ErrorKind::ArgumentConflict,
                format!("--dry-run cannot be used with '{}'", other.name()),
            )
            .exit(),
        Some(other) => other,
        None => Commands::Run(cli.run),
    };

    let label = command.failure_label();
    let (json_result, exit_code) = commands::run_json(command, &global);

    if let Err(err) = &json_result {
        eprintln!("{}: {}", label, err.message);
    }

    if let Err(err) = output::print_json_result(json_result) {
        eprintln!("{}", err.message);
    }

    std::process::ExitCode::from(output::exit_code_to_u8(exit_code))
}
