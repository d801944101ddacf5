mod commands;

use clap::Parser;
use sigmafold_core::{DataStoreError, EngineError};
use tracing_subscriber::EnvFilter;

pub fn run_from_env() -> i32 {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();
    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            error.exit_code()
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{err}");
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "sigmafold",
    about = "Fusion reaction name resolution and cross-section interpolation"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Resolve reaction names to their canonical keys
    Resolve(commands::ResolveArgs),
    /// Evaluate cross sections (mb) at COM energies (keV)
    Xs(commands::XsArgs),
    /// Print the tabulated (non-extrapolated) COM energy range in keV
    Range(commands::RangeArgs),
    /// List every canonical reaction key
    List,
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Resolve(args) => commands::run_resolve_command(args),
        CliCommand::Xs(args) => commands::run_xs_command(args),
        CliCommand::Range(args) => commands::run_range_command(args),
        CliCommand::List => commands::run_list_command(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Data(#[from] DataStoreError),
    #[error(transparent)]
    Compute(#[from] EngineError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    /// usage=2, data=3, compute=4. An unknown interpolation mode is a
    /// usage error even though the core reports it as an engine error.
    fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Compute(EngineError::InvalidInterpolationMode { .. }) => 2,
            Self::Data(_) | Self::Compute(EngineError::Store(_)) => 3,
            Self::Compute(_) | Self::Internal(_) => 4,
        }
    }
}
