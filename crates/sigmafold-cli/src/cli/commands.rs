use super::CliError;
use clap::Args;
use sigmafold_core::{
    builtin_store, resolve_reaction, CrossSectionEngine, InterpolationMode, TableDataStore,
};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Args)]
pub(super) struct ResolveArgs {
    /// Reaction names in any accepted notation
    #[arg(value_name = "NAME", required = true)]
    pub(super) names: Vec<String>,
}

#[derive(Debug, Args)]
pub(super) struct XsArgs {
    /// Reaction name in any accepted notation
    #[arg(value_name = "NAME")]
    pub(super) name: String,
    /// COM energies in keV, repeatable
    #[arg(short = 'e', long = "energy", value_name = "KEV", required = true)]
    pub(super) energies: Vec<f64>,
    /// Interpolation strategy
    #[arg(long, value_name = "MODE", default_value = "LogLogExtrapolation")]
    pub(super) mode: String,
    /// JSON dataset file; defaults to the built-in dataset
    #[arg(long, value_name = "FILE")]
    pub(super) data: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub(super) struct RangeArgs {
    /// Reaction name in any accepted notation
    #[arg(value_name = "NAME")]
    pub(super) name: String,
    /// JSON dataset file; defaults to the built-in dataset
    #[arg(long, value_name = "FILE")]
    pub(super) data: Option<PathBuf>,
}

pub(super) fn run_resolve_command(args: ResolveArgs) -> Result<i32, CliError> {
    for name in &args.names {
        let key = resolve_reaction(name).map_err(sigmafold_core::EngineError::from)?;
        info!(input = %name, key = %key, "resolved reaction name");
        println!("{name}: {key}");
    }
    Ok(0)
}

pub(super) fn run_xs_command(args: XsArgs) -> Result<i32, CliError> {
    let mode: InterpolationMode = args.mode.parse()?;
    let store = load_store(args.data.as_deref())?;
    let engine = CrossSectionEngine::with_mode(&args.name, mode, &*store)?;
    info!(key = %engine.key(), %mode, "built cross-section engine");

    for (energy, sigma) in args.energies.iter().zip(engine.cross_sections(&args.energies)) {
        println!("{energy} {sigma}");
    }
    Ok(0)
}

pub(super) fn run_list_command() -> Result<i32, CliError> {
    for key in sigmafold_core::reaction::canonical_keys() {
        println!("{key}");
    }
    Ok(0)
}

pub(super) fn run_range_command(args: RangeArgs) -> Result<i32, CliError> {
    let store = load_store(args.data.as_deref())?;
    let engine = CrossSectionEngine::new(&args.name, &*store)?;
    info!(key = %engine.key(), "built cross-section engine");

    let (low, high) = engine.prescribed_range();
    println!("{low} {high}");
    Ok(0)
}

fn load_store(path: Option<&Path>) -> Result<Cow<'static, TableDataStore>, CliError> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading dataset file");
            Ok(Cow::Owned(TableDataStore::from_json_file(path)?))
        }
        None => {
            debug!("using built-in dataset");
            Ok(Cow::Borrowed(builtin_store()))
        }
    }
}
