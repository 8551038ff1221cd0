#![deny(missing_docs)]

//! # Check Command
//!
//! Runs the full pipeline without writing anything.

use crate::source::{collect_sources, SourceArgs};
use chrono::Local;
use svcdoc_core::{synthesize, AppResult};
use tracing::{info, warn};

/// Arguments for the check command.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    #[clap(flatten)]
    pub source: SourceArgs,
}

/// Validates the service directory. Returns the number of operations.
pub fn execute(args: &CheckArgs) -> AppResult<usize> {
    let conventions = args.source.conventions()?;
    let set = collect_sources(&args.source, &conventions)?;
    let synthesis = synthesize(&set, &conventions, Local::now().naive_local())?;
    for warning in &synthesis.warnings {
        warn!("{}", warning);
    }

    let count = synthesis.document.paths.len();
    info!(
        "{} is valid: {} operation(s), {} warning(s)",
        synthesis.document.title,
        count,
        synthesis.warnings.len()
    );
    Ok(count)
}
