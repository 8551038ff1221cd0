#![deny(missing_docs)]

//! # Gen Command
//!
//! Synthesizes the contract of a service directory and writes it to disk.

use crate::source::{collect_sources, SourceArgs};
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use svcdoc_core::{render, synthesize, AppResult, OutputFormat, Synthesis};
use tracing::{info, warn};

/// Arguments for the gen command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenArgs {
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Output file. Defaults to `<dir>/<service>_openapi3.json`;
    /// a `.yaml` or `.yml` extension writes YAML.
    #[clap(long)]
    pub output: Option<PathBuf>,
}

/// Runs the pipeline and writes the document. Returns the written path.
pub fn execute(args: &GenArgs) -> AppResult<PathBuf> {
    let conventions = args.source.conventions()?;
    let set = collect_sources(&args.source, &conventions)?;
    let Synthesis { document, warnings } =
        synthesize(&set, &conventions, Local::now().naive_local())?;
    for warning in &warnings {
        warn!("{}", warning);
    }

    let output = args.output.clone().unwrap_or_else(|| {
        args.source
            .dir
            .join(format!("{}_openapi3.json", document.title.to_lowercase()))
    });
    let format = OutputFormat::from_extension(output.extension().and_then(|e| e.to_str()));
    let rendered = render(&document, format)?;

    if output.exists() {
        warn!("File {:?} already exists, overwriting", output);
    }
    fs::write(&output, rendered)?;

    info!(
        "Wrote {} operation(s) and {} schema(s) to {:?}",
        document.paths.len(),
        document.components.len(),
        output
    );
    Ok(output)
}
