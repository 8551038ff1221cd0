#![deny(missing_docs)]

//! # svcdoc CLI
//!
//! Command Line Interface for synthesizing OpenAPI contracts from Rust
//! service traits.
//!
//! Supported Commands:
//! - `gen`: Writes the contract document of a service directory.
//! - `check`: Validates a service directory without writing.

use clap::{Parser, Subcommand};
use svcdoc_core::AppResult;
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod check;
mod generate;
mod source;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI contract synthesis for Rust service traits")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the OpenAPI document of a service directory.
    Gen(generate::GenArgs),
    /// Validate a service directory and report the operation count.
    Check(check::CheckArgs),
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Gen(args) => {
            generate::execute(args)?;
        }
        Commands::Check(args) => {
            check::execute(args)?;
        }
    }

    Ok(())
}
