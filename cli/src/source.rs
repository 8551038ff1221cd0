#![deny(missing_docs)]

//! # Source Discovery
//!
//! Locates the service file and model files of a service directory and
//! collects their declarations.

use std::fs;
use std::path::{Path, PathBuf};
use svcdoc_core::parser::DeclarationCollector;
use svcdoc_core::{AppError, AppResult, Conventions, DeclarationSet};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Arguments shared by every command that reads a service directory.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Service directory.
    #[clap(long, default_value = ".")]
    pub dir: PathBuf,

    /// File declaring the service trait, relative to `--dir`.
    #[clap(long, default_value = "svc.rs")]
    pub service_file: PathBuf,

    /// Directory of model files, relative to `--dir`. Walked recursively.
    #[clap(long, default_value = "vo")]
    pub models_dir: PathBuf,

    /// YAML file overriding marker type names and the property case.
    #[clap(long, env = "SVCDOC_CONFIG")]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    /// Absolute-or-relative path of the service file.
    pub fn service_path(&self) -> PathBuf {
        self.dir.join(&self.service_file)
    }

    /// Path of the models directory.
    pub fn models_path(&self) -> PathBuf {
        self.dir.join(&self.models_dir)
    }

    /// Loads the configured conventions, or the defaults.
    pub fn conventions(&self) -> AppResult<Conventions> {
        match &self.config {
            Some(path) => {
                info!("Loading conventions from {:?}", path);
                Conventions::load(path)
            }
            None => Ok(Conventions::default()),
        }
    }
}

/// Collects the service file and every model file.
///
/// The service file is required; a missing models directory is skipped.
pub fn collect_sources(args: &SourceArgs, conventions: &Conventions) -> AppResult<DeclarationSet> {
    let service = args.service_path();
    if !service.is_file() {
        return Err(AppError::General(format!(
            "Service file not found: {:?}",
            service
        )));
    }

    let mut collector = DeclarationCollector::new(conventions);
    collect_file(&mut collector, &service)?;

    for path in model_files(&args.models_path()) {
        collect_file(&mut collector, &path)?;
    }

    Ok(collector.finish())
}

/// `*.rs` files under `dir`, in sorted walk order.
pub fn model_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        debug!("No models directory at {:?}", dir);
        return Vec::new();
    }

    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "rs"))
        .collect()
}

fn collect_file(collector: &mut DeclarationCollector<'_>, path: &Path) -> AppResult<()> {
    let code = fs::read_to_string(path)?;
    debug!("Collecting {:?}", path);
    collector.collect_source(&code, &package_of(path))
}

/// The module a file represents: its parent directory name.
fn package_of(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.canonicalize().ok())
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_default()
}
