//! # Pipeline
//!
//! Runs a whole synthesis over a collected `DeclarationSet`.

use crate::config::Conventions;
use crate::error::{AppError, AppResult};
use crate::flatten::flatten_all;
use crate::oas::document::{assemble, ApiDocument};
use crate::oas::operations::Synthesizer;
use crate::oas::registry::ComponentRegistry;
use crate::oas::routes::{operation_path, split_method_name};
use crate::oas::validation::{select_contract, validate_contract, validate_models};
use crate::parser::models::DeclarationSet;
use chrono::NaiveDateTime;
use tracing::debug;

/// The outcome of a successful run.
#[derive(Debug)]
pub struct Synthesis {
    /// The assembled contract.
    pub document: ApiDocument,
    /// Non-fatal duplicate-declaration diagnostics, in the order raised.
    pub warnings: Vec<AppError>,
}

/// Synthesizes the contract document of the first service trait in `set`.
///
/// Every check runs before any schema is built, so a fatal error means no
/// document exists.
pub fn synthesize(
    set: &DeclarationSet,
    conventions: &Conventions,
    generated_at: NaiveDateTime,
) -> AppResult<Synthesis> {
    let contract = select_contract(set)?;
    debug!("Synthesizing contract for `{}`", contract.name);

    let models = flatten_all(set, conventions.property_case)?;
    validate_models(&models)?;
    validate_contract(contract)?;
    debug!(
        "Validated {} model(s) and {} method(s)",
        models.len(),
        contract.methods.len()
    );

    let mut registry = ComponentRegistry::new();
    let mut operations = Vec::with_capacity(contract.methods.len());
    let mut warnings: Vec<AppError> = set.diagnostics().collect();

    let mut synth = Synthesizer::new(&mut registry, conventions.property_case);
    for model in &models {
        synth.register_struct(model)?;
    }
    for method in &contract.methods {
        let (verb, _) = split_method_name(&method.name);
        let path = operation_path(&contract.name, &method.name);
        debug!("{} {} <- {}", verb, path, method.name);
        operations.push((path, synth.operation(method, verb)?));
    }
    warnings.extend(synth.into_warnings());

    let (document, path_warnings) = assemble(contract, operations, registry, generated_at);
    warnings.extend(path_warnings);

    Ok(Synthesis { document, warnings })
}
