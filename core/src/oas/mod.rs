#![deny(missing_docs)]

//! # OpenAPI Synthesis Module
//!
//! - **models**: Schema, content and operation values.
//! - **registry**: The run-scoped component table.
//! - **schemas**: Type and struct to schema conversion.
//! - **routes**: Verb and path derivation from method names.
//! - **validation**: Fail-fast contract checks.
//! - **operations**: Per-method request and response synthesis.
//! - **document**: Assembly of the final document.
//! - **emit**: JSON and YAML rendering.

pub mod document;
pub mod emit;
pub mod models;
pub mod operations;
pub mod registry;
pub mod routes;
pub mod schemas;
pub mod validation;

pub use document::{assemble, ApiDocument, OPENAPI_VERSION, VERSION_FORMAT};
pub use emit::{document_value, render, OutputFormat};
pub use models::{ContentDescriptor, HttpMethod, OperationDoc, Parameter, Schema, SchemaKind};
pub use operations::Synthesizer;
pub use registry::ComponentRegistry;
pub use routes::{http_method, operation_path, split_method_name};
pub use validation::{select_contract, validate_contract, validate_method, validate_models};
