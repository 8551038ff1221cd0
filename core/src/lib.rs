#![deny(missing_docs)]

//! # svcdoc Core
//!
//! Derives an OpenAPI 3 contract from a Rust service trait and the model
//! structs it uses.

/// Shared error types.
pub mod error;

/// Marker type names and naming rules.
pub mod config;

/// Type classification (Rust -> schema shape).
pub mod type_mapping;

/// AST Parsing logic.
pub mod parser;

/// Embedded field promotion.
pub mod flatten;

/// OpenAPI (OAS) synthesis and rendering.
pub mod oas;

/// End-to-end driver.
pub mod pipeline;

pub use config::{Conventions, PropertyCase};
pub use error::{AppError, AppResult, DeclKind};
pub use flatten::{flatten, flatten_all};
pub use oas::{render, ApiDocument, ComponentRegistry, OperationDoc, OutputFormat, Schema};
pub use parser::{
    collect_declarations, parse_source, DeclarationCollector, DeclarationSet, InterfaceDecl,
    MethodDecl, StructDecl,
};
pub use pipeline::{synthesize, Synthesis};
pub use type_mapping::{TypeClass, TypeRef};
