#![deny(missing_docs)]

//! # Parser Module
//!
//! Handles parsing of Rust source code using the rust-analyzer syntax library.
//! Extracts top-level structs and service traits, their documentation and
//! `serde` attributes, into normalized declaration records.

pub mod attributes;
pub mod docs;
pub mod extractors;
pub mod models;

pub use extractors::{collect_declarations, parse_source, DeclarationCollector};
pub use models::{
    DeclarationSet, FieldDecl, InterfaceDecl, MethodDecl, ParamDecl, ResultDecl, StructDecl,
};
