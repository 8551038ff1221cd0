#![deny(missing_docs)]

//! # Document Assembly
//!
//! Merges component schemas and per-method operations into one `ApiDocument`
//! keyed by path.

use crate::error::{AppError, DeclKind};
use crate::oas::models::{OperationDoc, Schema};
use crate::oas::registry::ComponentRegistry;
use crate::parser::models::InterfaceDecl;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// The `openapi` field of every generated document.
pub const OPENAPI_VERSION: &str = "3.0.2";

/// Timestamp layout used for `info.version`.
pub const VERSION_FORMAT: &str = "%Y%m%d%H%M%S";

/// The assembled contract of one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDocument {
    /// OpenAPI version string.
    pub openapi: String,
    /// `info.title`: the service trait name.
    pub title: String,
    /// `info.version`: `v` followed by the generation timestamp.
    pub version: String,
    /// When the document was generated.
    pub generated_at: NaiveDateTime,
    /// Module the service trait was declared in.
    pub package: String,
    /// Operations by path, in lexicographic order.
    pub paths: BTreeMap<String, OperationDoc>,
    /// Named schemas by title.
    pub components: ComponentRegistry,
}

impl ApiDocument {
    /// An empty document for `contract`, owning `components`.
    pub fn new(
        contract: &InterfaceDecl,
        components: ComponentRegistry,
        generated_at: NaiveDateTime,
    ) -> Self {
        Self {
            openapi: OPENAPI_VERSION.to_string(),
            title: contract.name.clone(),
            version: format!("v{}", generated_at.format(VERSION_FORMAT)),
            generated_at,
            package: contract.package.clone(),
            paths: BTreeMap::new(),
            components,
        }
    }

    /// Inserts an operation, returning the one previously bound to `path`.
    pub fn insert_operation(
        &mut self,
        path: impl Into<String>,
        operation: OperationDoc,
    ) -> Option<OperationDoc> {
        self.paths.insert(path.into(), operation)
    }

    /// The operation bound to `path`.
    pub fn operation(&self, path: &str) -> Option<&OperationDoc> {
        self.paths.get(path)
    }

    /// Resolves a schema through the component registry.
    pub fn resolve<'a>(&'a self, schema: &'a Schema) -> Option<&'a Schema> {
        self.components.resolve(schema)
    }
}

/// Builds the document from operations in method order.
///
/// A path produced twice keeps the later operation; each collision comes back
/// as a `DuplicateDeclaration` warning.
pub fn assemble(
    contract: &InterfaceDecl,
    operations: Vec<(String, OperationDoc)>,
    components: ComponentRegistry,
    generated_at: NaiveDateTime,
) -> (ApiDocument, Vec<AppError>) {
    let mut document = ApiDocument::new(contract, components, generated_at);
    let mut warnings = Vec::new();

    for (path, operation) in operations {
        if document.insert_operation(path.clone(), operation).is_some() {
            tracing::warn!("Path `{}` derived twice, later operation wins", path);
            warnings.push(AppError::DuplicateDeclaration {
                kind: DeclKind::Path,
                name: path,
            });
        }
    }

    (document, warnings)
}
