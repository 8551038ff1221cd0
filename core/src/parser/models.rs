//! # Data Models
//!
//! Normalized declaration records extracted from Rust source.

use crate::config::PropertyCase;
use crate::error::{AppError, DeclKind};
use crate::type_mapping::TypeRef;
use indexmap::IndexMap;

/// A field of a struct, possibly an embedded (`#[serde(flatten)]`) one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// The declared field name (tuple fields use their index).
    pub name: String,
    /// The classified field type.
    pub ty: TypeRef,
    /// Doc comment lines, verbatim.
    pub docs: Vec<String>,
    /// Whether the field's own fields are promoted into the parent.
    pub embedded: bool,
    /// The wire name override from `#[serde(rename = "...")]`.
    pub rename: Option<String>,
    /// Whether the field is excluded by `#[serde(skip)]`.
    pub is_skipped: bool,
}

impl FieldDecl {
    /// The property key on the wire: the rename if present, otherwise the
    /// field name under `case`. Shadowing compares these keys.
    pub fn wire_name(&self, case: PropertyCase) -> String {
        match &self.rename {
            Some(rename) => rename.clone(),
            None => case.apply(&self.name),
        }
    }

    /// Doc lines joined with newlines.
    pub fn description(&self) -> Option<String> {
        join_docs(&self.docs)
    }
}

/// A top-level struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    /// Struct name, unique within a `DeclarationSet`.
    pub name: String,
    /// Fields in source order, embedded entries not yet flattened.
    pub fields: Vec<FieldDecl>,
    /// Doc comment lines, verbatim.
    pub docs: Vec<String>,
}

impl StructDecl {
    /// True when no field is embedded.
    pub fn is_flat(&self) -> bool {
        self.fields.iter().all(|f| !f.embedded)
    }

    /// Doc lines joined with newlines.
    pub fn description(&self) -> Option<String> {
        join_docs(&self.docs)
    }
}

/// A method parameter or result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    /// Binding name; empty for results.
    pub name: String,
    /// The classified type.
    pub ty: TypeRef,
    /// Doc lines taken from the method's `# Arguments` / `# Returns` section.
    pub docs: Vec<String>,
}

impl ParamDecl {
    /// Doc lines joined with newlines.
    pub fn description(&self) -> Option<String> {
        join_docs(&self.docs)
    }

    /// The declared name, or the type's base name when unnamed.
    pub fn key(&self) -> &str {
        if self.name.is_empty() {
            self.ty.base_name()
        } else {
            &self.name
        }
    }
}

/// Results carry the same shape as parameters.
pub type ResultDecl = ParamDecl;

/// A method of the service trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Method name in UpperCamelCase.
    pub name: String,
    /// Parameters in order, receiver excluded.
    pub params: Vec<ParamDecl>,
    /// Results in order; the error side of a `Result` is not included.
    pub results: Vec<ResultDecl>,
    /// Summary lines (doc text before the first rustdoc heading).
    pub docs: Vec<String>,
}

impl MethodDecl {
    /// The operation summary.
    pub fn summary(&self) -> String {
        self.docs.join("\n")
    }
}

/// A top-level trait describing the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDecl {
    /// Trait name.
    pub name: String,
    /// Methods in source order.
    pub methods: Vec<MethodDecl>,
    /// The module name of the source unit that declared the trait.
    pub package: String,
    /// Doc comment lines, verbatim.
    pub docs: Vec<String>,
}

/// Everything collected from one or more source units.
///
/// Struct names resolve last-write-wins; every overwrite is recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationSet {
    structs: IndexMap<String, StructDecl>,
    interfaces: Vec<InterfaceDecl>,
    duplicates: Vec<String>,
}

impl DeclarationSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a struct, replacing any earlier one with the same name.
    ///
    /// Returns `true` when an earlier declaration was overwritten.
    pub fn insert_struct(&mut self, decl: StructDecl) -> bool {
        let name = decl.name.clone();
        if self.structs.insert(name.clone(), decl).is_some() {
            tracing::warn!("Duplicate struct `{}`, later declaration wins", name);
            self.duplicates.push(name);
            return true;
        }
        false
    }

    /// Appends a trait.
    pub fn insert_interface(&mut self, decl: InterfaceDecl) {
        self.interfaces.push(decl);
    }

    /// Looks up a struct by name.
    pub fn get_struct(&self, name: &str) -> Option<&StructDecl> {
        self.structs.get(name)
    }

    /// Structs in first-seen order.
    pub fn structs(&self) -> impl Iterator<Item = &StructDecl> {
        self.structs.values()
    }

    /// Traits in the order they were collected.
    pub fn interfaces(&self) -> &[InterfaceDecl] {
        &self.interfaces
    }

    /// One `DuplicateDeclaration` per overwritten struct.
    pub fn diagnostics(&self) -> impl Iterator<Item = AppError> + '_ {
        self.duplicates
            .iter()
            .map(|name| AppError::DuplicateDeclaration {
                kind: DeclKind::Struct,
                name: name.clone(),
            })
    }
}

fn join_docs(lines: &[String]) -> Option<String> {
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
