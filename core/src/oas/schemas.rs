#![deny(missing_docs)]

//! # Schema Conversion
//!
//! Converts classified types and flattened structs into schema nodes. Named
//! types always become `$ref` pointers into the component registry.

use crate::config::PropertyCase;
use crate::error::{AppError, AppResult};
use crate::oas::models::Schema;
use crate::parser::models::StructDecl;
use crate::type_mapping::{TypeClass, TypeRef};

/// The schema for a classified type.
///
/// Returns `Ok(None)` for the context marker and `()`, which never appear in
/// a contract, and fails for anonymous structures. `owner` and `item` name the
/// declaration for the error message.
pub fn schema_of(ty: &TypeRef, owner: &str, item: &str) -> AppResult<Option<Schema>> {
    match ty.class() {
        TypeClass::ContextMarker | TypeClass::Unit => Ok(None),
        TypeClass::AnonymousStructure => Err(AppError::MalformedDeclaration {
            owner: owner.to_string(),
            item: item.to_string(),
            ty: ty.raw().to_string(),
        }),
        class => Ok(Some(class_schema(class))),
    }
}

fn class_schema(class: &TypeClass) -> Schema {
    match class {
        TypeClass::Builtin {
            scalar,
            array: false,
        } => Schema::scalar(*scalar),
        TypeClass::Builtin {
            scalar,
            array: true,
        } => Schema::array(Schema::scalar(*scalar)),
        TypeClass::File => Schema::file(),
        TypeClass::FileArray => Schema::array(Schema::file()),
        TypeClass::MapOf(value) => Schema::map(class_schema(value)),
        TypeClass::ArrayOf(items) => Schema::array(class_schema(items)),
        TypeClass::NamedObject(name) => Schema::reference(name.clone()),
        // Only reachable nested inside a container; the top level is handled by `schema_of`.
        TypeClass::ContextMarker | TypeClass::Unit | TypeClass::AnonymousStructure => {
            Schema::inline_object()
        }
    }
}

/// Builds the component schema of a flattened struct.
///
/// Skipped fields are omitted. Keys are the `serde` rename, or the field name
/// under `case`.
pub fn struct_schema(decl: &StructDecl, case: PropertyCase) -> AppResult<Schema> {
    let mut schema = Schema::object(decl.name.clone()).with_description(decl.description());

    for field in decl.fields.iter().filter(|f| !f.is_skipped) {
        let Some(property) = schema_of(&field.ty, &decl.name, &field.name)? else {
            continue;
        };
        schema.properties.insert(
            field.wire_name(case),
            property.with_description(field.description()),
        );
    }

    Ok(schema)
}
