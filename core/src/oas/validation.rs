#![deny(missing_docs)]

//! # Contract Validation
//!
//! All-or-nothing checks that every method of the service trait maps onto a
//! single HTTP operation. Runs before any schema is synthesized.

use crate::error::{AppError, AppResult};
use crate::parser::models::{DeclarationSet, InterfaceDecl, MethodDecl, ParamDecl, StructDecl};

/// Representative entry standing in for every file parameter of a method.
const FILE_BODY: &str = "multipart file";

/// Picks the service trait: the first one collected.
pub fn select_contract(set: &DeclarationSet) -> AppResult<&InterfaceDecl> {
    let interfaces = set.interfaces();
    let first = interfaces.first().ok_or(AppError::MissingContract)?;
    if interfaces.len() > 1 {
        tracing::warn!(
            "{} service traits found, using the first one: {}",
            interfaces.len(),
            first.name
        );
    }
    Ok(first)
}

/// Validates every method of the service trait.
pub fn validate_contract(contract: &InterfaceDecl) -> AppResult<()> {
    contract.methods.iter().try_for_each(validate_method)
}

/// Validates one method.
///
/// Fails with `MalformedDeclaration` when a parameter or result is an anonymous
/// structure, and with `AmbiguousRequestBody` when more than one parameter
/// would have to travel in the request body. File parameters share one
/// multipart body and count once.
pub fn validate_method(method: &MethodDecl) -> AppResult<()> {
    for decl in method.params.iter().chain(method.results.iter()) {
        reject_anonymous(&method.name, decl)?;
    }

    let types = body_candidates(method);
    if types.len() > 1 {
        return Err(AppError::AmbiguousRequestBody {
            method: method.name.clone(),
            types,
        });
    }
    Ok(())
}

/// Validates flattened model structs: no field may be an anonymous structure.
pub fn validate_models(structs: &[StructDecl]) -> AppResult<()> {
    for decl in structs {
        for field in decl.fields.iter().filter(|f| !f.is_skipped) {
            if field.ty.is_anonymous() {
                return Err(AppError::MalformedDeclaration {
                    owner: decl.name.clone(),
                    item: field.name.clone(),
                    ty: field.ty.raw().to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Parameter types that would need the request body, with files folded into one entry.
pub fn body_candidates(method: &MethodDecl) -> Vec<String> {
    let mut types = Vec::new();
    let mut has_file = false;

    for param in &method.params {
        if param.ty.is_ignored() || param.ty.is_builtin() {
            continue;
        }
        if param.ty.is_file() {
            if !has_file {
                has_file = true;
                types.push(FILE_BODY.to_string());
            }
            continue;
        }
        types.push(param.ty.raw().to_string());
    }

    types
}

fn reject_anonymous(method: &str, decl: &ParamDecl) -> AppResult<()> {
    if decl.ty.is_anonymous() {
        return Err(AppError::MalformedDeclaration {
            owner: method.to_string(),
            item: decl.key().to_string(),
            ty: decl.ty.raw().to_string(),
        });
    }
    Ok(())
}
