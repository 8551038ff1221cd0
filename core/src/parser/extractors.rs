//! # Extraction Logic
//!
//! Walks the top level of parsed source files and records struct and trait
//! declarations. Items nested in modules or function bodies are ignored.

use crate::config::Conventions;
use crate::error::{AppError, AppResult};
use crate::parser::attributes::extract_attributes;
use crate::parser::docs::{extract_doc_lines, split_sections};
use crate::parser::models::{
    DeclarationSet, FieldDecl, InterfaceDecl, MethodDecl, ParamDecl, ResultDecl, StructDecl,
};
use crate::type_mapping::{normalize_signature, TypeRef};
use heck::ToUpperCamelCase;
use ra_ap_edition::Edition;
use ra_ap_syntax::ast::{self, HasGenericArgs, HasModuleItem, HasName};
use ra_ap_syntax::{AstNode, SourceFile};

/// Parses Rust source text into a syntax tree.
///
/// Fails on the first syntax error rather than collecting from a partial tree.
pub fn parse_source(code: &str, unit: &str) -> AppResult<SourceFile> {
    let parse = SourceFile::parse(code, Edition::Edition2021);
    if let Some(err) = parse.errors().first() {
        return Err(AppError::General(format!(
            "Failed to parse '{}': {}",
            unit, err
        )));
    }
    Ok(parse.tree())
}

/// Accumulates declarations from any number of source files.
pub struct DeclarationCollector<'a> {
    conventions: &'a Conventions,
    set: DeclarationSet,
}

impl<'a> DeclarationCollector<'a> {
    /// Creates a collector with an empty result set.
    pub fn new(conventions: &'a Conventions) -> Self {
        Self {
            conventions,
            set: DeclarationSet::new(),
        }
    }

    /// Collects the top-level structs and traits of one file.
    ///
    /// `package` names the module the file represents.
    pub fn collect(&mut self, file: &SourceFile, package: &str) {
        for item in file.items() {
            match item {
                ast::Item::Struct(s) => {
                    if let Some(decl) = self.struct_decl(&s) {
                        tracing::debug!("Collected struct {} from {}", decl.name, package);
                        self.set.insert_struct(decl);
                    }
                }
                ast::Item::Trait(t) => {
                    if let Some(decl) = self.interface_decl(&t, package) {
                        tracing::debug!(
                            "Collected trait {} ({} methods) from {}",
                            decl.name,
                            decl.methods.len(),
                            package
                        );
                        self.set.insert_interface(decl);
                    }
                }
                _ => {}
            }
        }
    }

    /// Parses `code` and collects it.
    pub fn collect_source(&mut self, code: &str, package: &str) -> AppResult<()> {
        let file = parse_source(code, package)?;
        self.collect(&file, package);
        Ok(())
    }

    /// Returns the accumulated declarations.
    pub fn finish(self) -> DeclarationSet {
        self.set
    }

    fn classify(&self, ty: &ast::Type) -> TypeRef {
        TypeRef::classify(&ty.syntax().text().to_string(), self.conventions)
    }

    fn struct_decl(&self, struct_def: &ast::Struct) -> Option<StructDecl> {
        let name = struct_def.name()?.text().to_string();
        let mut fields = Vec::new();

        match struct_def.field_list() {
            Some(ast::FieldList::RecordFieldList(list)) => {
                for field in list.fields() {
                    if let (Some(fname), Some(ty)) = (field.name(), field.ty()) {
                        let attrs = extract_attributes(field.syntax());
                        fields.push(FieldDecl {
                            name: fname.text().to_string(),
                            ty: self.classify(&ty),
                            docs: extract_doc_lines(field.syntax()),
                            embedded: attrs.flatten,
                            rename: attrs.rename,
                            is_skipped: attrs.is_skipped,
                        });
                    }
                }
            }
            Some(ast::FieldList::TupleFieldList(list)) => {
                for (i, field) in list.fields().enumerate() {
                    if let Some(ty) = field.ty() {
                        let attrs = extract_attributes(field.syntax());
                        fields.push(FieldDecl {
                            name: i.to_string(),
                            ty: self.classify(&ty),
                            docs: extract_doc_lines(field.syntax()),
                            embedded: false,
                            rename: attrs.rename,
                            is_skipped: attrs.is_skipped,
                        });
                    }
                }
            }
            None => {}
        }

        Some(StructDecl {
            name,
            fields,
            docs: extract_doc_lines(struct_def.syntax()),
        })
    }

    fn interface_decl(&self, trait_def: &ast::Trait, package: &str) -> Option<InterfaceDecl> {
        let name = trait_def.name()?.text().to_string();
        let methods = trait_def
            .assoc_item_list()
            .map(|list| {
                list.assoc_items()
                    .filter_map(|item| match item {
                        ast::AssocItem::Fn(f) => self.method_decl(&f),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(InterfaceDecl {
            name,
            methods,
            package: package.to_string(),
            docs: extract_doc_lines(trait_def.syntax()),
        })
    }

    fn method_decl(&self, f: &ast::Fn) -> Option<MethodDecl> {
        let name = f.name()?.text().to_string().to_upper_camel_case();
        let sections = split_sections(&extract_doc_lines(f.syntax()));

        let mut params = Vec::new();
        if let Some(list) = f.param_list() {
            for param in list.params() {
                let Some(ty) = param.ty() else { continue };
                let pname = param_name(&param);
                params.push(ParamDecl {
                    docs: sections.argument(&pname),
                    name: pname,
                    ty: self.classify(&ty),
                });
            }
        }

        let results = f
            .ret_type()
            .and_then(|r| r.ty())
            .map(|ty| {
                result_types(ty)
                    .iter()
                    .map(|ty| ResultDecl {
                        name: String::new(),
                        ty: self.classify(ty),
                        docs: sections.returns.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(MethodDecl {
            name,
            params,
            results,
            docs: sections.summary,
        })
    }
}

fn param_name(param: &ast::Param) -> String {
    match param.pat() {
        Some(ast::Pat::IdentPat(p)) => p
            .name()
            .map(|n| n.text().to_string())
            .unwrap_or_default(),
        Some(other) => normalize_signature(&other.syntax().text().to_string()),
        None => String::new(),
    }
}

/// Splits a return type into results.
///
/// `Result<T, E>` (or any `*Result<T, ..>` alias) contributes only `T`; a tuple
/// contributes one result per element and `()` contributes none.
fn result_types(ty: ast::Type) -> Vec<ast::Type> {
    let ok = unwrap_result(&ty).unwrap_or(ty);
    match ok {
        ast::Type::TupleType(tuple) => tuple.fields().collect(),
        other => vec![other],
    }
}

fn unwrap_result(ty: &ast::Type) -> Option<ast::Type> {
    let ast::Type::PathType(p) = ty else {
        return None;
    };
    let segment = p.path()?.segment()?;
    if !segment.name_ref()?.text().as_str().ends_with("Result") {
        return None;
    }
    segment
        .generic_arg_list()?
        .generic_args()
        .find_map(|arg| match arg {
            ast::GenericArg::TypeArg(t) => t.ty(),
            _ => None,
        })
}

/// Collects declarations from a single source string.
pub fn collect_declarations(
    code: &str,
    package: &str,
    conventions: &Conventions,
) -> AppResult<DeclarationSet> {
    let mut collector = DeclarationCollector::new(conventions);
    collector.collect_source(code, package)?;
    Ok(collector.finish())
}
