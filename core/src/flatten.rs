//! # Embedding Flattener
//!
//! Promotes the fields of `#[serde(flatten)]` members into their parent.
//!
//! Shadowing follows field-promotion rules on the final property key (the
//! rename, otherwise the name under the property case): the shallowest
//! occurrence wins, ties go to the first one visited. A promoted key keeps
//! the position where it first appeared. Skipped fields never shadow.

use crate::config::PropertyCase;
use crate::error::{AppError, AppResult};
use crate::parser::models::{DeclarationSet, FieldDecl, StructDecl};
use crate::type_mapping::TypeClass;
use indexmap::map::Entry;
use indexmap::IndexMap;

struct Occurrence {
    field: FieldDecl,
    depth: usize,
}

#[derive(PartialEq, Eq, Hash)]
enum Slot {
    Wire(String),
    Skipped(usize),
}

/// Flattens one struct against the full declaration set.
///
/// # Examples
/// ```
/// use svcdoc_core::config::{Conventions, PropertyCase};
/// use svcdoc_core::flatten::flatten;
/// use svcdoc_core::parser::collect_declarations;
///
/// let code = r#"
///     struct Base { id: i64 }
///     struct User { #[serde(flatten)] base: Base, name: String }
/// "#;
/// let set = collect_declarations(code, "vo", &Conventions::default()).unwrap();
/// let user = set.get_struct("User").unwrap();
/// let flat = flatten(user, &set, PropertyCase::LowerCamel).unwrap();
/// let names: Vec<_> = flat.fields.iter().map(|f| f.name.as_str()).collect();
/// assert_eq!(names, vec!["id", "name"]);
/// ```
pub fn flatten(
    decl: &StructDecl,
    set: &DeclarationSet,
    case: PropertyCase,
) -> AppResult<StructDecl> {
    let mut occurrences = Vec::new();
    let mut path = Vec::new();
    splice(decl, set, 0, &mut path, &mut occurrences)?;

    let mut fields: IndexMap<Slot, Occurrence> = IndexMap::new();
    for (index, occ) in occurrences.into_iter().enumerate() {
        let key = if occ.field.is_skipped {
            Slot::Skipped(index)
        } else {
            Slot::Wire(occ.field.wire_name(case))
        };
        match fields.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(occ);
            }
            Entry::Occupied(mut slot) => {
                if occ.depth < slot.get().depth {
                    slot.insert(occ);
                }
            }
        }
    }

    Ok(StructDecl {
        name: decl.name.clone(),
        fields: fields.into_values().map(|occ| occ.field).collect(),
        docs: decl.docs.clone(),
    })
}

/// Flattens every struct of the set, in collection order.
pub fn flatten_all(set: &DeclarationSet, case: PropertyCase) -> AppResult<Vec<StructDecl>> {
    set.structs().map(|decl| flatten(decl, set, case)).collect()
}

fn splice(
    decl: &StructDecl,
    set: &DeclarationSet,
    depth: usize,
    path: &mut Vec<String>,
    out: &mut Vec<Occurrence>,
) -> AppResult<()> {
    if path.contains(&decl.name) {
        let mut chain = path.clone();
        chain.push(decl.name.clone());
        return Err(AppError::CyclicEmbedding { chain });
    }
    path.push(decl.name.clone());

    for field in &decl.fields {
        if field.embedded && !field.is_skipped {
            if let Some(target) = embedded_target(field, set) {
                splice(target, set, depth + 1, path, out)?;
                continue;
            }
            tracing::warn!(
                "{}.{} embeds unknown type `{}`, keeping it as a plain field",
                decl.name,
                field.name,
                field.ty.raw()
            );
        }
        out.push(Occurrence {
            field: FieldDecl {
                embedded: false,
                ..field.clone()
            },
            depth,
        });
    }

    path.pop();
    Ok(())
}

fn embedded_target<'a>(field: &FieldDecl, set: &'a DeclarationSet) -> Option<&'a StructDecl> {
    match field.ty.class() {
        TypeClass::NamedObject(name) => set.get_struct(name),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Conventions;
    use crate::parser::collect_declarations;
    use pretty_assertions::assert_eq;

    fn set_of(code: &str) -> DeclarationSet {
        collect_declarations(code, "vo", &Conventions::default()).unwrap()
    }

    fn flat_of(set: &DeclarationSet, name: &str) -> AppResult<StructDecl> {
        flatten(set.get_struct(name).unwrap(), set, PropertyCase::LowerCamel)
    }

    fn field_summary(decl: &StructDecl) -> Vec<(String, String)> {
        decl.fields
            .iter()
            .map(|f| {
                let key = f.wire_name(PropertyCase::LowerCamel);
                (key, f.ty.raw().to_string())
            })
            .collect()
    }

    #[test]
    fn test_no_embedding_is_unchanged() {
        let set = set_of("struct User { id: i64, name: String, tags: Vec<String> }");
        let user = set.get_struct("User").unwrap();
        assert_eq!(&flatten(user, &set, PropertyCase::Snake).unwrap(), user);
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let set = set_of(
            r#"
            struct Audit { created: i64, updated: i64 }
            struct Base { id: i64, #[serde(flatten)] audit: Audit }
            struct User { #[serde(flatten)] base: Base, name: String, updated: String }
            "#,
        );
        let once = flat_of(&set, "User").unwrap();
        let twice = flatten(&once, &set, PropertyCase::LowerCamel).unwrap();
        assert_eq!(once, twice);
        assert!(once.is_flat());
    }

    #[test]
    fn test_shallower_field_wins() {
        let set = set_of(
            r#"
            struct B { x: String, y: bool }
            struct A { x: i32, #[serde(flatten)] b: B }
            "#,
        );
        let flat = flat_of(&set, "A").unwrap();
        assert_eq!(
            field_summary(&flat),
            vec![
                ("x".to_string(), "i32".to_string()),
                ("y".to_string(), "bool".to_string())
            ]
        );
    }

    #[test]
    fn test_shallower_field_wins_when_declared_later() {
        let set = set_of(
            r#"
            struct B { x: String }
            struct A { #[serde(flatten)] b: B, x: i32 }
            "#,
        );
        let flat = flat_of(&set, "A").unwrap();
        assert_eq!(field_summary(&flat), vec![("x".to_string(), "i32".to_string())]);
    }

    #[test]
    fn test_tie_goes_to_first_visited() {
        let set = set_of(
            r#"
            struct First { code: i32 }
            struct Second { code: String }
            struct Both { #[serde(flatten)] a: First, #[serde(flatten)] b: Second }
            "#,
        );
        let flat = flat_of(&set, "Both").unwrap();
        assert_eq!(field_summary(&flat), vec![("code".to_string(), "i32".to_string())]);
    }

    #[test]
    fn test_rename_participates_in_shadowing() {
        let set = set_of(
            r#"
            struct Inner { #[serde(rename = "id")] inner_id: String }
            struct Outer { id: i64, #[serde(flatten)] inner: Inner }
            "#,
        );
        let flat = flat_of(&set, "Outer").unwrap();
        assert_eq!(field_summary(&flat), vec![("id".to_string(), "i64".to_string())]);
    }

    #[test]
    fn test_shadowing_compares_cased_keys() {
        let set = set_of(
            r#"
            struct Base { user_name: i64, level: i32 }
            struct User { #[serde(rename = "userName")] name: String, #[serde(flatten)] base: Base }
            "#,
        );
        let flat = flat_of(&set, "User").unwrap();
        assert_eq!(
            field_summary(&flat),
            vec![
                ("userName".to_string(), "String".to_string()),
                ("level".to_string(), "i32".to_string())
            ]
        );

        let user = set.get_struct("User").unwrap();
        let snake = flatten(user, &set, PropertyCase::Snake).unwrap();
        let keys: Vec<_> = snake
            .fields
            .iter()
            .map(|f| f.wire_name(PropertyCase::Snake))
            .collect();
        assert_eq!(keys, vec!["userName", "user_name", "level"]);
    }

    #[test]
    fn test_skipped_field_does_not_shadow() {
        let set = set_of(
            r#"
            struct Audit { token: String }
            struct Session { #[serde(skip)] token: Vec<u8>, #[serde(flatten)] audit: Audit }
            "#,
        );
        let flat = flat_of(&set, "Session").unwrap();
        let fields: Vec<_> = flat
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.ty.raw(), f.is_skipped))
            .collect();
        assert_eq!(
            fields,
            vec![("token", "Vec<u8>", true), ("token", "String", false)]
        );
    }

    #[test]
    fn test_spliced_in_place() {
        let set = set_of(
            r#"
            struct Page { page: i32, size: i32 }
            struct Query { keyword: String, #[serde(flatten)] page: Option<Box<Page>>, sort: String }
            "#,
        );
        let flat = flat_of(&set, "Query").unwrap();
        let names: Vec<_> = flat.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["keyword", "page", "size", "sort"]);
    }

    #[test]
    fn test_unknown_embedding_kept_as_field() {
        let set = set_of("struct A { #[serde(flatten)] extra: HashMap<String, String> }");
        let flat = flat_of(&set, "A").unwrap();
        assert_eq!(flat.fields.len(), 1);
        assert!(!flat.fields[0].embedded);
    }

    #[test]
    fn test_mutual_embedding_is_cyclic() {
        let set = set_of(
            r#"
            struct A { a: i32, #[serde(flatten)] b: B }
            struct B { b: i32, #[serde(flatten)] a: A }
            "#,
        );
        let err = flat_of(&set, "A").unwrap_err();
        match err {
            AppError::CyclicEmbedding { chain } => {
                assert_eq!(chain, vec!["A".to_string(), "B".to_string(), "A".to_string()]);
                assert!(chain.len() <= set.structs().count() + 1);
            }
            other => panic!("expected cyclic embedding, got {}", other),
        }
        assert!(flatten_all(&set, PropertyCase::LowerCamel).is_err());
    }

    #[test]
    fn test_self_embedding_is_cyclic() {
        let set = set_of("struct Node { #[serde(flatten)] next: Box<Node> }");
        let err = flat_of(&set, "Node").unwrap_err();
        assert!(matches!(err, AppError::CyclicEmbedding { chain } if chain.len() == 2));
    }

    #[test]
    fn test_diamond_embedding_is_not_cyclic() {
        let set = set_of(
            r#"
            struct Id { id: i64 }
            struct Left { #[serde(flatten)] id: Id, left: i32 }
            struct Right { #[serde(flatten)] id: Id, right: i32 }
            struct Diamond { #[serde(flatten)] l: Left, #[serde(flatten)] r: Right }
            "#,
        );
        let flat = flat_of(&set, "Diamond").unwrap();
        let names: Vec<_> = flat.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "left", "right"]);
    }
}
