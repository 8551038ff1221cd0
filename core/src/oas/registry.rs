#![deny(missing_docs)]

//! # Component Registry
//!
//! The title-keyed schema table of one synthesis run. Created at run start,
//! passed by reference to the synthesizer and assembler, and owned by the
//! finished document.

use crate::oas::models::Schema;
use std::collections::BTreeMap;

/// Title-keyed table of named schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `schema` under its title, returning the entry it replaced.
    ///
    /// Untitled schemas register under the empty string.
    pub fn register(&mut self, schema: Schema) -> Option<Schema> {
        let title = schema.title.clone().unwrap_or_default();
        self.schemas.insert(title, schema)
    }

    /// Looks up a schema by title.
    pub fn get(&self, title: &str) -> Option<&Schema> {
        self.schemas.get(title)
    }

    /// Whether a title is registered.
    pub fn contains(&self, title: &str) -> bool {
        self.schemas.contains_key(title)
    }

    /// Follows a reference node to its component; other nodes resolve to themselves.
    pub fn resolve<'a>(&'a self, schema: &'a Schema) -> Option<&'a Schema> {
        match &schema.reference {
            Some(title) => self.get(title),
            None => Some(schema),
        }
    }

    /// Entries in title order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.schemas.iter()
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_mapping::Scalar;

    #[test]
    fn test_register_and_resolve() {
        let mut registry = ComponentRegistry::new();
        let mut user = Schema::object("User");
        user.properties
            .insert("id".into(), Schema::scalar(Scalar::Int64));
        assert!(registry.register(user.clone()).is_none());

        let reference = Schema::reference("User");
        assert_eq!(registry.resolve(&reference), Some(&user));
        assert!(registry.resolve(&Schema::reference("Missing")).is_none());

        let inline = Schema::scalar(Scalar::String);
        assert_eq!(registry.resolve(&inline), Some(&inline));
    }

    #[test]
    fn test_same_title_overwrites() {
        let mut registry = ComponentRegistry::new();
        registry.register(Schema::object("Resp"));
        let replaced = registry.register(
            Schema::object("Resp").with_description(Some("second".into())),
        );
        assert!(replaced.is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("Resp").unwrap().description.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut registry = ComponentRegistry::new();
        for title in ["Zeta", "Alpha", "Mid"] {
            registry.register(Schema::object(title));
        }
        let titles: Vec<_> = registry.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Mid", "Zeta"]);
    }
}
