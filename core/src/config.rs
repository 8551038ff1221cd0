//! # Conventions
//!
//! Names of the well-known marker types and the property naming rule.
//! Loaded from YAML; every key is optional.

use crate::error::{AppError, AppResult};
use heck::{ToLowerCamelCase, ToSnakeCase};
use serde::Deserialize;
use std::path::Path;

/// Case rule applied to generated property and parameter names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCase {
    /// `userName`
    #[default]
    LowerCamel,
    /// `user_name`
    Snake,
}

impl PropertyCase {
    /// Applies the case rule to a declared name.
    pub fn apply(self, name: &str) -> String {
        match self {
            PropertyCase::LowerCamel => name.to_lower_camel_case(),
            PropertyCase::Snake => name.to_snake_case(),
        }
    }
}

/// Recognition rules shared by the collector, classifier and synthesizer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Conventions {
    /// Last path segments identifying the request-scoped context marker.
    pub context_types: Vec<String>,
    /// Last path segments identifying an uploaded file.
    pub upload_types: Vec<String>,
    /// Last path segments identifying a downloadable file stream.
    pub stream_types: Vec<String>,
    /// Naming rule for generated keys.
    pub property_case: PropertyCase,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            context_types: vec!["Context".to_string()],
            upload_types: vec!["FileHeader".to_string()],
            stream_types: vec!["File".to_string()],
            property_case: PropertyCase::default(),
        }
    }
}

impl Conventions {
    /// Parses conventions from YAML text.
    pub fn from_yaml(yaml: &str) -> AppResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| AppError::General(format!("Failed to parse conventions YAML: {}", e)))
    }

    /// Reads conventions from a YAML file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// True when `name` is a context marker.
    pub fn is_context(&self, name: &str) -> bool {
        self.context_types.iter().any(|t| t == name)
    }

    /// True when `name` is either file marker.
    pub fn is_file(&self, name: &str) -> bool {
        self.upload_types.iter().any(|t| t == name) || self.is_stream(name)
    }

    /// True when `name` is the file-stream marker.
    pub fn is_stream(&self, name: &str) -> bool {
        self.stream_types.iter().any(|t| t == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Conventions::default();
        assert!(c.is_context("Context"));
        assert!(c.is_file("FileHeader"));
        assert!(c.is_file("File"));
        assert!(c.is_stream("File"));
        assert!(!c.is_stream("FileHeader"));
        assert_eq!(c.property_case, PropertyCase::LowerCamel);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let c = Conventions::from_yaml("property_case: snake\ncontext_types: [Ctx, Context]\n")
            .unwrap();
        assert_eq!(c.property_case, PropertyCase::Snake);
        assert!(c.is_context("Ctx"));
        assert_eq!(c.upload_types, vec!["FileHeader".to_string()]);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Conventions::from_yaml("property_case: kebab").unwrap_err();
        assert!(matches!(err, AppError::General(_)));
    }

    #[test]
    fn test_property_case() {
        assert_eq!(PropertyCase::LowerCamel.apply("user_name"), "userName");
        assert_eq!(PropertyCase::LowerCamel.apply("User"), "user");
        assert_eq!(PropertyCase::Snake.apply("userName"), "user_name");
    }
}
