//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Every kind except `DuplicateDeclaration` aborts a synthesis run. Duplicates
//! are resolved last-write-wins and surfaced as warnings.

use derive_more::{Display, From};

/// What kind of name collided when a `DuplicateDeclaration` is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DeclKind {
    /// Two structs share a name.
    #[display("struct")]
    Struct,
    /// A synthesized schema title replaced an existing component.
    #[display("schema")]
    Schema,
    /// Two methods derived the same route.
    #[display("path")]
    Path,
}

/// The Global Error Enum.
///
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// An anonymous structure was used where a named type is required.
    #[from(ignore)]
    #[display("Malformed declaration: {owner}.{item} uses anonymous structure `{ty}`")]
    MalformedDeclaration {
        /// Method or struct that declares the item.
        owner: String,
        /// Parameter, result or field name.
        item: String,
        /// The offending type signature.
        ty: String,
    },

    /// More than one parameter would have to become the request body.
    #[from(ignore)]
    #[display(
        "Too many non-builtin parameters in {method}, cannot determine a single request body: {}",
        types.join(", ")
    )]
    AmbiguousRequestBody {
        /// Method name.
        method: String,
        /// The competing parameter types, in declaration order.
        types: Vec<String>,
    },

    /// An embedding chain revisited a struct.
    #[from(ignore)]
    #[display("Cyclic embedding: {}", chain.join(" -> "))]
    CyclicEmbedding {
        /// Struct names along the offending path, ending with the repeated one.
        chain: Vec<String>,
    },

    /// No service trait was found.
    #[from(ignore)]
    #[display("No service interface found")]
    MissingContract,

    /// A name was declared twice; the later declaration wins.
    #[from(ignore)]
    #[display("Duplicate {kind} `{name}`, later declaration wins")]
    DuplicateDeclaration {
        /// What collided.
        kind: DeclKind,
        /// The colliding name.
        name: String,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// Whether this error must abort the pipeline.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AppError::DuplicateDeclaration { .. })
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_only_duplicates_are_non_fatal() {
        let dup = AppError::DuplicateDeclaration {
            kind: DeclKind::Path,
            name: "/user/list".into(),
        };
        assert!(!dup.is_fatal());
        assert!(AppError::MissingContract.is_fatal());
        assert!(AppError::CyclicEmbedding { chain: vec![] }.is_fatal());
    }

    #[test]
    fn test_display_messages() {
        let err = AppError::AmbiguousRequestBody {
            method: "PostOrder".into(),
            types: vec!["Order".into(), "Customer".into()],
        };
        assert_eq!(
            err.to_string(),
            "Too many non-builtin parameters in PostOrder, cannot determine a single request body: Order, Customer"
        );

        let err = AppError::CyclicEmbedding {
            chain: vec!["A".into(), "B".into(), "A".into()],
        };
        assert_eq!(err.to_string(), "Cyclic embedding: A -> B -> A");

        let err = AppError::DuplicateDeclaration {
            kind: DeclKind::Struct,
            name: "User".into(),
        };
        assert_eq!(err.to_string(), "Duplicate struct `User`, later declaration wins");
    }
}
