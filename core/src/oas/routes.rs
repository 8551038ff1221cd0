#![deny(missing_docs)]

//! # Route Naming
//!
//! Derives the HTTP verb and path of an operation from its method name.

use crate::oas::models::HttpMethod;

const VERB_PREFIXES: [(&str, HttpMethod); 4] = [
    ("Get", HttpMethod::Get),
    ("Post", HttpMethod::Post),
    ("Put", HttpMethod::Put),
    ("Delete", HttpMethod::Delete),
];

/// Splits an UpperCamelCase method name into its verb and route segment.
///
/// A leading `Get`/`Post`/`Put`/`Delete` word selects the verb and the
/// lowercased remainder becomes the segment. Anything else is a POST whose
/// segment is the whole lowercased name.
pub fn split_method_name(name: &str) -> (HttpMethod, String) {
    for (prefix, verb) in VERB_PREFIXES {
        if let Some(rest) = name.strip_prefix(prefix) {
            if rest.is_empty() {
                return (verb, name.to_lowercase());
            }
            if rest.starts_with(|c: char| c.is_uppercase() || c.is_ascii_digit()) {
                return (verb, rest.to_lowercase());
            }
        }
    }
    (HttpMethod::Post, name.to_lowercase())
}

/// The verb an operation is bound to.
pub fn http_method(name: &str) -> HttpMethod {
    split_method_name(name).0
}

/// `/<lowercased interface>/<segment>`.
pub fn operation_path(interface: &str, method: &str) -> String {
    let (_, segment) = split_method_name(method);
    format!("/{}/{}", interface.to_lowercase(), segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_prefixes() {
        assert_eq!(
            split_method_name("GetUserUsername"),
            (HttpMethod::Get, "userusername".to_string())
        );
        assert_eq!(
            split_method_name("PostUserCreateWithList"),
            (HttpMethod::Post, "usercreatewithlist".to_string())
        );
        assert_eq!(split_method_name("PutUser"), (HttpMethod::Put, "user".to_string()));
        assert_eq!(
            split_method_name("DeleteUser"),
            (HttpMethod::Delete, "user".to_string())
        );
    }

    #[test]
    fn test_default_is_post() {
        assert_eq!(
            split_method_name("UploadAvatar"),
            (HttpMethod::Post, "uploadavatar".to_string())
        );
        // "Getaway" does not start with the word "Get".
        assert_eq!(
            split_method_name("Getaway"),
            (HttpMethod::Post, "getaway".to_string())
        );
    }

    #[test]
    fn test_bare_verb_keeps_name() {
        assert_eq!(split_method_name("Get"), (HttpMethod::Get, "get".to_string()));
        assert_eq!(http_method("Delete"), HttpMethod::Delete);
    }

    #[test]
    fn test_operation_path() {
        assert_eq!(operation_path("User", "GetUserUsername"), "/user/userusername");
        assert_eq!(operation_path("Usersvc", "PageUsers"), "/usersvc/pageusers");
    }
}
