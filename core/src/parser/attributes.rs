//! # Attribute Operations
//!
//! internal logic for parsing `#[serde(...)]` attributes on struct fields.

use ra_ap_syntax::ast::{self};
use ra_ap_syntax::{AstNode, SyntaxNode};
use regex::Regex;
use std::sync::OnceLock;

/// Helper struct for attributes extracted from a single node.
#[derive(Default, Debug)]
pub struct AttrInfo {
    /// The rename value if present.
    pub rename: Option<String>,
    /// Whether the skip flag was found.
    pub is_skipped: bool,
    /// Whether the flatten flag was found.
    pub flatten: bool,
}

/// Analyzes attributes on a node to find `serde` configurations.
pub fn extract_attributes(node: &SyntaxNode) -> AttrInfo {
    let mut info = AttrInfo::default();

    let attributes = node.children().filter_map(ast::Attr::cast);

    for attr in attributes {
        if let Some(meta) = attr.meta() {
            if let Some(path) = meta.path() {
                if path.to_string() == "serde" {
                    if let Some(tt) = meta.token_tree() {
                        parse_attribute_content(&tt.to_string(), &mut info);
                    }
                }
            }
        }
    }

    info
}

/// Parses the inner content of an attribute.
fn parse_attribute_content(content: &str, info: &mut AttrInfo) {
    static RENAME_RE: OnceLock<Regex> = OnceLock::new();
    let rename_re =
        RENAME_RE.get_or_init(|| Regex::new(r#"rename\s*=\s*"([^"]+)""#).expect("Invalid regex"));

    static SKIP_RE: OnceLock<Regex> = OnceLock::new();
    let skip_re = SKIP_RE.get_or_init(|| Regex::new(r#"\bskip\b"#).expect("Invalid regex"));

    static FLATTEN_RE: OnceLock<Regex> = OnceLock::new();
    let flatten_re =
        FLATTEN_RE.get_or_init(|| Regex::new(r#"\bflatten\b"#).expect("Invalid regex"));

    if let Some(caps) = rename_re.captures(content) {
        if let Some(val) = caps.get(1) {
            info.rename = Some(val.as_str().to_string());
        }
    }

    if skip_re.is_match(content) {
        info.is_skipped = true;
    }

    if flatten_re.is_match(content) {
        info.flatten = true;
    }
}
