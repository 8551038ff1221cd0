//! # Doc Comments
//!
//! Reads `///` comments and `#[doc = "..."]` attributes, and splits method
//! docs into their rustdoc sections.

use ra_ap_syntax::ast;
use ra_ap_syntax::{AstNode, SyntaxKind, SyntaxNode};
use regex::Regex;
use std::sync::OnceLock;

/// Method docs split at rustdoc headings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocSections {
    /// Lines before the first `# ` heading.
    pub summary: Vec<String>,
    /// Per-argument lines from `` * `name` - text `` bullets under `# Arguments`.
    pub arguments: Vec<(String, Vec<String>)>,
    /// Lines under `# Returns`.
    pub returns: Vec<String>,
}

impl DocSections {
    /// Doc lines for the named argument, empty when undocumented.
    pub fn argument(&self, name: &str) -> Vec<String> {
        self.arguments
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, lines)| lines.clone())
            .unwrap_or_default()
    }
}

/// Extracts doc lines attached to a syntax node, in source order.
pub fn extract_doc_lines(node: &SyntaxNode) -> Vec<String> {
    static DOC_ATTR_RE: OnceLock<Regex> = OnceLock::new();
    let doc_attr_re = DOC_ATTR_RE.get_or_init(|| {
        Regex::new(r#"^#\[\s*doc\s*=\s*"((?:[^"\\]|\\.)*)"\s*\]$"#).expect("Invalid regex")
    });

    let mut lines = Vec::new();

    for child in node.children_with_tokens() {
        if child.kind() == SyntaxKind::COMMENT {
            let text = child.to_string();
            if let Some(content) = text.strip_prefix("///") {
                lines.push(content.strip_prefix(' ').unwrap_or(content).to_string());
            }
        } else if let Some(attr) = child.as_node().cloned().and_then(ast::Attr::cast) {
            let text = attr.syntax().text().to_string();
            if let Some(caps) = doc_attr_re.captures(text.trim()) {
                let content = caps[1].replace("\\\"", "\"");
                lines.push(content.strip_prefix(' ').unwrap_or(&content).to_string());
            }
        }
    }

    trim_blank_edges(lines)
}

/// Splits method doc lines into summary, `# Arguments` and `# Returns`.
///
/// Unknown headings end the current section; their content is dropped.
pub fn split_sections(lines: &[String]) -> DocSections {
    static ARG_RE: OnceLock<Regex> = OnceLock::new();
    let arg_re = ARG_RE.get_or_init(|| {
        Regex::new(r#"^\s*[*-]\s*`([^`]+)`\s*(?:[-:]\s*)?(.*)$"#).expect("Invalid regex")
    });

    #[derive(PartialEq)]
    enum Section {
        Summary,
        Arguments,
        Returns,
        Other,
    }

    let mut sections = DocSections::default();
    let mut current = Section::Summary;

    for line in lines {
        if let Some(heading) = line.trim_start().strip_prefix("# ") {
            current = match heading.trim().to_ascii_lowercase().as_str() {
                "arguments" | "parameters" => Section::Arguments,
                "returns" => Section::Returns,
                _ => Section::Other,
            };
            continue;
        }

        match current {
            Section::Summary => sections.summary.push(line.clone()),
            Section::Returns => sections.returns.push(line.clone()),
            Section::Arguments => {
                if let Some(caps) = arg_re.captures(line) {
                    let text = caps[2].trim().to_string();
                    let lines = if text.is_empty() { vec![] } else { vec![text] };
                    sections.arguments.push((caps[1].trim().to_string(), lines));
                } else if let Some((_, lines)) = sections.arguments.last_mut() {
                    if !line.trim().is_empty() {
                        lines.push(line.trim().to_string());
                    }
                }
            }
            Section::Other => {}
        }
    }

    sections.summary = trim_blank_edges(sections.summary);
    sections.returns = trim_blank_edges(sections.returns);
    sections
}

fn trim_blank_edges(mut lines: Vec<String>) -> Vec<String> {
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| l.trim().is_empty()).count();
    lines.drain(..leading);
    lines
}
