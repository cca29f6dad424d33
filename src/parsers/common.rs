use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::{Language, Node as TSNode, Parser, Tree};

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(language)?;
        Ok(Self { parser })
    }

    /// Parse `source`, returning `None` when tree-sitter gives up or the tree
    /// contains syntax errors.
    pub fn parse_clean(&mut self, source: &str) -> Option<Tree> {
        let tree = self.parser.parse(source, None)?;
        if tree.root_node().has_error() {
            return None;
        }
        Some(tree)
    }
}

pub fn extract_text<'a>(node: &TSNode, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.byte_range()]).unwrap_or("")
}

pub fn find_child_by_kind<'a>(node: &TSNode<'a>, kind: &str) -> Option<TSNode<'a>> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == kind {
            return Some(child);
        }
    }
    None
}

pub fn line_of(node: &TSNode) -> usize {
    node.start_position().row + 1
}

/// Byte offset to 1-based line lookup for regex matches.
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { starts }
    }

    pub fn line_at(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }
}

static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("valid scheme regex"));

/// True for links that never name a file in the tree: absolute URLs, any
/// `scheme:` link (mail, javascript, data, ...) and fragment anchors.
pub fn is_external_link(link: &str) -> bool {
    link.is_empty() || link.starts_with('#') || link.starts_with("//") || SCHEME_RE.is_match(link)
}

/// Reduce a local link to a path: drop query string and fragment, and make a
/// root-relative link repo-relative.
pub fn clean_local_link(link: &str) -> String {
    let end = link.find(['?', '#']).unwrap_or(link.len());
    link[..end].trim().trim_start_matches('/').to_string()
}

/// True when a captured attribute value is a runtime expression rather than a
/// literal path.
pub fn is_dynamic_value(value: &str) -> bool {
    value.contains("<%") || value.contains("${") || value.contains("#{")
}

/// Collapse `.`, `..` and repeated separators in a `/`-separated path.
/// Leading `..` segments that cannot be popped are kept.
pub fn normalize_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(parts.last(), Some(last) if *last != "..") {
                    parts.pop();
                } else {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

pub fn parent_dir(path: &str) -> &str {
    path.rfind('/').map(|i| &path[..i]).unwrap_or("")
}

pub fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Strip the last extension the way `os.path.splitext` does: a leading dot is
/// part of the name, not an extension.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if name[..i].chars().any(|c| c != '.') => &name[..i],
        _ => name,
    }
}
