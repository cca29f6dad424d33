use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use super::common::{clean_local_link, is_dynamic_value, is_external_link, LineIndex};
use super::LanguageExtractor;
use crate::core::{Extraction, ReferenceKind};

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(\w+)(?:\s+[^>]*)?>").expect("valid tag regex"));

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:src|href)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid link regex")
});

/// Tag-frequency histogram and resource links for HTML pages.
pub struct HtmlExtractor;

impl HtmlExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for HtmlExtractor {
    fn extract(&self, content: &str, _path: &str) -> Extraction {
        let mut out = Extraction::default();
        collect_markup(content, &LineIndex::new(content), &mut out);
        out
    }

    fn language_name(&self) -> &str {
        "html"
    }
}

/// Fill `tags`, `total_tags`, `resource_links` and the matching
/// `resource_link` dependencies. Shared with the JSP extractor.
pub(super) fn collect_markup(content: &str, lines: &LineIndex, out: &mut Extraction) {
    let mut tags: BTreeMap<String, usize> = BTreeMap::new();
    for caps in TAG_RE.captures_iter(&content.to_lowercase()) {
        *tags.entry(caps[1].to_string()).or_insert(0) += 1;
    }
    out.total_tags = tags.values().sum();
    out.tags = tags;

    for caps in LINK_RE.captures_iter(content) {
        let Some(value) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        let raw = value.as_str().trim();
        if is_external_link(raw) || is_dynamic_value(raw) {
            continue;
        }
        let link = clean_local_link(raw);
        if link.is_empty() {
            continue;
        }
        let line = lines.line_at(value.start());
        out.add_dependency(ReferenceKind::ResourceLink, link.clone(), line);
        out.resource_links.push(link);
    }
}
