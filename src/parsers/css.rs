use once_cell::sync::Lazy;
use regex::Regex;

use super::common::{clean_local_link, is_external_link, LineIndex};
use super::LanguageExtractor;
use crate::core::{Extraction, ReferenceKind};

static SELECTOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^{}\n]+)\s*\{").expect("valid selector regex"));

static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"@import\s+(?:url\(\s*)?["']?([^"')\s;]+)["']?"#).expect("valid import regex")
});

/// Crude selector listing and `@import` targets for stylesheets.
pub struct CssExtractor;

impl CssExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CssExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for CssExtractor {
    fn extract(&self, content: &str, _path: &str) -> Extraction {
        let lines = LineIndex::new(content);
        let mut out = Extraction::default();

        out.selectors = SELECTOR_RE
            .captures_iter(content)
            .map(|caps| caps[1].trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        out.total_rules = out.selectors.len();

        for caps in IMPORT_RE.captures_iter(content) {
            let Some(target) = caps.get(1) else { continue };
            if is_external_link(target.as_str()) {
                continue;
            }
            let import = clean_local_link(target.as_str());
            if import.is_empty() {
                continue;
            }
            let line = lines.line_at(target.start());
            out.add_dependency(ReferenceKind::CssImport, import.clone(), line);
            out.css_imports.push(import);
        }

        out
    }

    fn language_name(&self) -> &str {
        "css"
    }
}
