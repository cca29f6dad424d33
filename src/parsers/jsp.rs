use once_cell::sync::Lazy;
use regex::Regex;

use super::common::{is_dynamic_value, LineIndex};
use super::html::collect_markup;
use super::LanguageExtractor;
use crate::core::{Extraction, ReferenceKind};

static PAGE_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<%@\s*page\b[^%]*?\bimport\s*=\s*"([^"]+)""#).expect("valid page import regex")
});

static STATIC_INCLUDE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<%@\s*include\s+file\s*=\s*"([^"]+)"\s*%>"#).expect("valid include regex")
});

static DYNAMIC_INCLUDE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<jsp:include\s+page\s*=\s*"([^"]+)""#).expect("valid include regex")
});

static FORWARD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:<jsp:forward\s+page\s*=\s*"([^"]+)"|(?:sendRedirect|getRequestDispatcher)\s*\(\s*"([^"]+)"\s*\))"#,
    )
    .expect("valid forward regex")
});

static CUSTOM_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?(\w+):(\w+)").expect("valid custom tag regex"));

/// Extractor for JSP pages: directives, includes, forwards and tag
/// libraries on top of the plain markup structure.
pub struct JspExtractor;

impl JspExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JspExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for JspExtractor {
    fn extract(&self, content: &str, _path: &str) -> Extraction {
        let lines = LineIndex::new(content);
        let mut out = Extraction::default();

        for caps in PAGE_IMPORT_RE.captures_iter(content) {
            let Some(list) = caps.get(1) else { continue };
            let line = lines.line_at(list.start());
            let classes = list.as_str().split(',').map(str::trim);
            for class in classes.filter(|c| !c.is_empty()) {
                out.java_imports.push(class.to_string());
                out.imports.push(class.to_string());
                out.add_dependency(ReferenceKind::JavaImport, class, line);
            }
        }

        let mut includes: Vec<(usize, &str)> = STATIC_INCLUDE_RE
            .captures_iter(content)
            .chain(DYNAMIC_INCLUDE_RE.captures_iter(content))
            .filter_map(|caps| caps.get(1))
            .map(|m| (m.start(), m.as_str()))
            .collect();
        includes.sort_by_key(|(offset, _)| *offset);
        for (offset, page) in includes {
            if let Some(page) = page_target(page) {
                out.jsp_includes.push(page.clone());
                out.add_dependency(ReferenceKind::JspInclude, page, lines.line_at(offset));
            }
        }

        for caps in FORWARD_RE.captures_iter(content) {
            let Some(target) = caps.get(1).or_else(|| caps.get(2)) else {
                continue;
            };
            let line = lines.line_at(target.start());
            if let Some(page) = page_target(target.as_str()) {
                out.add_dependency(ReferenceKind::JspForward, page, line);
            }
        }

        for caps in CUSTOM_TAG_RE.captures_iter(content) {
            let tag = format!("{}:{}", &caps[1], &caps[2]);
            if !out.jsp_tags.contains(&tag) {
                out.jsp_tags.push(tag);
            }
        }

        collect_markup(content, &lines, &mut out);
        out
    }

    fn language_name(&self) -> &str {
        "jsp"
    }
}

/// Literal page path of an include or forward; `None` for runtime values.
fn page_target(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || is_dynamic_value(raw) {
        return None;
    }
    let page = raw.trim_start_matches('/');
    (!page.is_empty()).then(|| page.to_string())
}
