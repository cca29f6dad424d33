use once_cell::sync::Lazy;
use regex::Regex;

use super::common::LineIndex;
use super::LanguageExtractor;
use crate::core::{ClassInfo, Extraction, FunctionInfo, ReferenceKind};

static FUNCTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:function\s*\*?\s*(\w+)|(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*=>|\w+\s*=>))",
    )
    .expect("valid function regex")
});

static CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bclass\s+(\w+)").expect("valid class regex"));

static IMPORT_FROM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"import\s+[^'";]*?\bfrom\s+['"]([^'"]+)['"]"#).expect("valid import regex")
});

static SIDE_EFFECT_IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bimport\s+['"]([^'"]+)['"]"#).expect("valid import regex"));

static REQUIRE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:require|import)\s*\(\s*['"]([^'"]+)['"]\s*\)"#).expect("valid require regex")
});

static EXPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"export\s+(?:default\s+)?(?:async\s+)?(?:function\s*\*?\s*(\w+)|class\s+(\w+)|(?:const|let|var)\s+(\w+))",
    )
    .expect("valid export regex")
});

/// Pattern-based extractor shared by JavaScript and TypeScript.
pub struct JavaScriptExtractor;

impl JavaScriptExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaScriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for JavaScriptExtractor {
    fn extract(&self, content: &str, _path: &str) -> Extraction {
        let lines = LineIndex::new(content);
        let mut out = Extraction::default();

        for caps in FUNCTION_RE.captures_iter(content) {
            if let Some(name) = caps.get(1).or_else(|| caps.get(2)) {
                let line = lines.line_at(caps.get(0).map_or(0, |m| m.start()));
                out.functions.push(FunctionInfo::new(name.as_str(), line));
            }
        }

        for caps in CLASS_RE.captures_iter(content) {
            let line = lines.line_at(caps.get(0).map_or(0, |m| m.start()));
            out.classes.push(ClassInfo::new(&caps[1], line));
        }

        let mut module_refs: Vec<(usize, String)> = Vec::new();
        for re in [&*IMPORT_FROM_RE, &*SIDE_EFFECT_IMPORT_RE, &*REQUIRE_RE] {
            for caps in re.captures_iter(content) {
                if let Some(module) = caps.get(1) {
                    module_refs.push((module.start(), module.as_str().to_string()));
                }
            }
        }
        // Source order regardless of which pattern found the reference.
        module_refs.sort_by_key(|(offset, _)| *offset);
        module_refs.dedup_by_key(|(offset, _)| *offset);
        for (offset, module) in module_refs {
            out.add_dependency(ReferenceKind::Import, module.clone(), lines.line_at(offset));
            out.imports.push(module);
        }

        for caps in EXPORT_RE.captures_iter(content) {
            if let Some(name) = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)) {
                out.exports.push(name.as_str().to_string());
            }
        }

        out
    }

    fn language_name(&self) -> &str {
        "javascript"
    }
}
