use once_cell::sync::Lazy;
use regex::Regex;

use super::common::LineIndex;
use super::LanguageExtractor;
use crate::core::{ClassInfo, Extraction, FunctionInfo, ReferenceKind};

static TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:(?:public|protected|private|abstract|final|static|sealed)\s+)*(?:class|interface|enum|record)\s+(\w+)",
    )
    .expect("valid type regex")
});

static METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:public|private|protected)?\s*(?:static\s+)?(?:[\w<>\[\],.?]+\s+)+(\w+)\s*\(([^)]*)\)\s*(?:throws\s+[\w.,\s]+)?\{",
    )
    .expect("valid method regex")
});

static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*import\s+(?:static\s+)?([^;]+);").expect("valid import regex")
});

/// Words the method pattern picks up from control-flow statements such as
/// `} else if (x) {`.
const NOT_METHODS: &[&str] = &[
    "if",
    "for",
    "while",
    "switch",
    "catch",
    "synchronized",
    "return",
    "new",
    "else",
    "try",
    "do",
    "throw",
];

/// Pattern-based extractor for Java sources.
pub struct JavaExtractor;

impl JavaExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for JavaExtractor {
    fn extract(&self, content: &str, _path: &str) -> Extraction {
        let lines = LineIndex::new(content);
        let mut out = Extraction::default();

        for caps in TYPE_RE.captures_iter(content) {
            if let Some(name) = caps.get(1) {
                let line = lines.line_at(name.start());
                out.classes.push(ClassInfo::new(name.as_str(), line));
            }
        }

        for caps in METHOD_RE.captures_iter(content) {
            let (Some(name), Some(params)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            if NOT_METHODS.contains(&name.as_str()) {
                continue;
            }
            let line = lines.line_at(name.start());
            let args = parameter_names(params.as_str());
            let function = FunctionInfo::new(name.as_str(), line).with_args(args);
            out.functions.push(function);

            // Attribute to the closest type declared above the method.
            if let Some(owner) = out.classes.iter_mut().rev().find(|c| c.line <= line) {
                owner.methods.push(name.as_str().to_string());
            }
        }

        for caps in IMPORT_RE.captures_iter(content) {
            if let Some(import) = caps.get(1) {
                let name: String = import.as_str().split_whitespace().collect();
                let line = lines.line_at(import.start());
                out.add_dependency(ReferenceKind::Import, name.clone(), line);
                out.imports.push(name);
            }
        }

        out
    }

    fn language_name(&self) -> &str {
        "java"
    }
}

/// Last identifier of each comma-separated `Type name` parameter.
fn parameter_names(params: &str) -> Vec<String> {
    params
        .split(',')
        .filter_map(|p| p.split_whitespace().last())
        .map(|name| name.trim_start_matches("...").to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
