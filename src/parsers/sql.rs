//! SQL object extraction.
//!
//! Table, procedure and function names are read from `CREATE` statements and
//! foreign keys from `REFERENCES` clauses. Keywords are matched
//! case-insensitively; identifiers may be quoted, bracketed or
//! schema-qualified.

use once_cell::sync::Lazy;
use regex::Regex;

use super::common::LineIndex;
use super::LanguageExtractor;
use crate::core::{Extraction, FunctionInfo, NamedItem, ReferenceKind};

const IDENT: &str =
    r#"((?:[\w$]+|"[^"]+"|`[^`]+`|\[[^\]]+\])(?:\s*\.\s*(?:[\w$]+|"[^"]+"|`[^`]+`|\[[^\]]+\]))*)"#;

const QUOTES: &[char] = &['"', '`', '[', ']'];

static TABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\bcreate\s+(?:(?:global\s+|local\s+)?(?:temporary|temp)\s+)?table\s+(?:if\s+not\s+exists\s+)?{IDENT}"
    ))
    .expect("valid table regex")
});

static PROCEDURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\bcreate\s+(?:or\s+replace\s+)?procedure\s+{IDENT}"
    ))
    .expect("valid procedure regex")
});

static FUNCTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\bcreate\s+(?:or\s+replace\s+)?function\s+{IDENT}"
    ))
    .expect("valid function regex")
});

static REFERENCES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\breferences\s+{IDENT}")).expect("valid references regex")
});

pub struct SqlExtractor;

impl SqlExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SqlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for SqlExtractor {
    fn extract(&self, content: &str, _path: &str) -> Extraction {
        let lines = LineIndex::new(content);
        let mut out = Extraction::default();

        let objects = |re: &Regex| -> Vec<NamedItem> {
            re.captures_iter(content)
                .filter_map(|caps| caps.get(1))
                .map(|m| NamedItem::new(unquote(m.as_str()), lines.line_at(m.start())))
                .collect()
        };

        out.tables = objects(&*TABLE_RE);
        out.procedures = objects(&*PROCEDURE_RE);
        out.functions = objects(&*FUNCTION_RE)
            .into_iter()
            .map(|item| FunctionInfo::new(item.name, item.line))
            .collect();

        for item in objects(&*REFERENCES_RE) {
            let table = item.name.rsplit('.').next().unwrap_or(&item.name);
            out.add_dependency(ReferenceKind::TableReference, table, item.line);
        }

        out
    }

    fn language_name(&self) -> &str {
        "sql"
    }
}

/// `[dbo].[orders]`, `"public"."orders"` and `` `orders` `` to their bare
/// dotted form.
fn unquote(identifier: &str) -> String {
    identifier
        .split('.')
        .map(|part| part.trim().trim_matches(QUOTES))
        .collect::<Vec<_>>()
        .join(".")
}
