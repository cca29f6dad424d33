use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::language::Language;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Import,
    JavaImport,
    JspInclude,
    JspForward,
    TableReference,
    ResourceLink,
    CssImport,
}

impl ReferenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceKind::Import => "import",
            ReferenceKind::JavaImport => "java_import",
            ReferenceKind::JspInclude => "jsp_include",
            ReferenceKind::JspForward => "jsp_forward",
            ReferenceKind::TableReference => "table_reference",
            ReferenceKind::ResourceLink => "resource_link",
            ReferenceKind::CssImport => "css_import",
        }
    }
}

/// An unresolved cross-file mention found by an extractor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub raw_name: String,
    pub line: usize,
}

impl Reference {
    pub fn new(kind: ReferenceKind, raw_name: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            raw_name: raw_name.into(),
            line,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
}

impl FunctionInfo {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
            args: None,
            docstring: None,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = Some(args);
        self
    }

    pub fn with_docstring(mut self, docstring: String) -> Self {
        self.docstring = Some(docstring);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: String,
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
    pub methods: Vec<String>,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
            docstring: None,
            methods: Vec::new(),
        }
    }

    pub fn with_docstring(mut self, docstring: String) -> Self {
        self.docstring = Some(docstring);
        self
    }
}

/// A named object with its declaration line (SQL tables and procedures).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedItem {
    pub name: String,
    pub line: usize,
}

impl NamedItem {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }
}

/// Language-specific structure produced by an extractor.
///
/// Fields that do not apply to a language are left empty and skipped when
/// serialised.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Extraction {
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub imports: Vec<String>,
    pub dependencies: Vec<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<NamedItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub procedures: Vec<NamedItem>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, usize>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub total_tags: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_links: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selectors: Vec<String>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub total_rules: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_imports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jsp_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub java_imports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jsp_includes: Vec<String>,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

impl Extraction {
    pub fn add_dependency(
        &mut self,
        kind: ReferenceKind,
        raw_name: impl Into<String>,
        line: usize,
    ) {
        self.dependencies.push(Reference::new(kind, raw_name, line));
    }
}

/// Structural summary of one scanned file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    /// Repository-relative path with `/` separators; unique within a run.
    pub path: String,
    pub language: Language,
    pub size: usize,
    pub lines: usize,
    #[serde(flatten)]
    pub extraction: Extraction,
}

impl FileRecord {
    pub fn new(path: String, language: Language, content: &str, extraction: Extraction) -> Self {
        Self {
            path,
            language,
            size: content.len(),
            lines: content.lines().count(),
            extraction,
        }
    }

    pub fn functions(&self) -> &[FunctionInfo] {
        &self.extraction.functions
    }

    pub fn classes(&self) -> &[ClassInfo] {
        &self.extraction.classes
    }

    pub fn dependencies(&self) -> &[Reference] {
        &self.extraction.dependencies
    }

    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}
