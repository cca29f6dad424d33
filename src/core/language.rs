use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Language tag assigned to every scanned file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Jsp,
    Html,
    Css,
    Sql,
    Config,
    Markdown,
    Unknown,
}

impl Language {
    pub const SUPPORTED: [Language; 10] = [
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Java,
        Language::Jsp,
        Language::Html,
        Language::Css,
        Language::Sql,
        Language::Config,
        Language::Markdown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Jsp => "jsp",
            Language::Html => "html",
            Language::Css => "css",
            Language::Sql => "sql",
            Language::Config => "config",
            Language::Markdown => "markdown",
            Language::Unknown => "unknown",
        }
    }

    pub fn is_known(self) -> bool {
        self != Language::Unknown
    }

    /// Extensions mapped to this language by the default table.
    pub fn default_extensions(self) -> &'static [&'static str] {
        match self {
            Language::Python => &["py", "pyw"],
            Language::JavaScript => &["js", "jsx", "mjs"],
            Language::TypeScript => &["ts", "tsx"],
            Language::Java => &["java"],
            Language::Jsp => &["jsp", "jspf"],
            Language::Html => &["html", "htm"],
            Language::Css => &["css", "scss", "sass"],
            Language::Sql => &["sql"],
            Language::Config => &["xml", "json", "yml", "yaml", "properties", "toml", "ini"],
            Language::Markdown => &["md", "rst"],
            Language::Unknown => &[],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The built-in extension table. Keys are lower-case, without the dot.
pub fn default_extension_table() -> BTreeMap<String, Language> {
    let mut table = BTreeMap::new();
    for language in Language::SUPPORTED {
        for ext in language.default_extensions() {
            table.insert((*ext).to_string(), language);
        }
    }
    table
}

/// Maps file paths to a [`Language`] through an extension table.
#[derive(Debug, Clone)]
pub struct LanguageClassifier {
    extensions: BTreeMap<String, Language>,
}

impl LanguageClassifier {
    pub fn new(extensions: &BTreeMap<String, Language>) -> Self {
        // Keys are normalised so a config file may spell them ".PY" or "py".
        let extensions = extensions
            .iter()
            .map(|(ext, lang)| (ext.trim_start_matches('.').to_ascii_lowercase(), *lang))
            .collect();
        Self { extensions }
    }

    pub fn classify(&self, path: &Path) -> Language {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.extensions.get(&ext.to_ascii_lowercase()))
            .copied()
            .unwrap_or(Language::Unknown)
    }

    /// Every configured extension with a leading dot, in table order.
    pub fn dotted_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .filter(|(_, lang)| lang.is_known())
            .map(|(ext, _)| format!(".{ext}"))
            .collect()
    }
}

impl Default for LanguageClassifier {
    fn default() -> Self {
        Self::new(&default_extension_table())
    }
}
