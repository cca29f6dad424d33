pub mod common;
pub mod css;
pub mod html;
pub mod java;
pub mod javascript;
pub mod jsp;
pub mod python;
pub mod sql;

use crate::core::{Extraction, Language};

/// One extraction routine per language family.
///
/// Implementations never fail: content they cannot make sense of yields an
/// empty or partial [`Extraction`].
pub trait LanguageExtractor {
    fn extract(&self, content: &str, path: &str) -> Extraction;
    fn language_name(&self) -> &str;
}

/// Languages without structural extraction (config, docs).
pub struct PlainExtractor;

impl LanguageExtractor for PlainExtractor {
    fn extract(&self, _content: &str, _path: &str) -> Extraction {
        Extraction::default()
    }

    fn language_name(&self) -> &str {
        "plain"
    }
}

pub struct ExtractorFactory;

impl ExtractorFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn get_extractor(&self, language: Language) -> Box<dyn LanguageExtractor + Send + Sync> {
        match language {
            Language::Python => Box::new(python::PythonExtractor::new()),
            Language::JavaScript | Language::TypeScript => {
                Box::new(javascript::JavaScriptExtractor::new())
            }
            Language::Java => Box::new(java::JavaExtractor::new()),
            Language::Jsp => Box::new(jsp::JspExtractor::new()),
            Language::Html => Box::new(html::HtmlExtractor::new()),
            Language::Css => Box::new(css::CssExtractor::new()),
            Language::Sql => Box::new(sql::SqlExtractor::new()),
            Language::Config | Language::Markdown | Language::Unknown => Box::new(PlainExtractor),
        }
    }
}

impl Default for ExtractorFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the language-specific structure of one file.
pub fn extract(content: &str, path: &str, language: Language) -> Extraction {
    ExtractorFactory::new()
        .get_extractor(language)
        .extract(content, path)
}
