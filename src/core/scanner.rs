use dashmap::DashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use super::error::ScanError;
use super::language::{Language, LanguageClassifier};
use super::record::FileRecord;
use crate::config::AnalyzerConfig;
use crate::parsers::ExtractorFactory;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LanguageStats {
    pub files: usize,
    pub lines: usize,
}

/// Coarse architectural bucket of a file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StructureBucket {
    Web,
    Backend,
    Database,
    Config,
    Test,
    Documentation,
}

/// Every scanned path lands in exactly one bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectStructure {
    pub web: Vec<String>,
    pub backend: Vec<String>,
    pub database: Vec<String>,
    pub config: Vec<String>,
    pub test: Vec<String>,
    pub documentation: Vec<String>,
}

impl ProjectStructure {
    pub fn push(&mut self, bucket: StructureBucket, path: String) {
        match bucket {
            StructureBucket::Web => self.web.push(path),
            StructureBucket::Backend => self.backend.push(path),
            StructureBucket::Database => self.database.push(path),
            StructureBucket::Config => self.config.push(path),
            StructureBucket::Test => self.test.push(path),
            StructureBucket::Documentation => self.documentation.push(path),
        }
    }

    pub fn bucket(&self, bucket: StructureBucket) -> &[String] {
        match bucket {
            StructureBucket::Web => &self.web,
            StructureBucket::Backend => &self.backend,
            StructureBucket::Database => &self.database,
            StructureBucket::Config => &self.config,
            StructureBucket::Test => &self.test,
            StructureBucket::Documentation => &self.documentation,
        }
    }

    pub fn len(&self) -> usize {
        self.web.len()
            + self.backend.len()
            + self.database.len()
            + self.config.len()
            + self.test.len()
            + self.documentation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of one scan over a source tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodebaseMetadata {
    /// Sorted by path.
    pub files: Vec<FileRecord>,
    pub language_stats: BTreeMap<Language, LanguageStats>,
    pub total_files: usize,
    pub total_lines: usize,
    pub project_structure: ProjectStructure,
}

pub struct CodebaseScanner {
    config: AnalyzerConfig,
    classifier: LanguageClassifier,
    extractors: ExtractorFactory,
}

impl CodebaseScanner {
    pub fn new(config: AnalyzerConfig) -> Self {
        let classifier = LanguageClassifier::new(&config.extensions);
        Self {
            config,
            classifier,
            extractors: ExtractorFactory::new(),
        }
    }

    pub fn classifier(&self) -> &LanguageClassifier {
        &self.classifier
    }

    pub fn scan(&self, root_path: &Path) -> Result<CodebaseMetadata, ScanError> {
        check_root(root_path)?;

        let candidates = self.collect_candidates(root_path);
        debug!("{} candidate files after pruning", candidates.len());

        let stats: DashMap<Language, LanguageStats> = DashMap::new();
        let mut files: Vec<FileRecord> = candidates
            .par_iter()
            .filter_map(|(path, language)| {
                let record = self.scan_file(root_path, path, *language)?;
                let mut entry = stats.entry(record.language).or_default();
                entry.files += 1;
                entry.lines += record.lines;
                Some(record)
            })
            .collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));

        let mut project_structure = ProjectStructure::default();
        for record in &files {
            project_structure.push(bucket_for(record), record.path.clone());
        }

        let language_stats: BTreeMap<Language, LanguageStats> = stats.into_iter().collect();
        let total_lines = language_stats.values().map(|s| s.lines).sum();

        info!(
            "Scanned {} files ({} lines) in {} languages",
            files.len(),
            total_lines,
            language_stats.len()
        );

        Ok(CodebaseMetadata {
            total_files: files.len(),
            total_lines,
            files,
            language_stats,
            project_structure,
        })
    }

    /// Walk the tree, pruning ignored directories before descent, and keep
    /// files with a known language.
    fn collect_candidates(&self, root_path: &Path) -> Vec<(PathBuf, Language)> {
        WalkDir::new(root_path)
            .follow_links(self.config.follow_links)
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Skipping unreadable entry: {err}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let language = self.classifier.classify(entry.path());
                language.is_known().then(|| (entry.into_path(), language))
            })
            .collect()
    }

    /// Ignored or hidden directories are pruned before descent; hidden files
    /// are dropped when `skip_hidden` is set.
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let Some(name) = entry.file_name().to_str() else {
            return false;
        };
        if entry.file_type().is_dir() {
            self.config.is_ignored_dir(name)
        } else {
            self.config.is_hidden(name)
        }
    }

    fn scan_file(&self, root_path: &Path, path: &Path, language: Language) -> Option<FileRecord> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!("Skipping unreadable file {}: {err}", path.display());
                return None;
            }
        };
        let content = String::from_utf8_lossy(&bytes);
        let relative = relative_path(root_path, path);

        let extractor = self.extractors.get_extractor(language);
        let extraction = extractor.extract(&content, &relative);
        debug!(
            "{relative}: {} extractor, {} references",
            extractor.language_name(),
            extraction.dependencies.len()
        );
        let mut record = FileRecord::new(relative, language, &content, extraction);
        record.size = bytes.len();
        Some(record)
    }
}

impl Default for CodebaseScanner {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

fn check_root(root_path: &Path) -> Result<(), ScanError> {
    if !root_path.exists() {
        return Err(ScanError::RootNotFound(root_path.to_path_buf()));
    }
    if !root_path.is_dir() {
        return Err(ScanError::RootNotDirectory(root_path.to_path_buf()));
    }
    fs::read_dir(root_path).map_err(|source| ScanError::RootUnreadable {
        path: root_path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Repository-relative path with `/` separators.
pub fn relative_path(root_path: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root_path).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Language decides first; path names only place files the language
/// buckets leave open.
pub fn bucket_for(record: &FileRecord) -> StructureBucket {
    match record.language {
        Language::Html
        | Language::Css
        | Language::Jsp
        | Language::JavaScript
        | Language::TypeScript => StructureBucket::Web,
        Language::Java | Language::Python => {
            if is_test_path(&record.path) {
                StructureBucket::Test
            } else {
                StructureBucket::Backend
            }
        }
        Language::Sql => StructureBucket::Database,
        Language::Config | Language::Markdown | Language::Unknown => {
            let lower = record.path.to_lowercase();
            if record.language == Language::Markdown || lower.ends_with(".md") {
                StructureBucket::Documentation
            } else if lower.contains("config") {
                StructureBucket::Config
            } else if is_test_path(&record.path) {
                StructureBucket::Test
            } else {
                StructureBucket::Config
            }
        }
    }
}

/// Test or spec marker in any path segment (`tests/`, `test_x.py`,
/// `x_test.py`, `FooTest.java`, `spec/`, `app.spec.js`).
pub fn is_test_path(path: &str) -> bool {
    path.split('/').any(|segment| {
        let stem = segment.split('.').next().unwrap_or(segment);
        let lower = stem.to_lowercase();
        matches!(lower.as_str(), "test" | "tests" | "spec" | "specs")
            || lower.starts_with("test_")
            || lower.ends_with("_test")
            || lower.ends_with("_tests")
            || stem.ends_with("Test")
            || stem.ends_with("Tests")
            || segment.contains(".spec.")
            || segment.contains(".test.")
    })
}
