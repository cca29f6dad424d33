use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::language::Language;
use super::record::{FileRecord, Reference};
use crate::parsers::common::{base_name, join_path, normalize_path, parent_dir, strip_extension};

/// Resolution strategies in the order they are tried.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStrategy {
    Exact,
    Relative,
    Symbol,
    Fuzzy,
}

/// Lookup table from path, file name and stem to the records of one run.
///
/// Built once from the complete record set before any resolution starts, so
/// files discovered late are still valid targets.
pub struct FileIndex<'a> {
    files: &'a [FileRecord],
    by_path: HashMap<&'a str, usize>,
    by_name: HashMap<&'a str, Vec<usize>>,
    by_stem: HashMap<&'a str, Vec<usize>>,
    /// Lower-cased stems, parallel to `files`, for fuzzy matching.
    fuzzy_keys: Vec<String>,
}

impl<'a> FileIndex<'a> {
    pub fn build(files: &'a [FileRecord]) -> Self {
        let mut by_path = HashMap::with_capacity(files.len());
        let mut by_name: HashMap<&'a str, Vec<usize>> = HashMap::with_capacity(files.len());
        let mut by_stem: HashMap<&'a str, Vec<usize>> = HashMap::with_capacity(files.len());
        let mut fuzzy_keys = Vec::with_capacity(files.len());

        for (idx, record) in files.iter().enumerate() {
            let name = record.file_name();
            let stem = strip_extension(name);
            by_path.insert(record.path.as_str(), idx);
            by_name.entry(name).or_default().push(idx);
            by_stem.entry(stem).or_default().push(idx);
            fuzzy_keys.push(stem.to_lowercase());
        }

        Self {
            files,
            by_path,
            by_name,
            by_stem,
            fuzzy_keys,
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &'a [FileRecord] {
        self.files
    }

    pub fn get(&self, path: &str) -> Option<&'a FileRecord> {
        self.by_path.get(path).map(|&idx| &self.files[idx])
    }

    /// Full path first, then every file with that name, then every file with
    /// that stem.
    pub fn lookup(&self, key: &str) -> Vec<usize> {
        if let Some(&idx) = self.by_path.get(key) {
            return vec![idx];
        }
        if let Some(owners) = self.by_name.get(key) {
            return owners.clone();
        }
        self.by_stem.get(key).cloned().unwrap_or_default()
    }
}

/// Turns [`Reference`]s into target file paths.
#[derive(Debug, Clone)]
pub struct DependencyResolver {
    /// Dotted extensions appended while probing, e.g. `.py`.
    probe_extensions: Vec<String>,
}

impl DependencyResolver {
    pub fn new(probe_extensions: Vec<String>) -> Self {
        Self { probe_extensions }
    }

    /// Target paths for `reference`, never including `source_path`. Empty
    /// when nothing matches.
    pub fn resolve(
        &self,
        reference: &Reference,
        source_path: &str,
        index: &FileIndex,
    ) -> Vec<String> {
        self.resolve_with_strategy(reference, source_path, index)
            .map(|(_, targets)| targets)
            .unwrap_or_default()
    }

    /// Like [`resolve`](Self::resolve), also reporting the strategy that
    /// matched. The first strategy with any hit wins even when its only hit is
    /// the source file itself.
    pub fn resolve_with_strategy(
        &self,
        reference: &Reference,
        source_path: &str,
        index: &FileIndex,
    ) -> Option<(ResolutionStrategy, Vec<String>)> {
        let name = reference.raw_name.trim();
        if name.is_empty() {
            return None;
        }

        let (strategy, hits) = [
            ResolutionStrategy::Exact,
            ResolutionStrategy::Relative,
            ResolutionStrategy::Symbol,
            ResolutionStrategy::Fuzzy,
        ]
        .into_iter()
        .map(|strategy| (strategy, self.run_strategy(strategy, name, source_path, index)))
        .find(|(_, hits)| !hits.is_empty())?;

        let mut targets: Vec<String> = Vec::with_capacity(hits.len());
        for idx in hits {
            let path = &index.files[idx].path;
            if path != source_path && !targets.contains(path) {
                targets.push(path.clone());
            }
        }
        Some((strategy, targets))
    }

    fn run_strategy(
        &self,
        strategy: ResolutionStrategy,
        name: &str,
        source_path: &str,
        index: &FileIndex,
    ) -> Vec<usize> {
        match strategy {
            ResolutionStrategy::Exact => index.lookup(name),
            ResolutionStrategy::Relative => self.probe_relative(name, source_path, index),
            ResolutionStrategy::Symbol => Self::lookup_symbol(name, index),
            ResolutionStrategy::Fuzzy => Self::fuzzy_match(name, index),
        }
    }

    fn probe_relative(&self, name: &str, source_path: &str, index: &FileIndex) -> Vec<usize> {
        let dir = parent_dir(source_path);
        let joined = join_path(dir, name);

        let mut candidates = vec![name.to_string(), joined.clone()];
        for ext in &self.probe_extensions {
            candidates.push(format!("{joined}{ext}"));
        }
        for ext in &self.probe_extensions {
            candidates.push(format!("{name}{ext}"));
        }

        let mut hits = Vec::new();
        for candidate in candidates {
            for idx in index.lookup(&normalize_path(&candidate)) {
                if !hits.contains(&idx) {
                    hits.push(idx);
                }
            }
        }
        hits
    }

    /// `com.acme.Order` or `models/Order` to the Java files declaring a class
    /// named `Order`.
    fn lookup_symbol(name: &str, index: &FileIndex) -> Vec<usize> {
        if !name.contains(['.', '/']) {
            return Vec::new();
        }
        let symbol = name.rsplit(['.', '/']).next().unwrap_or(name);
        if symbol.is_empty() {
            return Vec::new();
        }

        index
            .files
            .iter()
            .enumerate()
            .filter(|(_, record)| record.language == Language::Java)
            .filter(|(_, record)| record.classes().iter().any(|c| c.name == symbol))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Lower-cased stems where either contains the other.
    fn fuzzy_match(name: &str, index: &FileIndex) -> Vec<usize> {
        let wanted = strip_extension(base_name(name)).to_lowercase();
        if wanted.is_empty() {
            return Vec::new();
        }

        index
            .fuzzy_keys
            .iter()
            .enumerate()
            .filter(|(_, key)| {
                !key.is_empty() && (key.contains(&wanted) || wanted.contains(key.as_str()))
            })
            .map(|(idx, _)| idx)
            .collect()
    }
}

impl Default for DependencyResolver {
    fn default() -> Self {
        let classifier = super::language::LanguageClassifier::default();
        Self::new(classifier.dotted_extensions())
    }
}
