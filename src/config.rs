//! Static scan configuration: the ignore set and the extension table.
//!
//! Both are part of the scan contract. A TOML file only needs to name the
//! keys it overrides:
//!
//! ```toml
//! ignore_dirs = ["node_modules", "vendor"]
//! skip_hidden = false
//!
//! [extensions]
//! py = "python"
//! jspx = "jsp"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::core::language::{default_extension_table, Language};

const DEFAULT_IGNORE_DIRS: &[&str] = &[
    "node_modules",
    "__pycache__",
    ".git",
    ".svn",
    ".hg",
    ".venv",
    "venv",
    "env",
    ".env",
    "dist",
    "build",
    ".next",
    ".nuxt",
    "coverage",
    ".coverage",
    "target",
    "bin",
    "obj",
    ".gradle",
    ".idea",
    ".vscode",
    ".tox",
    ".mypy_cache",
    ".pytest_cache",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Directory names pruned before the walker descends into them.
    pub ignore_dirs: BTreeSet<String>,
    /// Skip every directory and file whose name starts with a dot.
    pub skip_hidden: bool,
    pub follow_links: bool,
    /// Lower-case extension (no dot) to language.
    pub extensions: BTreeMap<String, Language>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|d| d.to_string()).collect(),
            skip_hidden: true,
            follow_links: false,
            extensions: default_extension_table(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("invalid analyzer config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("failed to load config file {}", path.display()))
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_dirs.contains(name) || self.is_hidden(name)
    }

    /// Dot-prefixed names are hidden only while `skip_hidden` is set.
    pub fn is_hidden(&self, name: &str) -> bool {
        self.skip_hidden && name.starts_with('.')
    }
}
