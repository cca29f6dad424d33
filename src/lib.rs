//! # ARCHGRAPH
//!
//! Structural scan and cross-file dependency graph for mixed-language
//! source trees.
//!
//! A run is a single batch: the scanner walks the tree and produces one
//! [`FileRecord`](core::FileRecord) per supported file, carrying functions,
//! classes and raw dependency references. The resolver then maps every
//! reference onto files of the same run (exact, relative, symbol and fuzzy
//! strategies, in that order) and the graph builder turns the matches into a
//! directed multigraph with summary statistics.
//!
//! ## Supported Languages
//!
//! Python (tree-sitter AST), JavaScript, TypeScript, Java, JSP, HTML, CSS,
//! SQL; config and documentation files are counted but not parsed.

pub mod config;
pub mod core;
pub mod formatters;
pub mod parsers;

pub use crate::config::AnalyzerConfig;
pub use crate::core::{build, statistics, CodebaseAnalyzer, CodebaseScanner};
