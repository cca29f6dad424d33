use anyhow::Result;
use std::path::Path;
use tracing::info;

use super::graph::{DependencyGraph, GraphBuilder};
use super::resolver::DependencyResolver;
use super::scanner::{CodebaseMetadata, CodebaseScanner};
use super::stats::{statistics, GraphStatistics};
use crate::config::AnalyzerConfig;

/// Everything one run produces.
pub struct Analysis {
    pub metadata: CodebaseMetadata,
    pub graph: DependencyGraph,
    pub statistics: GraphStatistics,
}

/// Runs scan, resolution and statistics as one batch over a source tree.
pub struct CodebaseAnalyzer {
    scanner: CodebaseScanner,
    graph_builder: GraphBuilder,
}

impl CodebaseAnalyzer {
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        let scanner = CodebaseScanner::new(config);
        let resolver = DependencyResolver::new(scanner.classifier().dotted_extensions());
        Self {
            scanner,
            graph_builder: GraphBuilder::with_resolver(resolver),
        }
    }

    pub fn analyze(&mut self, root_path: &Path) -> Result<Analysis> {
        info!("Scanning {}", root_path.display());
        let metadata = self.scanner.scan(root_path)?;

        info!(
            "Resolving dependencies across {} files",
            metadata.total_files
        );
        let graph = self.graph_builder.build_from(&metadata.files).clone();

        let statistics = statistics(&graph);
        info!(
            "Graph: {} nodes, {} edges, density {}",
            statistics.total_nodes, statistics.total_edges, statistics.density
        );

        Ok(Analysis {
            metadata,
            graph,
            statistics,
        })
    }
}

impl Default for CodebaseAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
