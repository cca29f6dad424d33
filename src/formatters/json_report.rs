use anyhow::{Context, Result};
use petgraph::visit::EdgeRef;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

use crate::core::{Analysis, DependencyGraph};

/// JSON report of one run for the documentation and visualization layers.
pub struct JsonReportFormatter {
    /// Include per-file records, not only aggregates and edges.
    include_files: bool,
    pretty: bool,
}

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self {
            include_files: true,
            pretty: true,
        }
    }

    pub fn with_files(mut self, include_files: bool) -> Self {
        self.include_files = include_files;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn format_to_file(&self, analysis: &Analysis, output_path: &Path) -> Result<()> {
        let content = self.format(analysis)?;
        fs::write(output_path, content)
            .with_context(|| format!("failed to write report {}", output_path.display()))?;
        Ok(())
    }

    pub fn format(&self, analysis: &Analysis) -> Result<String> {
        let metadata = &analysis.metadata;
        let mut output = json!({
            "meta": {
                "total_files": metadata.total_files,
                "total_lines": metadata.total_lines,
                "nodes": analysis.graph.node_count(),
                "edges": analysis.graph.edge_count(),
            },
            "language_stats": metadata.language_stats,
            "project_structure": metadata.project_structure,
            "edges": self.edges(&analysis.graph),
            "statistics": analysis.statistics,
        });
        if self.include_files {
            output["files"] = serde_json::to_value(&metadata.files)?;
        }

        let text = if self.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        Ok(text)
    }

    fn edges(&self, graph: &DependencyGraph) -> Vec<Value> {
        graph
            .edge_references()
            .map(|edge_ref| {
                let edge = edge_ref.weight();
                let source = &graph[edge_ref.source()].path;
                let target = &graph[edge_ref.target()].path;
                json!({
                    "source": source,
                    "target": target,
                    "kind": edge.kind,
                    "name": edge.raw_name,
                    "line": edge.line,
                    "strategy": edge.strategy,
                })
            })
            .collect()
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
