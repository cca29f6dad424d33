use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::{Directed, Graph};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use super::language::Language;
use super::record::{FileRecord, ReferenceKind};
use super::resolver::{DependencyResolver, FileIndex, ResolutionStrategy};

/// Reporting attributes of one file node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileNode {
    pub path: String,
    pub language: Language,
    pub size: usize,
    pub lines: usize,
    pub functions: usize,
    pub classes: usize,
}

impl FileNode {
    pub fn from_record(record: &FileRecord) -> Self {
        Self {
            path: record.path.clone(),
            language: record.language,
            size: record.size,
            lines: record.lines,
            functions: record.functions().len(),
            classes: record.classes().len(),
        }
    }
}

/// A resolved reference from the source file to the target file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependencyEdge {
    pub kind: ReferenceKind,
    pub raw_name: String,
    pub line: usize,
    pub strategy: ResolutionStrategy,
}

/// Directed multigraph of files; parallel edges and cycles are allowed,
/// self-loops are not.
pub type DependencyGraph = Graph<FileNode, DependencyEdge, Directed>;

pub struct GraphBuilder {
    graph: DependencyGraph,
    node_map: HashMap<String, NodeIndex>,
    resolver: DependencyResolver,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::with_resolver(DependencyResolver::default())
    }

    pub fn with_resolver(resolver: DependencyResolver) -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
            resolver,
        }
    }

    /// Adds a node, or returns the existing one for the same path.
    pub fn add_node(&mut self, node: FileNode) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&node.path) {
            return index;
        }
        let path = node.path.clone();
        let index = self.graph.add_node(node);
        self.node_map.insert(path, index);
        index
    }

    /// `None` when either endpoint is unknown or the edge would be a
    /// self-loop.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        edge: DependencyEdge,
    ) -> Option<EdgeIndex> {
        let source_idx = *self.node_map.get(source)?;
        let target_idx = *self.node_map.get(target)?;
        if source_idx == target_idx {
            return None;
        }
        Some(self.graph.add_edge(source_idx, target_idx, edge))
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.node_map.clear();
    }

    /// Rebuild the graph from `files`, discarding anything added before.
    pub fn build_from(&mut self, files: &[FileRecord]) -> &DependencyGraph {
        self.clear();

        for record in files {
            self.add_node(FileNode::from_record(record));
        }

        // The index covers every record before the first reference is resolved.
        let index = FileIndex::build(files);
        let resolver = &self.resolver;
        let resolved: Vec<(usize, String, DependencyEdge)> = files
            .par_iter()
            .enumerate()
            .flat_map_iter(|(file_idx, record)| {
                let index = &index;
                record.dependencies().iter().flat_map(move |reference| {
                    let (strategy, targets) = resolver
                        .resolve_with_strategy(reference, &record.path, index)
                        .unwrap_or((ResolutionStrategy::Exact, Vec::new()));
                    if targets.is_empty() {
                        debug!(
                            "{}:{} unresolved {} '{}'",
                            record.path,
                            reference.line,
                            reference.kind.as_str(),
                            reference.raw_name
                        );
                    }
                    targets.into_iter().map(move |target| {
                        let edge = DependencyEdge {
                            kind: reference.kind,
                            raw_name: reference.raw_name.clone(),
                            line: reference.line,
                            strategy,
                        };
                        (file_idx, target, edge)
                    })
                })
            })
            .collect();

        let mut added = 0usize;
        for (file_idx, target, edge) in resolved {
            let source = &files[file_idx].path;
            if self.add_edge(source, &target, edge).is_some() {
                added += 1;
            }
        }
        info!(
            "Built dependency graph: {} nodes, {} edges",
            self.graph.node_count(),
            added
        );

        &self.graph
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn get_node_index(&self, path: &str) -> Option<NodeIndex> {
        self.node_map.get(path).copied()
    }

    pub fn build(self) -> DependencyGraph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the dependency graph of `files` with the default resolver.
pub fn build(files: &[FileRecord]) -> DependencyGraph {
    let mut builder = GraphBuilder::new();
    builder.build_from(files);
    builder.build()
}
