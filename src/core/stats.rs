use petgraph::algo::{connected_components, kosaraju_scc};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use super::graph::DependencyGraph;

const TOP_N: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GraphComplexity {
    Low,
    Medium,
    High,
}

impl GraphComplexity {
    pub fn from_density(density: f64) -> Self {
        if density > 0.5 {
            GraphComplexity::High
        } else if density > 0.2 {
            GraphComplexity::Medium
        } else {
            GraphComplexity::Low
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CentralityEntry {
    pub path: String,
    pub centrality: f64,
}

/// Aggregate figures of a [`DependencyGraph`]; a pure function of the graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphStatistics {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub density: f64,
    pub is_connected: bool,
    pub strongly_connected_components: usize,
    pub average_degree: f64,
    /// Highest in-degree centrality: the files others rely on most.
    ///
    /// Ranked by incoming edges so the list matches its name. Reports that
    /// ranked this list by out-degree (and `most_dependent` by in-degree)
    /// read the two lists swapped.
    pub most_depended_upon: Vec<CentralityEntry>,
    /// Highest out-degree centrality: the files relying on the most others.
    /// Ranked by outgoing edges.
    pub most_dependent: Vec<CentralityEntry>,
    pub complexity: GraphComplexity,
}

impl GraphStatistics {
    pub fn empty() -> Self {
        Self {
            total_nodes: 0,
            total_edges: 0,
            density: 0.0,
            is_connected: false,
            strongly_connected_components: 0,
            average_degree: 0.0,
            most_depended_upon: Vec::new(),
            most_dependent: Vec::new(),
            complexity: GraphComplexity::Low,
        }
    }
}

impl Default for GraphStatistics {
    fn default() -> Self {
        Self::empty()
    }
}

pub fn statistics(graph: &DependencyGraph) -> GraphStatistics {
    let nodes = graph.node_count();
    if nodes == 0 {
        return GraphStatistics::empty();
    }
    let edges = graph.edge_count();

    let density = if nodes > 1 {
        edges as f64 / (nodes as f64 * (nodes as f64 - 1.0))
    } else {
        0.0
    };
    let is_connected = nodes == 1 || connected_components(graph) == 1;
    let strongly_connected_components = kosaraju_scc(graph).len();
    // Every edge adds one to an out-degree and one to an in-degree.
    let average_degree = (2 * edges) as f64 / nodes as f64;

    GraphStatistics {
        total_nodes: nodes,
        total_edges: edges,
        density: round_to(density, 4),
        is_connected,
        strongly_connected_components,
        average_degree: round_to(average_degree, 2),
        most_depended_upon: top_by_degree(graph, Direction::Incoming),
        most_dependent: top_by_degree(graph, Direction::Outgoing),
        complexity: GraphComplexity::from_density(density),
    }
}

/// Top nodes by degree centrality (degree / (n - 1)), zero entries dropped,
/// ties broken by path.
fn top_by_degree(graph: &DependencyGraph, direction: Direction) -> Vec<CentralityEntry> {
    let nodes = graph.node_count();
    if nodes <= 1 {
        return Vec::new();
    }
    let scale = 1.0 / (nodes as f64 - 1.0);

    let mut ranked: Vec<CentralityEntry> = graph
        .node_indices()
        .map(|idx| CentralityEntry {
            path: graph[idx].path.clone(),
            centrality: graph.edges_directed(idx, direction).count() as f64 * scale,
        })
        .filter(|entry| entry.centrality > 0.0)
        .collect();

    ranked.sort_by(|a, b| {
        b.centrality
            .total_cmp(&a.centrality)
            .then_with(|| a.path.cmp(&b.path))
    });
    ranked.truncate(TOP_N);
    ranked
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
