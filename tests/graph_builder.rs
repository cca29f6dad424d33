use archgraph::core::{
    statistics, DependencyEdge, Extraction, FileNode, FileRecord, GraphBuilder, GraphComplexity,
    Language, ReferenceKind, ResolutionStrategy,
};
use petgraph::visit::EdgeRef;

fn python(path: &str, imports: &[&str]) -> FileRecord {
    let mut extraction = Extraction::default();
    for (i, name) in imports.iter().enumerate() {
        extraction.imports.push(name.to_string());
        extraction.add_dependency(ReferenceKind::Import, *name, i + 1);
    }
    FileRecord::new(path.to_string(), Language::Python, "x = 1\n", extraction)
}

fn edge_list(builder: &GraphBuilder) -> Vec<(String, String, ReferenceKind)> {
    let graph = builder.graph();
    let mut edges: Vec<_> = graph
        .edge_references()
        .map(|e| {
            (
                graph[e.source()].path.clone(),
                graph[e.target()].path.clone(),
                e.weight().kind,
            )
        })
        .collect();
    edges.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
    edges
}

fn edge(raw_name: &str) -> DependencyEdge {
    DependencyEdge {
        kind: ReferenceKind::Import,
        raw_name: raw_name.to_string(),
        line: 1,
        strategy: ResolutionStrategy::Exact,
    }
}

#[test]
fn graph_builder_adds_nodes_and_edges() {
    let mut builder = GraphBuilder::new();
    let a = builder.add_node(FileNode::from_record(&python("a.py", &[])));
    let b = builder.add_node(FileNode::from_record(&python("b.py", &[])));

    // Same path again maps to the existing node.
    let again = FileNode::from_record(&python("a.py", &[]));
    assert_eq!(builder.add_node(again), a);

    assert!(builder.add_edge("a.py", "b.py", edge("b")).is_some());
    assert!(builder.add_edge("a.py", "b.py", edge("b")).is_some());
    assert!(builder.add_edge("a.py", "a.py", edge("a")).is_none());
    let missing = edge("missing");
    assert!(builder.add_edge("a.py", "missing.py", missing).is_none());
    assert!(builder.add_edge("missing.py", "b.py", edge("b")).is_none());

    assert_eq!(builder.get_node_index("b.py"), Some(b));
    let graph = builder.build();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn build_from_resolves_references_without_self_loops() {
    let files = vec![
        python("a.py", &["b", "a", "os"]),
        python("b.py", &["c"]),
        python("c.py", &[]),
    ];
    let mut builder = GraphBuilder::new();
    builder.build_from(&files);

    assert_eq!(
        edge_list(&builder),
        vec![
            ("a.py".to_string(), "b.py".to_string(), ReferenceKind::Import),
            ("b.py".to_string(), "c.py".to_string(), ReferenceKind::Import),
        ]
    );
    let graph = builder.graph();
    assert!(graph.edge_references().all(|e| e.source() != e.target()));
    assert!(graph
        .edge_weights()
        .all(|w| w.strategy == ResolutionStrategy::Exact));
}

#[test]
fn build_from_is_idempotent() {
    let files = vec![
        python("a.py", &["b"]),
        python("b.py", &["a"]),
        python("c.py", &["b"]),
    ];
    let mut builder = GraphBuilder::new();

    builder.build_from(&files);
    let first_nodes = builder.graph().node_count();
    let first_edges = edge_list(&builder);

    builder.build_from(&files);
    assert_eq!(builder.graph().node_count(), first_nodes);
    assert_eq!(edge_list(&builder), first_edges);
    assert_eq!(first_edges.len(), 3);
}

#[test]
fn statistics_of_empty_graph() {
    let graph = archgraph::build(&[]);
    let stats = statistics(&graph);

    assert_eq!(stats.total_nodes, 0);
    assert_eq!(stats.total_edges, 0);
    assert_eq!(stats.density, 0.0);
    assert!(!stats.is_connected);
    assert_eq!(stats.strongly_connected_components, 0);
    assert!(stats.most_depended_upon.is_empty());
    assert!(stats.most_dependent.is_empty());
    assert_eq!(stats.complexity, GraphComplexity::Low);
}

#[test]
fn statistics_of_single_node() {
    let graph = archgraph::build(&[python("a.py", &[])]);
    let stats = statistics(&graph);

    assert_eq!(stats.total_nodes, 1);
    assert_eq!(stats.density, 0.0);
    assert!(stats.is_connected);
    assert_eq!(stats.strongly_connected_components, 1);
    assert!(stats.most_depended_upon.is_empty());
}

#[test]
fn statistics_of_one_dependency() {
    let graph = archgraph::build(&[python("a.py", &["b"]), python("b.py", &[])]);
    let stats = statistics(&graph);

    assert_eq!(stats.total_nodes, 2);
    assert_eq!(stats.total_edges, 1);
    assert_eq!(stats.density, 0.5);
    assert!(stats.is_connected);
    assert_eq!(stats.strongly_connected_components, 2);
    assert_eq!(stats.average_degree, 1.0);
    assert_eq!(stats.complexity, GraphComplexity::Medium);

    assert_eq!(stats.most_depended_upon.len(), 1);
    assert_eq!(stats.most_depended_upon[0].path, "b.py");
    assert_eq!(stats.most_depended_upon[0].centrality, 1.0);
    assert_eq!(stats.most_dependent.len(), 1);
    assert_eq!(stats.most_dependent[0].path, "a.py");
}

#[test]
fn statistics_of_cycle_and_isolated_node() {
    let graph = archgraph::build(&[
        python("a.py", &["b"]),
        python("b.py", &["a"]),
        python("c.py", &[]),
    ]);
    let stats = statistics(&graph);

    assert_eq!(stats.total_edges, 2);
    assert!(!stats.is_connected);
    assert_eq!(stats.strongly_connected_components, 2);
    assert_eq!(stats.density, 0.3333);
    assert_eq!(stats.average_degree, 1.33);
    assert_eq!(stats.complexity, GraphComplexity::Medium);

    let upon: Vec<&str> = stats
        .most_depended_upon
        .iter()
        .map(|e| e.path.as_str())
        .collect();
    assert_eq!(upon, vec!["a.py", "b.py"]);
    assert_eq!(stats.most_depended_upon[0].centrality, 0.5);
}
