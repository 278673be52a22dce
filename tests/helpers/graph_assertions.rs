//! Graph assertion helpers.

use symgraph::{DeclId, Edge, GraphId, RelationshipKind, Symbol, SymbolGraph};

/// Declarations of all plain (non-synthesized) nodes, sorted.
pub fn node_decls(graph: &SymbolGraph) -> Vec<DeclId> {
    let mut decls: Vec<_> = graph
        .nodes()
        .filter(|symbol| !symbol.is_synthesized())
        .map(|symbol| symbol.decl)
        .collect();
    decls.sort();
    decls
}

pub fn edges_of_kind(graph: &SymbolGraph, kind: RelationshipKind) -> Vec<Edge> {
    graph.edges_of_kind(kind).copied().collect()
}

/// Assert the graph holds an edge between two plain symbols.
pub fn assert_edge(
    graph: &SymbolGraph,
    source: (GraphId, DeclId),
    target: (GraphId, DeclId),
    kind: RelationshipKind,
) {
    let source = Symbol::new(source.0, source.1);
    let target = Symbol::new(target.0, target.1);
    assert!(
        graph.contains_edge(source, target, kind),
        "Expected {:?} edge {:?} -> {:?}, graph has {:?}",
        kind,
        source,
        target,
        graph.edges().collect::<Vec<_>>()
    );
}

pub fn sorted(mut decls: Vec<DeclId>) -> Vec<DeclId> {
    decls.sort();
    decls
}
