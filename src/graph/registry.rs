//! Graph registry: the main graph plus one graph per extended foreign module.
//!
//! Graphs live in a single arena owned by the registry; [`GraphId`] handles
//! index it. Extension graphs are created on first use and keyed by module
//! name, so a native module and its foreign representation share one graph.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::base::{GraphId, ModuleId, Name};
use crate::tree::DeclTree;

use super::SymbolGraph;

/// All graphs produced by one walk.
#[derive(Clone, Debug)]
pub struct GraphRegistry {
    /// Index 0 is the main graph.
    graphs: Vec<SymbolGraph>,
    by_module: FxHashMap<Name, GraphId>,
}

impl GraphRegistry {
    /// Create a registry whose main graph is bound to `module`.
    pub fn new(
        module: ModuleId,
        declaring_module: Option<ModuleId>,
        emit_extension_block_symbols: bool,
    ) -> Self {
        let main = SymbolGraph::new(GraphId::MAIN, module, None, emit_extension_block_symbols)
            .with_declaring_module(declaring_module);
        Self {
            graphs: vec![main],
            by_module: FxHashMap::default(),
        }
    }

    pub fn main(&self) -> &SymbolGraph {
        &self.graphs[GraphId::MAIN.index()]
    }

    /// Get a graph. The handle must come from this registry.
    pub fn graph(&self, id: GraphId) -> &SymbolGraph {
        &self.graphs[id.index()]
    }

    pub fn graph_mut(&mut self, id: GraphId) -> &mut SymbolGraph {
        &mut self.graphs[id.index()]
    }

    /// Look up the extension graph for a module name.
    pub fn extension_graph(&self, module_name: &str) -> Option<&SymbolGraph> {
        self.by_module
            .get(module_name)
            .map(|&id| &self.graphs[id.index()])
    }

    pub fn extension_graph_id(&self, module_name: &str) -> Option<GraphId> {
        self.by_module.get(module_name).copied()
    }

    /// Get the extension graph for `module`, creating it on first use.
    pub fn get_or_create_extension_graph(&mut self, tree: &DeclTree, module: ModuleId) -> GraphId {
        let name = &tree.module(module).name;
        if let Some(&id) = self.by_module.get(name) {
            return id;
        }

        let id = GraphId::new(self.graphs.len() as u32);
        let main = self.main();
        let graph = SymbolGraph::new(
            id,
            main.module(),
            Some(module),
            main.emits_extension_block_symbols(),
        );
        debug!(module = %name, graph = id.index(), "created extension graph");

        self.graphs.push(graph);
        self.by_module.insert(name.clone(), id);
        id
    }

    /// All graphs, main graph first, then extension graphs in creation order.
    pub fn graphs(&self) -> impl Iterator<Item = &SymbolGraph> {
        self.graphs.iter()
    }

    pub fn extension_graphs(&self) -> impl Iterator<Item = &SymbolGraph> {
        self.graphs.iter().skip(1)
    }

    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    pub fn extension_graph_count(&self) -> usize {
        self.graphs.len() - 1
    }
}
