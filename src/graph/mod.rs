//! Symbol graphs: the nodes and relationships extracted from a module.
//!
//! A [`SymbolGraph`] belongs to exactly one module identity: the module under
//! inspection, or one foreign module whose types the inspected module extends.
//! The [`GraphRegistry`] owns all graphs of one walk.
//!
//! ## Key Types
//!
//! - [`Symbol`] - (graph, declaration, synthesizing type) identity
//! - [`Edge`] - (source, target, kind) identity
//! - [`SymbolGraph`] - Deduplicated node and edge sets
//! - [`GraphRegistry`] - Main graph plus lazily created extension graphs
//! - [`VisibilityPolicy`] - Decides which declarations are part of the public surface

mod policy;
mod registry;

pub use policy::{AccessPolicy, VisibilityPolicy};
pub use registry::GraphRegistry;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashSet;

use crate::base::{DeclId, GraphId, ModuleId, Name, TargetPlatform};
use crate::error::{ExtractError, Result};
use crate::tree::{DeclContext, DeclKind, DeclTree, TypeExpr, TypeShape};

// ============================================================================
// SYMBOLS AND EDGES
// ============================================================================

/// A documentable symbol.
///
/// The same declaration can appear as a plain symbol and as a synthesized one
/// (a default implementation injected into a conforming type), so identity
/// includes the synthesizing type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub graph: GraphId,
    pub decl: DeclId,
    /// The type this symbol was synthesized onto, if any.
    pub synthesized_for: Option<DeclId>,
}

impl Symbol {
    pub fn new(graph: GraphId, decl: DeclId) -> Self {
        Self {
            graph,
            decl,
            synthesized_for: None,
        }
    }

    pub fn synthesized(graph: GraphId, decl: DeclId, base: DeclId) -> Self {
        Self {
            graph,
            decl,
            synthesized_for: Some(base),
        }
    }

    pub fn is_synthesized(&self) -> bool {
        self.synthesized_for.is_some()
    }
}

/// The kind of relationship between two symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    /// Extension symbol → extended type.
    ExtensionTo,
    /// Type or extension → interface it conforms to.
    ConformsTo,
    /// Member → enclosing type (or extension symbol).
    MemberOf,
    /// Class → superclass, interface → inherited interface.
    InheritsFrom,
}

impl RelationshipKind {
    /// Stable label used when exporting.
    pub fn label(&self) -> &'static str {
        match self {
            RelationshipKind::ExtensionTo => "extensionTo",
            RelationshipKind::ConformsTo => "conformsTo",
            RelationshipKind::MemberOf => "memberOf",
            RelationshipKind::InheritsFrom => "inheritsFrom",
        }
    }
}

/// A directed relationship. Identity is the full triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: Symbol,
    pub target: Symbol,
    pub kind: RelationshipKind,
}

// ============================================================================
// SYMBOL GRAPH
// ============================================================================

/// Nodes and edges owned by one module identity.
#[derive(Clone, Debug)]
pub struct SymbolGraph {
    id: GraphId,
    /// The module under inspection.
    module: ModuleId,
    /// The foreign module this graph collects extensions for.
    extended_module: Option<ModuleId>,
    /// The module a cross-import overlay declares itself as extending.
    declaring_module: Option<ModuleId>,
    emit_extension_block_symbols: bool,
    nodes: IndexSet<Symbol>,
    /// Edge -> extension that introduced the conformance, if any.
    edges: IndexMap<Edge, Option<DeclId>>,
}

impl SymbolGraph {
    pub fn new(
        id: GraphId,
        module: ModuleId,
        extended_module: Option<ModuleId>,
        emit_extension_block_symbols: bool,
    ) -> Self {
        Self {
            id,
            module,
            extended_module,
            declaring_module: None,
            emit_extension_block_symbols,
            nodes: IndexSet::new(),
            edges: IndexMap::new(),
        }
    }

    pub fn with_declaring_module(mut self, declaring_module: Option<ModuleId>) -> Self {
        self.declaring_module = declaring_module;
        self
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn module(&self) -> ModuleId {
        self.module
    }

    pub fn extended_module(&self) -> Option<ModuleId> {
        self.extended_module
    }

    pub fn declaring_module(&self) -> Option<ModuleId> {
        self.declaring_module
    }

    pub fn emits_extension_block_symbols(&self) -> bool {
        self.emit_extension_block_symbols
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Symbol> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.keys()
    }

    pub fn edges_of_kind(&self, kind: RelationshipKind) -> impl Iterator<Item = &Edge> {
        self.edges.keys().filter(move |edge| edge.kind == kind)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn contains_node(&self, symbol: &Symbol) -> bool {
        self.nodes.contains(symbol)
    }

    /// Returns true if the graph holds a plain (non-synthesized) node for `decl`.
    pub fn contains_decl(&self, decl: DeclId) -> bool {
        self.nodes.contains(&Symbol::new(self.id, decl))
    }

    pub fn contains_edge(&self, source: Symbol, target: Symbol, kind: RelationshipKind) -> bool {
        self.edges.contains_key(&Edge {
            source,
            target,
            kind,
        })
    }

    /// The extension that introduced a recorded edge, if any.
    pub fn conformance_extension(&self, edge: &Edge) -> Option<DeclId> {
        self.edges.get(edge).copied().flatten()
    }

    /// Record an edge. Recording an existing triple is a no-op and keeps the
    /// first conformance extension.
    pub fn record_edge(
        &mut self,
        source: Symbol,
        target: Symbol,
        kind: RelationshipKind,
        conformance_extension: Option<DeclId>,
    ) -> bool {
        let edge = Edge {
            source,
            target,
            kind,
        };
        if self.edges.contains_key(&edge) {
            return false;
        }
        self.edges.insert(edge, conformance_extension);
        true
    }

    /// Record a node along with the relationships it implies on its own.
    ///
    /// Members get a `memberOf` edge to their enclosing type. Nominal types
    /// get edges for the supertypes and interfaces they state. Returns false
    /// if the node was already present, in which case nothing is recorded.
    pub fn record_node(&mut self, tree: &DeclTree, symbol: Symbol) -> Result<bool> {
        if !self.nodes.insert(symbol) {
            return Ok(false);
        }
        if symbol.is_synthesized() {
            return Ok(true);
        }

        self.record_member_relationship(tree, symbol);
        if tree.decl(symbol.decl).kind.is_nominal() {
            self.record_stated_relationships(tree, symbol)?;
        }
        Ok(true)
    }

    fn record_member_relationship(&mut self, tree: &DeclTree, symbol: Symbol) {
        let decl = tree.decl(symbol.decl);
        if !decl.kind.is_value() {
            return;
        }
        let DeclContext::Decl(parent) = decl.parent else {
            return;
        };

        let target = match tree.decl(parent).kind {
            kind if kind.is_nominal() => parent,
            DeclKind::Extension {
                extended: Some(nominal),
            } => {
                let ext_module = &tree.module(tree.module_of(parent)).name;
                let nominal_module = &tree.module(tree.module_of(nominal)).name;
                if self.emit_extension_block_symbols && ext_module != nominal_module {
                    parent
                } else {
                    nominal
                }
            }
            _ => return,
        };

        self.record_edge(
            symbol,
            Symbol::new(self.id, target),
            RelationshipKind::MemberOf,
            None,
        );
    }

    fn record_stated_relationships(&mut self, tree: &DeclTree, symbol: Symbol) -> Result<()> {
        let decl = tree.decl(symbol.decl);
        let is_protocol = decl.kind == DeclKind::Protocol;
        let mut pending: Vec<&TypeExpr> = decl.inherited.iter().rev().collect();

        while let Some(ty) = pending.pop() {
            let (target, kind) = match tree.classify(ty)? {
                TypeShape::Interface(proto) if is_protocol => {
                    (proto, RelationshipKind::InheritsFrom)
                }
                TypeShape::Interface(proto) => (proto, RelationshipKind::ConformsTo),
                TypeShape::Nominal(base)
                    if decl.kind == DeclKind::Class && tree.decl(base).kind == DeclKind::Class =>
                {
                    (base, RelationshipKind::InheritsFrom)
                }
                TypeShape::Composition(members) => {
                    pending.extend(members.iter().rev());
                    continue;
                }
                // Raw values, structural and unresolved entries carry no edge.
                TypeShape::Nominal(_) | TypeShape::Structural(_) | TypeShape::Unresolved => {
                    continue;
                }
            };
            self.record_edge(symbol, Symbol::new(GraphId::MAIN, target), kind, None);
        }
        Ok(())
    }

    /// Record members that conforming to `interfaces` injects into the type
    /// behind `source`.
    ///
    /// A member declared in an extension of one of the interfaces becomes a
    /// synthesized symbol on the type unless the type declares a member with
    /// the same name and kind itself. Interfaces, interface extensions and
    /// members unavailable on `target` contribute nothing. Returns the number
    /// of synthesized symbols recorded.
    pub fn record_conformance_synthesized_members(
        &mut self,
        tree: &DeclTree,
        policy: &dyn VisibilityPolicy,
        target: Option<&TargetPlatform>,
        source: Symbol,
        interfaces: &[DeclId],
    ) -> Result<usize> {
        let nominal = match tree.decl(source.decl).kind {
            DeclKind::Extension { extended } => {
                extended.ok_or(ExtractError::UnboundExtension(source.decl))?
            }
            _ => source.decl,
        };

        let own_members: FxHashSet<(&Name, DeclKind)> = std::iter::once(nominal)
            .chain(tree.extensions_of(nominal).iter().copied())
            .flat_map(|container| tree.children(container).iter())
            .map(|&member| {
                let member = tree.decl(member);
                (&member.name, member.kind)
            })
            .collect();

        let mut seen_interfaces = FxHashSet::default();
        let mut recorded = 0;
        for &interface in interfaces {
            if !seen_interfaces.insert(interface)
                || tree.is_unavailable_or_obsoleted(interface, target)
            {
                continue;
            }
            for &ext in tree.extensions_of(interface) {
                if tree.is_unavailable_or_obsoleted(ext, target) {
                    continue;
                }
                for &member in tree.children(ext) {
                    if tree.is_unavailable_or_obsoleted(member, target) {
                        continue;
                    }
                    let decl = tree.decl(member);
                    let synthesizable = matches!(
                        decl.kind,
                        DeclKind::Function
                            | DeclKind::Variable
                            | DeclKind::Subscript
                            | DeclKind::Initializer
                    );
                    if !synthesizable || own_members.contains(&(&decl.name, decl.kind)) {
                        continue;
                    }
                    if !policy.can_include_as_node(tree, self, member) {
                        continue;
                    }

                    let synthesized = Symbol::synthesized(self.id, member, nominal);
                    if self.nodes.insert(synthesized) {
                        recorded += 1;
                    }
                    self.record_edge(synthesized, source, RelationshipKind::MemberOf, None);
                }
            }
        }
        Ok(recorded)
    }
}
