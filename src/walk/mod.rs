//! Declaration walker: partitions a module's declarations into symbol graphs.
//!
//! The walker visits every declaration reachable from the module under
//! inspection in pre-order. For each one it decides whether the subtree is
//! pruned, which graph owns the declaration, and which nodes and edges to
//! record.
//!
//! ## Graph routing
//!
//! ```text
//! owning module == inspected module (ignoring foreignness)   → main graph
//! owning module == overlay's declaring module                → main graph
//! owning module or declaration re-exported                   → main graph
//! extended type (or declaration) considered re-exported      → main graph
//! otherwise                                                  → extension graph of the owning module
//! ```
//!
//! One walker processes one module. Walks of different modules are
//! independent; see [`extract_modules`].

mod conformance;
mod options;
mod reexport;

pub use conformance::expand_conformances;
pub use options::ExtractOptions;
pub use reexport::ReexportSet;

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, info, trace};

use crate::base::{DeclId, GraphId, ModuleId};
use crate::error::{ExtractError, Result};
use crate::graph::{GraphRegistry, RelationshipKind, Symbol, VisibilityPolicy};
use crate::tree::{DeclContext, DeclKind, DeclTree};

/// What to do with the subtree of a visited declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkAction {
    Descend,
    SkipChildren,
}

/// Walks one module's declarations and fills a [`GraphRegistry`].
pub struct SymbolGraphWalker<'a> {
    tree: &'a DeclTree,
    options: &'a ExtractOptions,
    policy: &'a dyn VisibilityPolicy,
    reexports: ReexportSet,
    registry: GraphRegistry,
}

impl<'a> SymbolGraphWalker<'a> {
    /// Create a walker. Every handle in `options` must come from `tree`.
    pub fn new(
        tree: &'a DeclTree,
        options: &'a ExtractOptions,
        policy: &'a dyn VisibilityPolicy,
    ) -> Result<Self> {
        let modules = std::iter::once(options.module)
            .chain(options.exported_imported_modules.iter().copied())
            .chain(options.declaring_module)
            .chain(options.qualified_exported_imports.keys().copied());
        for module in modules {
            tree.get_module(module)
                .ok_or(ExtractError::UnknownModule(module))?;
        }
        for &decl in options.qualified_exported_imports.values().flatten() {
            tree.get(decl).ok_or(ExtractError::UnknownDecl(decl))?;
        }

        Ok(Self {
            tree,
            options,
            policy,
            reexports: ReexportSet::new(tree, options),
            registry: GraphRegistry::new(
                options.module,
                options.declaring_module,
                options.emit_extension_block_symbols,
            ),
        })
    }

    pub fn tree(&self) -> &'a DeclTree {
        self.tree
    }

    pub fn options(&self) -> &'a ExtractOptions {
        self.options
    }

    pub fn reexports(&self) -> &ReexportSet {
        &self.reexports
    }

    pub fn registry(&self) -> &GraphRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> GraphRegistry {
        self.registry
    }

    /// Declarations the walk starts from, in order and without repeats.
    ///
    /// The inspected module's top-level declarations come first, then those
    /// of each exported-imported module, then individually re-exported
    /// declarations.
    pub fn roots(&self) -> Vec<DeclId> {
        let tree = self.tree;
        let modules = std::iter::once(self.options.module)
            .chain(self.options.exported_imported_modules.iter().copied());
        let qualified = self
            .options
            .qualified_exported_imports
            .values()
            .flatten()
            .copied();

        let mut seen = FxHashSet::default();
        modules
            .flat_map(|module| tree.top_level(module).iter().copied())
            .chain(qualified)
            .filter(|decl| seen.insert(*decl))
            .collect()
    }

    /// Walk every root.
    pub fn walk(&mut self) -> Result<()> {
        let roots = self.roots();
        debug!(
            module = %self.tree.module(self.options.module).name,
            roots = roots.len(),
            "walking module"
        );
        for root in roots {
            self.walk_decl(root)?;
        }
        Ok(())
    }

    /// Walk `decl` and, unless it is pruned, its subtree.
    pub fn walk_decl(&mut self, decl: DeclId) -> Result<()> {
        if self.visit(decl)? == WalkAction::SkipChildren {
            return Ok(());
        }
        let tree = self.tree;
        for &child in tree.children(decl) {
            self.walk_decl(child)?;
        }
        Ok(())
    }

    /// Visit a single declaration, recording whatever it contributes.
    pub fn visit(&mut self, decl: DeclId) -> Result<WalkAction> {
        let tree = self.tree;
        if tree.is_unavailable_or_obsoleted(decl, self.options.target.as_ref()) {
            trace!(decl = %tree.decl(decl).name, "skipping unavailable declaration");
            return Ok(WalkAction::SkipChildren);
        }

        let kind = tree.decl(decl).kind;
        match kind {
            DeclKind::Class
            | DeclKind::Struct
            | DeclKind::Enum
            | DeclKind::EnumCase
            | DeclKind::Protocol
            | DeclKind::Initializer
            | DeclKind::Function
            | DeclKind::Variable
            | DeclKind::Subscript
            | DeclKind::TypeAlias
            | DeclKind::AssociatedType
            | DeclKind::Extension { .. } => {}

            DeclKind::Import
            | DeclKind::Operator
            | DeclKind::PrecedenceGroup
            | DeclKind::PatternBinding
            | DeclKind::Accessor
            | DeclKind::TopLevelCode
            | DeclKind::MacroExpansion => return Ok(WalkAction::Descend),
        }

        let graph = self.graph_for(decl)?;
        match kind {
            DeclKind::Extension { extended } => {
                let extended = extended.ok_or(ExtractError::UnboundExtension(decl))?;
                self.visit_extension(decl, extended)
            }
            _ => self.visit_value(decl, graph),
        }
    }

    fn visit_extension(&mut self, ext: DeclId, extended: DeclId) -> Result<WalkAction> {
        let tree = self.tree;
        let target_graph = self.graph_for(extended)?;

        if self
            .policy
            .is_implicitly_private(tree, self.registry.graph(target_graph), ext)
        {
            trace!(extension = %tree.decl(ext).name, "skipping private extension");
            return Ok(WalkAction::SkipChildren);
        }
        if tree.is_unavailable_or_obsoleted(extended, self.options.target.as_ref()) {
            trace!(extension = %tree.decl(ext).name, "skipping extension of unavailable type");
            return Ok(WalkAction::SkipChildren);
        }

        // Extensions of local types are attributed to the type itself.
        let ext_module = &tree.module(tree.module_of(ext)).name;
        let nominal_module = &tree.module(tree.module_of(extended)).name;
        let as_block = self.options.emit_extension_block_symbols && ext_module != nominal_module;

        let source = Symbol::new(target_graph, if as_block { ext } else { extended });
        if as_block {
            let graph = self.registry.graph_mut(target_graph);
            graph.record_node(tree, source)?;
            graph.record_edge(
                source,
                Symbol::new(target_graph, extended),
                RelationshipKind::ExtensionTo,
                None,
            );
        }

        let stated = &tree.decl(ext).inherited;
        if !stated.is_empty() {
            let interfaces = expand_conformances(tree, ext, stated)?;
            let graph = self.registry.graph_mut(target_graph);
            for &interface in &interfaces {
                graph.record_edge(
                    source,
                    Symbol::new(GraphId::MAIN, interface),
                    RelationshipKind::ConformsTo,
                    Some(ext),
                );
            }

            if tree.module_of(extended) != self.options.module {
                graph.record_conformance_synthesized_members(
                    tree,
                    self.policy,
                    self.options.target.as_ref(),
                    source,
                    &interfaces,
                )?;
            }
        }

        Ok(WalkAction::Descend)
    }

    fn visit_value(&mut self, decl: DeclId, graph: GraphId) -> Result<WalkAction> {
        let tree = self.tree;
        if !self
            .policy
            .can_include_as_node(tree, self.registry.graph(graph), decl)
        {
            trace!(decl = %tree.decl(decl).name, "declaration rejected by visibility policy");
            return Ok(WalkAction::SkipChildren);
        }

        // Members of an extension of a foreign type go to that type's graph.
        if let Some(parent) = tree.parent_decl(decl) {
            if let DeclKind::Extension {
                extended: Some(nominal),
            } = tree.decl(parent).kind
            {
                let extended_graph = self.graph_for(nominal)?;
                if tree.module_of(nominal) != self.options.module {
                    self.registry
                        .graph_mut(extended_graph)
                        .record_node(tree, Symbol::new(extended_graph, decl))?;
                    return Ok(WalkAction::Descend);
                }
            }
        }

        self.registry
            .graph_mut(graph)
            .record_node(tree, Symbol::new(graph, decl))?;
        Ok(WalkAction::Descend)
    }

    /// Resolve the graph that owns `decl`, creating an extension graph if needed.
    pub fn graph_for(&mut self, decl: DeclId) -> Result<GraphId> {
        let tree = self.tree;
        let (owner, extended_hint) = self.owning_module(decl)?;
        let owner_module = tree.module(owner);

        if owner_module.is_same(tree.module(self.options.module), true) {
            return Ok(GraphId::MAIN);
        }
        // Cross-import overlays already present as extensions of their
        // declaring module; genuine extensions of it merge with them.
        if let Some(declaring) = self.registry.main().declaring_module() {
            if owner_module.is_same(tree.module(declaring), true) {
                return Ok(GraphId::MAIN);
            }
        }

        // The extension may come from a different module than its members.
        if self.reexports.is_exported_imported_module(owner_module)
            || self.reexports.is_qualified_exported_import(decl)
        {
            return Ok(GraphId::MAIN);
        }
        let reexported = match extended_hint {
            Some(nominal) => self.reexports.is_from_exported_imported_module(tree, nominal),
            None => self.reexports.is_considered_exported_imported(tree, decl),
        };
        if reexported {
            return Ok(GraphId::MAIN);
        }

        Ok(self.registry.get_or_create_extension_graph(tree, owner))
    }

    /// Climb the declaring-context chain of `decl` to its owning module.
    ///
    /// An extension context continues from the extended type's context, so a
    /// member of `extension Foreign.T` is owned by `Foreign`. Also returns the
    /// first extended type met on the way.
    fn owning_module(&self, decl: DeclId) -> Result<(ModuleId, Option<DeclId>)> {
        let tree = self.tree;
        let mut module = tree.module_of(decl);
        let mut ctx = Some(tree.decl(decl).parent);
        let mut extended_hint = None;
        let mut steps = 0;

        while let Some(current) = ctx {
            steps += 1;
            if steps > tree.len() + 1 {
                return Err(ExtractError::ContextCycle(decl));
            }

            module = tree.context_module(current);
            ctx = match current {
                DeclContext::Module(_) => None,
                DeclContext::Decl(id) => match tree.decl(id).kind {
                    DeclKind::Extension { extended } => {
                        let nominal = extended.ok_or(ExtractError::UnboundExtension(id))?;
                        extended_hint.get_or_insert(nominal);
                        Some(tree.decl(nominal).parent)
                    }
                    kind if kind.is_nominal() => Some(tree.decl(id).parent),
                    _ => None,
                },
            };
        }

        Ok((module, extended_hint))
    }
}

/// Extract the symbol graphs of `options.module` in one walk.
pub fn extract(
    tree: &DeclTree,
    options: &ExtractOptions,
    policy: &dyn VisibilityPolicy,
) -> Result<GraphRegistry> {
    let mut walker = SymbolGraphWalker::new(tree, options, policy)?;
    walker.walk()?;
    let registry = walker.into_registry();

    info!(
        module = %tree.module(options.module).name,
        graphs = registry.graph_count(),
        symbols = registry.graphs().map(|g| g.node_count()).sum::<usize>(),
        "extracted symbol graphs"
    );
    Ok(registry)
}

/// Extract several modules in parallel, each with its own walker and registry.
///
/// Results are returned in the order of `options`.
pub fn extract_modules(
    tree: &DeclTree,
    options: &[ExtractOptions],
    policy: &(dyn VisibilityPolicy + Sync),
) -> Vec<Result<GraphRegistry>> {
    options
        .par_iter()
        .map(|opts| extract(tree, opts, policy))
        .collect()
}
