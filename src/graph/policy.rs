//! Visibility policy: which declarations belong to the documented surface.
//!
//! Rejection is silent: a declaration that is not part of the public surface
//! is simply left out.

use crate::base::DeclId;
use crate::tree::{Access, DeclKind, DeclTree};

use super::SymbolGraph;

/// Per-graph decision about which declarations become nodes.
pub trait VisibilityPolicy {
    /// Returns true if `decl` may be recorded as a node of `graph`.
    fn can_include_as_node(&self, tree: &DeclTree, graph: &SymbolGraph, decl: DeclId) -> bool;

    /// Returns true if `decl` is effectively private from `graph`'s point of view.
    fn is_implicitly_private(&self, tree: &DeclTree, graph: &SymbolGraph, decl: DeclId) -> bool;
}

/// Access-level based policy.
///
/// A declaration is implicitly private when it, or any type or extension
/// enclosing it, falls below `minimum_access`, is compiler-synthesized, or
/// carries an underscored name. Declarations in local scopes are always
/// private. An extension inherits the privacy of the type it extends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessPolicy {
    pub minimum_access: Access,
    pub include_underscored: bool,
    pub include_implicit: bool,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            minimum_access: Access::Public,
            include_underscored: false,
            include_implicit: false,
        }
    }
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minimum_access(mut self, access: Access) -> Self {
        self.minimum_access = access;
        self
    }

    pub fn with_underscored(mut self, include: bool) -> Self {
        self.include_underscored = include;
        self
    }

    pub fn with_implicit(mut self, include: bool) -> Self {
        self.include_implicit = include;
        self
    }

    fn rejects(&self, tree: &DeclTree, decl: DeclId) -> bool {
        let decl = tree.decl(decl);
        decl.access < self.minimum_access
            || (decl.implicit && !self.include_implicit)
            || (!self.include_underscored && decl.name.starts_with('_'))
    }
}

fn is_local_scope(kind: DeclKind) -> bool {
    matches!(
        kind,
        DeclKind::Function
            | DeclKind::Initializer
            | DeclKind::Subscript
            | DeclKind::Variable
            | DeclKind::Accessor
            | DeclKind::PatternBinding
            | DeclKind::TopLevelCode
    )
}

impl VisibilityPolicy for AccessPolicy {
    fn can_include_as_node(&self, tree: &DeclTree, graph: &SymbolGraph, decl: DeclId) -> bool {
        !self.is_implicitly_private(tree, graph, decl)
    }

    fn is_implicitly_private(&self, tree: &DeclTree, _graph: &SymbolGraph, decl: DeclId) -> bool {
        let mut current = Some(decl);
        let mut steps = 0;

        while let Some(id) = current {
            steps += 1;
            if steps > tree.len() + 1 {
                return true;
            }

            match tree.decl(id).kind {
                DeclKind::Extension { extended: None } => return true,
                DeclKind::Extension {
                    extended: Some(nominal),
                } => current = Some(nominal),
                _ => {
                    if self.rejects(tree, id) {
                        return true;
                    }
                    current = tree.parent_decl(id);
                    if let Some(parent) = current {
                        if is_local_scope(tree.decl(parent).kind) {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }
}
