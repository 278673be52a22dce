//! Re-export classification.
//!
//! Decides whether a declaration that nominally belongs to a foreign module is
//! part of the inspected module's own surface, through a whole-module
//! re-export or a qualified (per-declaration) one. All predicates depend on
//! configuration only, never on traversal state.

use indexmap::{IndexMap, IndexSet};

use crate::base::{DeclId, Module, ModuleId};
use crate::tree::{DeclContext, DeclKind, DeclTree};

use super::ExtractOptions;

/// Configured re-exports of one extraction run.
#[derive(Clone, Debug, Default)]
pub struct ReexportSet {
    modules: Vec<Module>,
    qualified: IndexMap<ModuleId, IndexSet<DeclId>>,
}

impl ReexportSet {
    pub fn new(tree: &DeclTree, options: &ExtractOptions) -> Self {
        Self {
            modules: options
                .exported_imported_modules
                .iter()
                .map(|&module| tree.module(module).clone())
                .collect(),
            qualified: options.qualified_exported_imports.clone(),
        }
    }

    /// True if `module` is one of the exported-imported modules (strict identity).
    pub fn is_exported_imported_module(&self, module: &Module) -> bool {
        self.modules
            .iter()
            .any(|exported| exported.is_same(module, false))
    }

    /// True if `decl` is individually re-exported from any module.
    pub fn is_qualified_exported_import(&self, decl: DeclId) -> bool {
        self.qualified.values().any(|decls| decls.contains(&decl))
    }

    pub fn is_from_exported_imported_module(&self, tree: &DeclTree, decl: DeclId) -> bool {
        self.is_qualified_exported_import(decl)
            || self.is_exported_imported_module(tree.module(tree.module_of(decl)))
    }

    /// True if `decl` itself, its enclosing value declaration, or the type
    /// extended by its nearest enclosing extension is re-exported.
    pub fn is_considered_exported_imported(&self, tree: &DeclTree, decl: DeclId) -> bool {
        if self.is_from_exported_imported_module(tree, decl) {
            return true;
        }

        let parent = tree.parent_decl(decl);
        if let Some(parent) = parent {
            if tree.decl(parent).kind.is_value() && self.is_from_exported_imported_module(tree, parent)
            {
                return true;
            }
        }

        let mut ctx = parent;
        while let Some(current) = ctx {
            match tree.decl(current).kind {
                DeclKind::Extension { extended } => {
                    return extended
                        .is_some_and(|nominal| self.is_from_exported_imported_module(tree, nominal));
                }
                _ => {
                    ctx = match tree.decl(current).parent {
                        DeclContext::Decl(next) => Some(next),
                        DeclContext::Module(_) => None,
                    };
                }
            }
        }

        false
    }
}
