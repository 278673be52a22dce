//! Declaration tree fixtures.

use symgraph::{
    AccessPolicy, DeclId, DeclKind, DeclTree, DeclTreeBuilder, ExtractOptions, GraphRegistry,
    Module, ModuleId, NewDecl, TypeExpr, extract,
};
use symgraph::tree::DeclContext;

/// Thin wrapper over [`DeclTreeBuilder`] that panics on builder errors.
#[derive(Default)]
pub struct Fixture {
    builder: DeclTreeBuilder,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn module(&mut self, name: &str) -> ModuleId {
        self.builder.add_module(Module::new(name))
    }

    pub fn foreign_module(&mut self, name: &str) -> ModuleId {
        self.builder.add_module(Module::foreign(name))
    }

    pub fn add(&mut self, parent: impl Into<DeclContext>, new: NewDecl) -> DeclId {
        self.builder
            .add(parent, new)
            .unwrap_or_else(|err| panic!("fixture declaration failed: {}", err))
    }

    pub fn decl(
        &mut self,
        parent: impl Into<DeclContext>,
        name: &str,
        kind: DeclKind,
    ) -> DeclId {
        self.add(parent, NewDecl::new(name, kind))
    }

    pub fn protocol(&mut self, module: ModuleId, name: &str, inherits: &[DeclId]) -> DeclId {
        let mut new = NewDecl::new(name, DeclKind::Protocol);
        for &base in inherits {
            new = new.inherits(base);
        }
        self.add(module, new)
    }

    pub fn extension(
        &mut self,
        module: ModuleId,
        target: DeclId,
        inherits: Vec<TypeExpr>,
    ) -> DeclId {
        let mut new = NewDecl::extension(target);
        for ty in inherits {
            new = new.inherits(ty);
        }
        self.add(module, new)
    }

    pub fn finish(self) -> DeclTree {
        self.builder.finish()
    }
}

/// Extract with the default access policy, panicking on failure.
pub fn extract_ok(tree: &DeclTree, options: &ExtractOptions) -> GraphRegistry {
    extract(tree, options, &AccessPolicy::default())
        .unwrap_or_else(|err| panic!("extraction failed: {}", err))
}
