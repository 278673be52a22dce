//! Incremental construction of a [`DeclTree`].
//!
//! Front ends (and tests) append modules and declarations in pre-order. A
//! parent must exist before its children, which keeps the lexical context
//! chain acyclic.
//!
//! ```ignore
//! let mut builder = DeclTreeBuilder::new();
//! let kit = builder.add_module(Module::new("Kit"));
//! let widget = builder.add(kit, NewDecl::new("Widget", DeclKind::Struct))?;
//! builder.add(widget, NewDecl::new("draw", DeclKind::Function))?;
//! let tree = builder.finish();
//! ```

use crate::base::{DeclId, Module, ModuleId, Name};
use crate::error::{ExtractError, Result};

use super::{Access, AvailabilityAttr, Decl, DeclContext, DeclKind, DeclTree, ModuleData, TypeExpr};

/// Description of a declaration to append. Access defaults to public.
#[derive(Clone, Debug)]
pub struct NewDecl {
    name: Name,
    kind: DeclKind,
    access: Access,
    implicit: bool,
    availability: Vec<AvailabilityAttr>,
    inherited: Vec<TypeExpr>,
    aliased: Option<TypeExpr>,
}

impl NewDecl {
    pub fn new(name: impl Into<Name>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            kind,
            access: Access::default(),
            implicit: false,
            availability: Vec::new(),
            inherited: Vec::new(),
            aliased: None,
        }
    }

    /// An extension of `extended`, named after it.
    pub fn extension(extended: DeclId) -> Self {
        Self::new(
            Name::default(),
            DeclKind::Extension {
                extended: Some(extended),
            },
        )
    }

    /// An extension the front end could not bind.
    pub fn unbound_extension(name: impl Into<Name>) -> Self {
        Self::new(name, DeclKind::Extension { extended: None })
    }

    pub fn access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    pub fn implicit(mut self) -> Self {
        self.implicit = true;
        self
    }

    pub fn available(mut self, attr: AvailabilityAttr) -> Self {
        self.availability.push(attr);
        self
    }

    pub fn inherits(mut self, ty: impl Into<TypeExpr>) -> Self {
        self.inherited.push(ty.into());
        self
    }

    pub fn aliasing(mut self, ty: impl Into<TypeExpr>) -> Self {
        self.aliased = Some(ty.into());
        self
    }
}

/// Builder for [`DeclTree`].
#[derive(Debug, Default)]
pub struct DeclTreeBuilder {
    tree: DeclTree,
}

impl DeclTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_module(&mut self, module: Module) -> ModuleId {
        let id = ModuleId::new(self.tree.modules.len() as u32);
        self.tree.modules.push(ModuleData {
            module,
            top_level: Vec::new(),
        });
        id
    }

    /// Append a declaration under `parent`.
    pub fn add(&mut self, parent: impl Into<DeclContext>, new: NewDecl) -> Result<DeclId> {
        let parent = parent.into();
        let module = match parent {
            DeclContext::Module(module) => {
                self.tree
                    .get_module(module)
                    .ok_or(ExtractError::UnknownModule(module))?;
                module
            }
            DeclContext::Decl(decl) => {
                self.tree.get(decl).ok_or(ExtractError::UnknownDecl(decl))?;
                self.tree.module_of(decl)
            }
        };

        let mut name = new.name;
        if let DeclKind::Extension {
            extended: Some(extended),
        } = new.kind
        {
            let target = self
                .tree
                .get(extended)
                .ok_or(ExtractError::UnknownDecl(extended))?;
            if name.is_empty() {
                name = target.name.clone();
            }
        }

        let id = DeclId::new(self.tree.decls.len() as u32);
        self.tree.decls.push(Decl {
            name,
            kind: new.kind,
            parent,
            module,
            access: new.access,
            implicit: new.implicit,
            availability: new.availability,
            inherited: new.inherited,
            aliased: new.aliased,
            children: Vec::new(),
        });

        match parent {
            DeclContext::Module(module) => self.tree.modules[module.index()].top_level.push(id),
            DeclContext::Decl(decl) => self.tree.decls[decl.index()].children.push(id),
        }
        if let DeclKind::Extension {
            extended: Some(extended),
        } = new.kind
        {
            self.tree.extensions.entry(extended).or_default().push(id);
        }

        Ok(id)
    }

    /// Append a stated inherited type to an existing declaration.
    ///
    /// Useful when interfaces refer to each other in an order that does not
    /// match declaration order.
    pub fn add_inherited(&mut self, id: DeclId, ty: impl Into<TypeExpr>) -> Result<()> {
        let decl = self
            .tree
            .decls
            .get_mut(id.index())
            .ok_or(ExtractError::UnknownDecl(id))?;
        decl.inherited.push(ty.into());
        Ok(())
    }

    /// Bind a previously unbound extension to its extended type.
    pub fn bind_extension(&mut self, ext: DeclId, nominal: DeclId) -> Result<()> {
        let target_name = self
            .tree
            .get(nominal)
            .ok_or(ExtractError::UnknownDecl(nominal))?
            .name
            .clone();
        let decl = self
            .tree
            .decls
            .get_mut(ext.index())
            .ok_or(ExtractError::UnknownDecl(ext))?;
        let DeclKind::Extension { extended } = &mut decl.kind else {
            return Err(ExtractError::UnboundExtension(ext));
        };
        if let Some(previous) = extended.replace(nominal) {
            if let Some(list) = self.tree.extensions.get_mut(&previous) {
                list.retain(|&e| e != ext);
            }
        }
        if decl.name.is_empty() {
            decl.name = target_name;
        }
        self.tree.extensions.entry(nominal).or_default().push(ext);
        Ok(())
    }

    pub fn tree(&self) -> &DeclTree {
        &self.tree
    }

    pub fn finish(self) -> DeclTree {
        self.tree
    }
}
