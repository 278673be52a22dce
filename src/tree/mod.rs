//! Declaration tree: the compiled module's declarations as the walker sees them.
//!
//! The tree is an arena of [`Decl`] nodes addressed by [`DeclId`] handles. It
//! is produced by a front end (or by [`DeclTreeBuilder`] in tests) and is only
//! ever borrowed by the extractor.
//!
//! ## Key Types
//!
//! - [`DeclTree`] - Arena plus the semantic queries the walker needs
//! - [`Decl`] - One declaration: kind, declaring context, access, availability
//! - [`DeclKind`] - Closed set of declaration kinds
//! - [`TypeExpr`] - A stated type (inherited type, alias target)
//! - [`TypeShape`] - What a [`TypeExpr`] resolves to once aliases are looked through

mod availability;
mod builder;
mod types;

pub use availability::AvailabilityAttr;
pub use builder::{DeclTreeBuilder, NewDecl};
pub use types::{TypeExpr, TypeShape};

use rustc_hash::FxHashMap;

use crate::base::{DeclId, Module, ModuleId, Name, TargetPlatform};
use crate::error::{ExtractError, Result};

// ============================================================================
// DECLARATIONS
// ============================================================================

/// The kind of a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Class,
    Struct,
    Enum,
    EnumCase,
    /// An interface (protocol).
    Protocol,
    Initializer,
    Function,
    Variable,
    Subscript,
    TypeAlias,
    AssociatedType,
    /// An extension of `extended`. `None` when the front end could not bind it.
    Extension {
        extended: Option<DeclId>,
    },
    // Never recorded as symbols; their subtrees are still walked.
    Import,
    Operator,
    PrecedenceGroup,
    PatternBinding,
    Accessor,
    TopLevelCode,
    MacroExpansion,
}

impl DeclKind {
    /// Returns true for class, struct, enum and protocol declarations.
    pub fn is_nominal(&self) -> bool {
        matches!(
            self,
            DeclKind::Class | DeclKind::Struct | DeclKind::Enum | DeclKind::Protocol
        )
    }

    /// Returns true for declarations that introduce a named value or type.
    pub fn is_value(&self) -> bool {
        match self {
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
            | DeclKind::Accessor => true,
            DeclKind::Extension { .. }
            | DeclKind::Import
            | DeclKind::Operator
            | DeclKind::PrecedenceGroup
            | DeclKind::PatternBinding
            | DeclKind::TopLevelCode
            | DeclKind::MacroExpansion => false,
        }
    }

    pub fn is_extension(&self) -> bool {
        matches!(self, DeclKind::Extension { .. })
    }

    /// Get a display label for this declaration kind.
    pub fn display(&self) -> &'static str {
        match self {
            DeclKind::Class => "class",
            DeclKind::Struct => "struct",
            DeclKind::Enum => "enum",
            DeclKind::EnumCase => "enum.case",
            DeclKind::Protocol => "protocol",
            DeclKind::Initializer => "init",
            DeclKind::Function => "func",
            DeclKind::Variable => "var",
            DeclKind::Subscript => "subscript",
            DeclKind::TypeAlias => "typealias",
            DeclKind::AssociatedType => "associatedtype",
            DeclKind::Extension { .. } => "extension",
            DeclKind::Import => "import",
            DeclKind::Operator => "operator",
            DeclKind::PrecedenceGroup => "precedencegroup",
            DeclKind::PatternBinding => "pattern",
            DeclKind::Accessor => "accessor",
            DeclKind::TopLevelCode => "top-level-code",
            DeclKind::MacroExpansion => "macro-expansion",
        }
    }
}

/// Declared access level, ordered from least to most visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Access {
    Private,
    FilePrivate,
    Internal,
    Package,
    #[default]
    Public,
    Open,
}

/// The lexical parent of a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclContext {
    Module(ModuleId),
    Decl(DeclId),
}

impl From<ModuleId> for DeclContext {
    fn from(module: ModuleId) -> Self {
        DeclContext::Module(module)
    }
}

impl From<DeclId> for DeclContext {
    fn from(decl: DeclId) -> Self {
        DeclContext::Decl(decl)
    }
}

/// A single declaration in the tree.
#[derive(Clone, Debug)]
pub struct Decl {
    pub name: Name,
    pub kind: DeclKind,
    pub parent: DeclContext,
    /// The module this declaration is lexically written in.
    pub module: ModuleId,
    pub access: Access,
    /// Synthesized by the compiler rather than written in source.
    pub implicit: bool,
    pub availability: Vec<AvailabilityAttr>,
    /// Stated inherited types, in source order.
    pub inherited: Vec<TypeExpr>,
    /// Target of a type alias.
    pub aliased: Option<TypeExpr>,
    children: Vec<DeclId>,
}

// ============================================================================
// TREE
// ============================================================================

#[derive(Clone, Debug)]
struct ModuleData {
    module: Module,
    top_level: Vec<DeclId>,
}

/// An arena of declarations grouped into modules.
#[derive(Clone, Debug, Default)]
pub struct DeclTree {
    modules: Vec<ModuleData>,
    decls: Vec<Decl>,
    /// Extended nominal -> extensions of it, in creation order.
    extensions: FxHashMap<DeclId, Vec<DeclId>>,
}

impl DeclTree {
    /// Get a declaration. The handle must come from this tree.
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    pub fn get(&self, id: DeclId) -> Option<&Decl> {
        self.decls.get(id.index())
    }

    /// Get a module. The handle must come from this tree.
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()].module
    }

    pub fn get_module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(id.index()).map(|data| &data.module)
    }

    /// The module a declaration is lexically written in.
    pub fn module_of(&self, id: DeclId) -> ModuleId {
        self.decl(id).module
    }

    /// The module a declaring context belongs to.
    pub fn context_module(&self, ctx: DeclContext) -> ModuleId {
        match ctx {
            DeclContext::Module(module) => module,
            DeclContext::Decl(decl) => self.module_of(decl),
        }
    }

    /// The enclosing declaration, if the parent is not a module.
    pub fn parent_decl(&self, id: DeclId) -> Option<DeclId> {
        match self.decl(id).parent {
            DeclContext::Decl(parent) => Some(parent),
            DeclContext::Module(_) => None,
        }
    }

    /// The extended type of an extension; `None` for anything else.
    pub fn extended_nominal(&self, id: DeclId) -> Option<DeclId> {
        match self.decl(id).kind {
            DeclKind::Extension { extended } => extended,
            _ => None,
        }
    }

    pub fn children(&self, id: DeclId) -> &[DeclId] {
        &self.decl(id).children
    }

    pub fn top_level(&self, module: ModuleId) -> &[DeclId] {
        &self.modules[module.index()].top_level
    }

    /// All extensions bound to `nominal`, in creation order.
    pub fn extensions_of(&self, nominal: DeclId) -> &[DeclId] {
        self.extensions
            .get(&nominal)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All module handles carrying `name` (native and foreign representations).
    pub fn modules_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = ModuleId> + 'a {
        self.modules
            .iter()
            .enumerate()
            .filter(move |(_, data)| data.module.name == name)
            .map(|(idx, _)| ModuleId::new(idx as u32))
    }

    /// Iterate over all declarations with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Decl)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(idx, decl)| (DeclId::new(idx as u32), decl))
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Path components from the outermost type down to `id`.
    ///
    /// Members of an extension are reported under the extended type, so
    /// `extension Widget { func draw() }` yields `["Widget", "draw"]`. An
    /// extension itself yields the extended type's path.
    pub fn qualified_path(&self, id: DeclId) -> Result<Vec<Name>> {
        let mut path = Vec::new();
        let mut current = Some(id);
        let mut steps = 0;

        while let Some(decl_id) = current {
            steps += 1;
            if steps > self.decls.len() + 1 {
                return Err(ExtractError::ContextCycle(id));
            }

            let decl = self.decl(decl_id);
            if let DeclKind::Extension { extended } = decl.kind {
                current = Some(extended.ok_or(ExtractError::UnboundExtension(decl_id))?);
                continue;
            }

            path.push(decl.name.clone());
            current = self.parent_decl(decl_id);
        }

        path.reverse();
        Ok(path)
    }

    /// Check whether a declaration is unavailable or obsoleted on `target`.
    ///
    /// Only attributes naming a platform that is active for the target count.
    /// Platform-agnostic attributes never prune, and neither does a
    /// declaration introduced after the deployment version.
    pub fn is_unavailable_or_obsoleted(
        &self,
        id: DeclId,
        target: Option<&TargetPlatform>,
    ) -> bool {
        let Some(target) = target else {
            return false;
        };
        self.decl(id)
            .availability
            .iter()
            .any(|attr| attr.prunes(target))
    }
}
