//! Index handles.
//!
//! Handles are plain indices. They are only meaningful relative to the tree or
//! registry that issued them.

use std::fmt;

/// Handle to a declaration inside a [`DeclTree`](crate::tree::DeclTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(u32);

impl DeclId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

/// Handle to a module inside a [`DeclTree`](crate::tree::DeclTree).
///
/// A native module and its foreign counterpart are two distinct handles that
/// share a name. Compare [`Module`](super::Module) values, not handles, when
/// the question is identity rather than representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleId(u32);

impl ModuleId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module#{}", self.0)
    }
}

/// Handle to a symbol graph inside a [`GraphRegistry`](crate::graph::GraphRegistry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GraphId(u32);

impl GraphId {
    /// The main graph, bound to the module under inspection.
    pub const MAIN: GraphId = GraphId(0);

    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_main(self) -> bool {
        self == Self::MAIN
    }
}
