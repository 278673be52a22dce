//! Module identity.

use super::Name;

/// A compilation unit as seen by the extractor.
///
/// A module may exist in two representations: native, and foreign (imported
/// from another language's headers). Both carry the same name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Module {
    pub name: Name,
    /// True for a non-native representation of the module.
    pub foreign: bool,
}

impl Module {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            foreign: false,
        }
    }

    pub fn foreign(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            foreign: true,
        }
    }

    /// Check whether two modules are the same owning entity.
    ///
    /// Names must always match. With `ignore_foreign` set, a native module and
    /// its foreign counterpart compare equal; graph routing relies on this so
    /// both land in one graph.
    pub fn is_same(&self, other: &Module, ignore_foreign: bool) -> bool {
        self.name == other.name && (ignore_foreign || self.foreign == other.foreign)
    }
}
