//! Foundation types for the symgraph toolchain.
//!
//! This module provides fundamental types used throughout the extractor:
//! - [`DeclId`], [`ModuleId`] - Handles into an externally owned declaration tree
//! - [`GraphId`] - Handles into the graph registry arena
//! - [`Module`] - Module identity, including the foreign-representation flag
//! - [`Version`], [`Platform`] - Availability vocabulary
//! - [`Name`] - Cheap-to-clone identifier text
//!
//! This module has NO dependencies on other symgraph modules.

mod ids;
mod module;
mod version;

pub use ids::{DeclId, GraphId, ModuleId};
pub use module::Module;
pub use version::{Platform, TargetPlatform, Version, VersionParseError};

/// Identifier text for modules and declarations.
pub type Name = smol_str::SmolStr;
