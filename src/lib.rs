//! # symgraph-base
//!
//! Core library for extracting API symbol graphs from a compiled module's
//! declaration tree, for downstream documentation tooling.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! export    → Serializable graph documents (feature "serde")
//!   ↓
//! walk      → Pre-order walker, graph routing, re-exports, conformance expansion
//!   ↓
//! graph     → Symbols, edges, symbol graphs, registry, visibility policy
//!   ↓
//! tree      → Declaration arena supplied by the front end
//!   ↓
//! base      → Primitives (DeclId, ModuleId, GraphId, Module, Version)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use symgraph::{AccessPolicy, ExtractOptions, extract};
//!
//! let options = ExtractOptions::new(app).with_extension_block_symbols(true);
//! let registry = extract(&tree, &options, &AccessPolicy::default())?;
//! for graph in registry.graphs() {
//!     println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
//! }
//! ```

// ============================================================================
// MODULES (dependency order: base → tree → graph → walk → export)
// ============================================================================

/// Foundation types: handles, module identity, versions
pub mod base;

/// Error types shared by every layer
pub mod error;

/// Declaration tree: the front end's view of a compiled module
pub mod tree;

/// Symbol graphs and the registry that owns them
pub mod graph;

/// The walker that partitions declarations into graphs
pub mod walk;

/// Graph export: JSON documents per graph
#[cfg(feature = "serde")]
pub mod export;

// Re-export commonly needed items
pub use base::{DeclId, GraphId, Module, ModuleId, Name, Platform, TargetPlatform, Version};
pub use error::{ExtractError, Result};
pub use graph::{
    AccessPolicy, Edge, GraphRegistry, RelationshipKind, Symbol, SymbolGraph, VisibilityPolicy,
};
pub use tree::{Access, AvailabilityAttr, DeclKind, DeclTree, DeclTreeBuilder, NewDecl, TypeExpr};
pub use walk::{ExtractOptions, SymbolGraphWalker, WalkAction, extract, extract_modules};
