//! Error types for symbol graph extraction.
//!
//! Every variant reports a defect in an upstream assumption: the declaration
//! tree handed to the walker is inconsistent with what a front end would
//! produce. Ordinary filtering (unavailable, private, rejected by policy) is
//! never an error.

use thiserror::Error;

use crate::base::{DeclId, ModuleId, Name};

/// Errors that abort an extraction run.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A stated inherited type on an extension (or on an interface it implies)
    /// is neither an interface nor an interface composition.
    #[error("inherited type `{ty}` on `{decl}` is neither an interface nor a composition")]
    InvalidInheritedType { decl: Name, ty: String },

    /// An extension whose extended type was never bound.
    #[error("extension {0} has no extended type")]
    UnboundExtension(DeclId),

    /// Climbing the declaring-context chain revisited a context.
    #[error("declaring-context chain of {0} does not reach a module")]
    ContextCycle(DeclId),

    /// A type alias that (transitively) aliases itself.
    #[error("type alias `{0}` refers to itself")]
    CyclicTypeAlias(Name),

    /// A declaration handle that the tree never issued.
    #[error("unknown declaration {0}")]
    UnknownDecl(DeclId),

    /// A module handle that the tree never issued.
    #[error("unknown module {0}")]
    UnknownModule(ModuleId),

    /// Rendering an exported graph failed.
    #[cfg(feature = "serde")]
    #[error("failed to serialize symbol graph: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ExtractError {
    /// Create an invalid inherited type error.
    pub fn invalid_inherited(decl: impl Into<Name>, ty: impl Into<String>) -> Self {
        Self::InvalidInheritedType {
            decl: decl.into(),
            ty: ty.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExtractError>;
