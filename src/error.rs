//! Error taxonomy shared across the crate.
//!
//! All failures are local and synchronous: construction, feature computation
//! and partitioning either complete fully or fail without producing a usable
//! partial result. There are no retries and no silent recovery.

use std::fmt;

/// Reasons why a RAG operation may fail.
#[derive(Clone, Debug, PartialEq)]
pub enum RagError {
    /// A label volume (or its metadata) is not usable as input.
    InvalidInput { reason: String },
    /// A requested feature name does not match the supported grammar.
    InvalidFeatureName { name: String, reason: &'static str },
    /// The length, shape or axis metadata of an input disagrees with the RAG
    /// (or persisted header) it is applied to.
    ShapeMismatch {
        context: &'static str,
        expected: String,
        actual: String,
    },
    /// Persisted data uses an encoding this codec does not recognize.
    UnsupportedFormat { detail: String },
    /// A pixel-level operation was attempted against a deferred label volume.
    NotAvailable { operation: &'static str },
}

impl fmt::Display for RagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RagError::InvalidInput { reason } => {
                write!(f, "invalid input: {reason}")
            }
            RagError::InvalidFeatureName { name, reason } => {
                write!(f, "invalid feature name {name:?}: {reason}")
            }
            RagError::ShapeMismatch {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "shape mismatch in {context}: expected {expected}, got {actual}"
                )
            }
            RagError::UnsupportedFormat { detail } => {
                write!(f, "unsupported persisted format: {detail}")
            }
            RagError::NotAvailable { operation } => {
                write!(
                    f,
                    "{operation} requires label pixels, but only a deferred header is present"
                )
            }
        }
    }
}

impl std::error::Error for RagError {}
