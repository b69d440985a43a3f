//! Error types for object graph population.

use populate_core::{SchemaError, TypeDescriptor};
use thiserror::Error;

/// Errors that can occur during population.
///
/// Every variant aborts the current top-level call; no partial instance is
/// returned. Reaching the cycle guard or the depth ceiling is not an error.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// No randomizer, structure or binding can produce the type.
    #[error("Cannot resolve type {descriptor}")]
    UnresolvableType {
        /// The type (and field, if any) that failed to resolve
        descriptor: TypeDescriptor,
    },

    /// The type has no construction path, or the populated tree does not fit
    /// the requested Rust type.
    #[error("Cannot construct {type_name}: {reason}")]
    ConstructionFailure {
        /// Name of the type that failed to construct
        type_name: String,
        /// What went wrong
        reason: String,
    },

    /// Schema loading or lookup error.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Invalid population configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PopulateError {
    pub(crate) fn unresolvable(descriptor: &TypeDescriptor) -> Self {
        Self::UnresolvableType {
            descriptor: descriptor.clone(),
        }
    }

    pub(crate) fn construction(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConstructionFailure {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}
