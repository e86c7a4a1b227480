//! Error types for name canonicalization.
//!
//! Responsibilities:
//! - Define the failure kinds of the canonicalization and rendering entry points.
//!
//! Does NOT handle:
//! - Lookup failures. `EnvConfigSource::value_of` reports absence, never an error.
//!
//! Invariants:
//! - Variants carry the offending name and a short reason, never a configuration value.

use thiserror::Error;

/// Errors raised when a name cannot be turned into a [`CanonicalName`](super::CanonicalName).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Bad bracket or quote syntax in a property path.
    #[error("Malformed property path '{name}' at position {position}: {reason}")]
    MalformedPath {
        name: String,
        position: usize,
        reason: &'static str,
    },

    /// Underscore structure of an environment variable name cannot be segmented.
    #[error("Malformed environment variable name '{name}': {reason}")]
    MalformedEnvName { name: String, reason: &'static str },

    /// Well-formed property path whose rendered variable name denotes a different property.
    #[error("Property path '{name}' has no environment variable form")]
    NoEnvForm { name: String },
}

impl NameError {
    /// The name that failed to canonicalize.
    pub fn name(&self) -> &str {
        match self {
            NameError::MalformedPath { name, .. }
            | NameError::MalformedEnvName { name, .. }
            | NameError::NoEnvForm { name } => name,
        }
    }
}
