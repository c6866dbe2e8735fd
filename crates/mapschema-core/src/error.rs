//! # Error Types
//!
//! Defines the fatal error types used across mapschema. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Comparison errors are precondition failures only. A field that is
//!   missing or has the wrong type is a result, never an error.
//! - Source loading errors carry the underlying parser message.

use thiserror::Error;

/// Precondition failure returned by the comparison entry points.
///
/// When one of these is returned no partial result exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    /// The destination is absent, is not a reference, or does not refer to
    /// a record type.
    #[error("destination must be a reference to a record type")]
    InvalidDestination,

    /// The source mapping is absent.
    #[error("source mapping must not be nil")]
    NilSource,
}

/// Error in a configuration value supplied as text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The string does not name a [`NamingPolicy`](crate::NamingPolicy).
    #[error("unknown naming policy: {0:?}")]
    UnknownNamingPolicy(String),
}

/// Error while turning raw JSON/YAML text into a [`SourceMap`](crate::SourceMap).
#[derive(Error, Debug)]
pub enum SourceError {
    /// The input is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The input is not valid YAML.
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// A YAML mapping used a key that has no string form.
    #[error("unsupported mapping key: {0}")]
    UnsupportedKey(String),

    /// The document parsed, but its top level is not a mapping.
    #[error("expected a mapping at the top level, found {found}")]
    NotAMapping {
        /// Runtime type name of the value that was found instead.
        found: String,
    },
}
