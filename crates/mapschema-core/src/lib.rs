//! # mapschema-core — Foundational Types
//!
//! Everything the comparison engine reads, and nothing it decides:
//!
//! - [`types`] — [`RecordSchema`], [`FieldDescriptor`] and [`FieldType`], the
//!   static description of a destination record, and the [`Record`] trait
//!   that ties a Rust type to its schema.
//! - [`value`] — [`SourceValue`] and [`SourceMap`], the dynamically-typed
//!   input, with adapters from `serde_json` and `serde_yaml`.
//! - [`naming`] — detailed and simple type-naming policies, article
//!   selection and dotted path formatting.
//! - [`error`] — [`CompareError`], [`ConfigError`] and [`SourceError`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mapschema-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod naming;
pub mod types;
pub mod value;

pub use error::{CompareError, ConfigError, SourceError};
pub use naming::{
    detailed_type_name, format_path, simple_type_name, type_name_starts_with_vowel,
    type_name_with_article, NamingPolicy,
};
pub use types::{FieldDescriptor, FieldType, Record, RecordSchema};
pub use value::{json_object, parse_json_object, parse_yaml_object, SourceMap, SourceValue};
