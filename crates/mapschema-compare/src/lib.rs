//! # mapschema-compare — Map-to-Record Comparison
//!
//! Checks that a dynamically-typed mapping (typically parsed JSON) has the
//! shape of a static record before a strict decode is attempted, and
//! reports every problem instead of stopping at the first one.
//!
//! ## Entry Points
//!
//! - [`compare_map_to_struct`] — takes a destination type, a source mapping
//!   and optional [`CompareOptions`]; fails only on invalid arguments.
//! - [`compare_record`] — the same check for a type implementing
//!   [`Record`](mapschema_core::Record).
//!
//! ## Results
//!
//! [`CompareResult`] lists [`FieldMissing`] and [`FieldMismatch`] entries in
//! traversal order. [`CompareResult::errors`] builds a nested
//! [`MismatchError`] suitable for returning to API clients.
//!
//! ## Extension Hooks
//!
//! [`CompareOptions`] accepts a [`Convertible`] predicate and a
//! [`TypeNamer`]. Each defaults independently to [`DefaultCanConvert`] and
//! detailed naming.

pub mod compare;
pub mod convert;
pub mod options;
pub mod result;

pub use compare::{compare_map_to_struct, compare_record};
pub use convert::{default_can_convert, DefaultCanConvert};
pub use options::{CompareOptions, Convertible, TypeNamer};
pub use result::{CompareResult, FieldMismatch, FieldMissing, MismatchEntry, MismatchError};
