//! # Default Convertibility
//!
//! A source value is convertible to a declared type when a strict decode
//! could assign it without loss, truncation or sign violation.
//!
//! Examples of a mismatch (source -> destination):
//!
//! | Source  | Destination | Why                              |
//! |---------|-------------|----------------------------------|
//! | string  | int         | different category               |
//! | float   | string      | different category               |
//! | bool    | int         | different category               |
//! | 1.5     | int         | fractional part would be dropped |
//! | -1      | uint        | sign would be lost               |
//! | null    | string      | only pointers accept null        |
//!
//! Allowed conversions:
//!
//! | Source  | Destination |
//! |---------|-------------|
//! | 2.0     | int         |
//! | int     | float64     |
//! | `T`     | `*T`        |
//! | null    | `*T`        |
//! | mapping | record      |
//!
//! A mapping is always convertible to a record type; whether its own
//! fields match is decided by the recursive walk, not here. Lists and maps
//! are opaque: only the container kind is checked.

use mapschema_core::{FieldType, SourceValue};

use crate::options::Convertible;

/// The built-in [`Convertible`] predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultCanConvert;

impl Convertible for DefaultCanConvert {
    fn can_convert(&self, declared: &FieldType, observed: &SourceValue) -> bool {
        default_can_convert(declared, observed)
    }
}

/// Returns whether `observed` is convertible to `declared`.
///
/// If `declared` is a pointer and `observed` is not null, the check runs
/// against the pointee.
pub fn default_can_convert(declared: &FieldType, observed: &SourceValue) -> bool {
    if observed.is_null() {
        return declared.is_pointer();
    }

    let target = declared.elem().unwrap_or(declared);

    if target.as_record().is_some() {
        return observed.as_map().is_some();
    }

    if !same_category(target, observed) {
        return false;
    }

    if target.is_integer() {
        let unsigned = target.is_unsigned_integer();
        match observed {
            SourceValue::Float(f) => {
                if f.trunc() != *f || (unsigned && *f < 0.0) {
                    return false;
                }
            }
            SourceValue::Int(i) => {
                if unsigned && *i < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }

    true
}

/// Category-level conversion: numbers convert between any numeric widths,
/// everything else only to its own kind.
fn same_category(target: &FieldType, observed: &SourceValue) -> bool {
    match (target.underlying(), observed) {
        (FieldType::Any, _) => true,
        (FieldType::Bool, SourceValue::Bool(_)) => true,
        (FieldType::String, SourceValue::String(_)) => true,
        (ty, SourceValue::Int(_) | SourceValue::Float(_)) => ty.is_numeric(),
        (FieldType::List(_), SourceValue::List(_)) => true,
        (FieldType::Map(_), SourceValue::Map(_)) => true,
        _ => false,
    }
}
