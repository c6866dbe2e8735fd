//! # Type Naming
//!
//! Turns a [`FieldType`] into the display name used in mismatch reports,
//! plus the small natural-language helpers those reports need.
//!
//! Two policies are provided:
//!
//! - **Detailed** keeps exact names: `int32`, `float64`, `*string`, `Address`.
//! - **Simple** collapses every width into `int`, `uint` or `float`, which
//!   reads better in messages aimed at API clients.
//!
//! Null values have no type and are named `"null"` by the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::FieldType;

/// Exact type name. Pointers render as `*<elem>`.
pub fn detailed_type_name(ty: &FieldType) -> String {
    match ty {
        FieldType::Pointer(elem) => format!("*{}", detailed_type_name(elem)),
        other => bare_name(other, detailed_type_name),
    }
}

/// Generic type name: all signed widths are `int`, unsigned widths `uint`
/// and floats `float`. Named numeric types bucket by their underlying kind.
pub fn simple_type_name(ty: &FieldType) -> String {
    if let FieldType::Pointer(elem) = ty {
        return format!("*{}", simple_type_name(elem));
    }

    if ty.is_signed_integer() {
        "int".to_string()
    } else if ty.is_unsigned_integer() {
        "uint".to_string()
    } else if ty.is_float() {
        "float".to_string()
    } else {
        bare_name(ty, simple_type_name)
    }
}

fn bare_name(ty: &FieldType, elem_name: fn(&FieldType) -> String) -> String {
    let name = match ty {
        FieldType::Bool => "bool",
        FieldType::Int => "int",
        FieldType::Int8 => "int8",
        FieldType::Int16 => "int16",
        FieldType::Int32 => "int32",
        FieldType::Int64 => "int64",
        FieldType::Uint => "uint",
        FieldType::Uint8 => "uint8",
        FieldType::Uint16 => "uint16",
        FieldType::Uint32 => "uint32",
        FieldType::Uint64 => "uint64",
        FieldType::Float32 => "float32",
        FieldType::Float64 => "float64",
        FieldType::String => "string",
        FieldType::Any => "any",
        FieldType::Pointer(elem) => return format!("*{}", elem_name(elem)),
        FieldType::List(elem) => return format!("[]{}", elem_name(elem)),
        FieldType::Map(elem) => return format!("map[string]{}", elem_name(elem)),
        FieldType::Record(schema) => schema.name(),
        FieldType::Named { name, .. } => name.as_str(),
    };
    name.to_string()
}

/// Selects one of the built-in naming functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingPolicy {
    #[default]
    Detailed,
    Simple,
}

impl NamingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Detailed => "detailed",
            Self::Simple => "simple",
        }
    }

    /// The naming function this policy stands for.
    pub fn namer(&self) -> fn(&FieldType) -> String {
        match self {
            Self::Detailed => detailed_type_name,
            Self::Simple => simple_type_name,
        }
    }

    pub fn type_name(&self, ty: &FieldType) -> String {
        (self.namer())(ty)
    }
}

impl fmt::Display for NamingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamingPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "detailed" => Ok(Self::Detailed),
            "simple" => Ok(Self::Simple),
            other => Err(ConfigError::UnknownNamingPolicy(other.to_string())),
        }
    }
}

/// Whether a type name starts with a vowel sound that takes "an".
///
/// Leading `*` markers are ignored. `u` is not counted: "a uint", "a user".
pub fn type_name_starts_with_vowel(name: &str) -> bool {
    let name = name.trim_start_matches('*');
    matches!(
        name.chars().next().map(|c| c.to_ascii_lowercase()),
        Some('a' | 'e' | 'i' | 'o')
    )
}

/// Prefixes a type name with "a" or "an". `null` is returned as-is.
pub fn type_name_with_article(name: &str) -> String {
    if name == "null" {
        name.to_string()
    } else if type_name_starts_with_vowel(name) {
        format!("an {name}")
    } else {
        format!("a {name}")
    }
}

/// Joins ancestors and the field name with `.`, outermost first.
pub fn format_path<S: AsRef<str>>(field: &str, path: &[S]) -> String {
    let mut out = String::new();
    for segment in path {
        out.push_str(segment.as_ref());
        out.push('.');
    }
    out.push_str(field);
    out
}
