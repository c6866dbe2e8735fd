//! # Comparison Results
//!
//! A [`CompareResult`] holds two lists in traversal order:
//!
//! - [`FieldMismatch`] — the key is present but its value does not fit the
//!   declared type.
//! - [`FieldMissing`] — the key is absent from the source mapping.
//!
//! A field never appears in both. Entries found below the top level carry
//! the external names of their ancestors in `path`, outermost first.
//!
//! Two derived views turn mismatches into client-facing messages:
//! [`CompareResult::as_map`] (flat, keyed by bare field name) and
//! [`CompareResult::errors`] (a [`MismatchError`] tree keyed by path).

use std::collections::BTreeMap;
use std::fmt;

use mapschema_core::{format_path, type_name_with_article};
use serde::{Deserialize, Serialize};

/// A field whose source value cannot be converted to its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMismatch {
    /// External name of the field.
    pub field: String,
    /// Name of the declared type.
    pub expected: String,
    /// Name of the source value's type, `null` for null values.
    pub actual: String,
    /// External names of the enclosing fields, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}

impl FieldMismatch {
    /// The field name prefixed with its path, e.g. `address.city`.
    pub fn qualified_name(&self) -> String {
        format_path(&self.field, self.path.as_slice())
    }

    /// Client-facing description of the mismatch.
    pub fn message(&self) -> String {
        format!(
            "expected {} but it's {}",
            type_name_with_article(&self.expected),
            type_name_with_article(&self.actual),
        )
    }
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"expected "{}" to be {} but it's {}"#,
            self.qualified_name(),
            type_name_with_article(&self.expected),
            type_name_with_article(&self.actual),
        )
    }
}

/// A field whose key is absent from the source mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMissing {
    /// External name of the field.
    pub field: String,
    /// External names of the enclosing fields, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}

impl FieldMissing {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            path: Vec::new(),
        }
    }

    /// The field name prefixed with its path, e.g. `address.city`.
    pub fn qualified_name(&self) -> String {
        format_path(&self.field, self.path.as_slice())
    }
}

impl fmt::Display for FieldMissing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

/// Outcome of one comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareResult {
    /// Fields whose value has the wrong type.
    pub mismatched_fields: Vec<FieldMismatch>,
    /// Fields absent from the source.
    pub missing_fields: Vec<FieldMissing>,
}

impl CompareResult {
    /// True when nothing is missing or mismatched.
    pub fn is_ok(&self) -> bool {
        self.mismatched_fields.is_empty() && self.missing_fields.is_empty()
    }

    /// Maps each mismatched field's bare name to its message.
    ///
    /// Paths are not part of the key, so a later entry with the same name
    /// replaces an earlier one. Use [`errors`](Self::errors) when nested
    /// results matter.
    pub fn as_map(&self) -> BTreeMap<String, String> {
        self.mismatched_fields
            .iter()
            .map(|m| (m.field.clone(), m.message()))
            .collect()
    }

    /// Mismatches as a tree keyed by path segments.
    ///
    /// Returns `None` when there are no mismatches, even if fields are
    /// missing.
    pub fn errors(&self) -> Option<MismatchError> {
        if self.mismatched_fields.is_empty() {
            return None;
        }

        let mut root = MismatchError::default();
        for m in &self.mismatched_fields {
            root.insert(&m.path, &m.field, m.message());
        }
        Some(root)
    }
}

/// One node of a [`MismatchError`] tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MismatchEntry {
    /// Message for a mismatched field.
    Message(String),
    /// Mismatches below an intermediate record field.
    Nested(MismatchError),
}

/// Type mismatches keyed by field name, nested by path.
///
/// Serializes to plain nested JSON objects:
///
/// ```json
/// {"age": "expected an int but it's a string",
///  "address": {"city": "expected a string but it's null"}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MismatchError(BTreeMap<String, MismatchEntry>);

impl MismatchError {
    pub fn get(&self, key: &str) -> Option<&MismatchEntry> {
        self.0.get(key)
    }

    /// Follows `path` through nested entries and returns the leaf message.
    pub fn message_at<S: AsRef<str>>(&self, path: &[S], field: &str) -> Option<&str> {
        let mut node = self;
        for segment in path {
            match node.0.get(segment.as_ref())? {
                MismatchEntry::Nested(inner) => node = inner,
                MismatchEntry::Message(_) => return None,
            }
        }
        match node.0.get(field)? {
            MismatchEntry::Message(message) => Some(message.as_str()),
            MismatchEntry::Nested(_) => None,
        }
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MismatchEntry)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn insert(&mut self, path: &[String], field: &str, message: String) {
        let mut node = self;
        for segment in path {
            let entry = node
                .0
                .entry(segment.clone())
                .or_insert_with(|| MismatchEntry::Nested(MismatchError::default()));
            if let MismatchEntry::Message(_) = entry {
                *entry = MismatchEntry::Nested(MismatchError::default());
            }
            let MismatchEntry::Nested(inner) = entry else {
                return;
            };
            node = inner;
        }
        node.0.insert(field.to_string(), MismatchEntry::Message(message));
    }

    fn write_leaves(
        &self,
        prefix: &mut Vec<String>,
        first: &mut bool,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (key, entry) in &self.0 {
            match entry {
                MismatchEntry::Message(message) => {
                    if !*first {
                        f.write_str(", ")?;
                    }
                    *first = false;
                    write!(f, "{}: {message}", format_path(key, prefix.as_slice()))?;
                }
                MismatchEntry::Nested(inner) => {
                    prefix.push(key.clone());
                    inner.write_leaves(prefix, first, f)?;
                    prefix.pop();
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for MismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_leaves(&mut Vec::new(), &mut true, f)
    }
}

impl std::error::Error for MismatchError {}
