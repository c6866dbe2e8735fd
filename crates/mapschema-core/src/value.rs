//! # Source Values — Dynamically-Typed Input
//!
//! [`SourceValue`] is the shape a deserializer hands to the comparison
//! engine. The conversions in this module define the collaborator contract:
//!
//! 1. JSON numbers always become [`SourceValue::Float`], never `Int`.
//! 2. JSON `null` becomes [`SourceValue::Null`], which is distinct from an
//!    absent key.
//! 3. Objects become nested [`SourceMap`]s.
//!
//! YAML distinguishes integers from floats, so YAML integers are kept as
//! [`SourceValue::Int`]. Tags are ignored and only the tagged value is
//! converted.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::SourceError;
use crate::types::FieldType;

/// String-keyed mapping of source values.
pub type SourceMap = BTreeMap<String, SourceValue>;

/// A dynamically-typed value produced by a deserializer.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<SourceValue>),
    Map(SourceMap),
}

impl SourceValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_map(&self) -> Option<&SourceMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The static type this value carries at runtime, or `None` for null.
    pub fn runtime_type(&self) -> Option<FieldType> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(FieldType::Bool),
            Self::Int(_) => Some(FieldType::Int64),
            Self::Float(_) => Some(FieldType::Float64),
            Self::String(_) => Some(FieldType::String),
            Self::List(_) => Some(FieldType::list(FieldType::Any)),
            Self::Map(_) => Some(FieldType::map(FieldType::Any)),
        }
    }

    /// Convert a YAML value tree.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::UnsupportedKey` if a mapping key is itself a
    /// sequence or mapping.
    pub fn from_yaml(yaml: &serde_yaml::Value) -> Result<Self, SourceError> {
        match yaml {
            serde_yaml::Value::Null => Ok(Self::Null),
            serde_yaml::Value::Bool(b) => Ok(Self::Bool(*b)),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Int(i))
                } else {
                    // u64 above i64::MAX and real floats both land here.
                    Ok(Self::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_yaml::Value::String(s) => Ok(Self::String(s.clone())),
            serde_yaml::Value::Sequence(seq) => {
                let items: Result<Vec<_>, _> = seq.iter().map(Self::from_yaml).collect();
                Ok(Self::List(items?))
            }
            serde_yaml::Value::Mapping(mapping) => {
                let mut map = SourceMap::new();
                for (k, v) in mapping {
                    let key = match k {
                        serde_yaml::Value::String(s) => s.clone(),
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        serde_yaml::Value::Null => "null".to_string(),
                        other => return Err(SourceError::UnsupportedKey(format!("{other:?}"))),
                    };
                    map.insert(key, Self::from_yaml(v)?);
                }
                Ok(Self::Map(map))
            }
            serde_yaml::Value::Tagged(tagged) => Self::from_yaml(&tagged.value),
        }
    }
}

impl From<Value> for SourceValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            // Without arbitrary precision every JSON number has an f64 form.
            Value::Number(n) => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&Value> for SourceValue {
    fn from(value: &Value) -> Self {
        Self::from(value.clone())
    }
}

impl From<bool> for SourceValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for SourceValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for SourceValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for SourceValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for SourceValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<SourceMap> for SourceValue {
    fn from(map: SourceMap) -> Self {
        Self::Map(map)
    }
}

fn into_mapping(value: SourceValue) -> Result<SourceMap, SourceError> {
    match value {
        SourceValue::Map(map) => Ok(map),
        other => Err(SourceError::NotAMapping {
            found: match other.runtime_type() {
                Some(ty) => crate::naming::detailed_type_name(&ty),
                None => "null".to_string(),
            },
        }),
    }
}

/// Convert a JSON value whose top level must be an object.
///
/// # Errors
///
/// Returns `SourceError::NotAMapping` for any other top-level value.
pub fn json_object(value: Value) -> Result<SourceMap, SourceError> {
    into_mapping(SourceValue::from(value))
}

/// Parse JSON text whose top level must be an object.
///
/// # Errors
///
/// Returns `SourceError::InvalidJson` if the text does not parse and
/// `SourceError::NotAMapping` if it is not an object.
pub fn parse_json_object(input: &str) -> Result<SourceMap, SourceError> {
    let value: Value = serde_json::from_str(input)?;
    json_object(value)
}

/// Parse YAML text whose top level must be a mapping.
///
/// # Errors
///
/// Returns `SourceError::InvalidYaml` if the text does not parse,
/// `SourceError::UnsupportedKey` for non-scalar keys, and
/// `SourceError::NotAMapping` if it is not a mapping.
pub fn parse_yaml_object(input: &str) -> Result<SourceMap, SourceError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(input)?;
    into_mapping(SourceValue::from_yaml(&yaml)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_numbers_are_always_floats() {
        let map = json_object(json!({"a": 1, "b": -2, "c": 1.5})).unwrap();
        assert_eq!(map["a"], SourceValue::Float(1.0));
        assert_eq!(map["b"], SourceValue::Float(-2.0));
        assert_eq!(map["c"], SourceValue::Float(1.5));
    }

    #[test]
    fn json_null_is_distinct_from_absent() {
        let map = parse_json_object(r#"{"a": null}"#).unwrap();
        assert_eq!(map.get("a"), Some(&SourceValue::Null));
        assert_eq!(map.get("b"), None);
    }

    #[test]
    fn json_nested_objects_become_maps() {
        let map = parse_json_object(r#"{"outer": {"inner": "x"}}"#).unwrap();
        let outer = map["outer"].as_map().unwrap();
        assert_eq!(outer["inner"], SourceValue::from("x"));
    }

    #[test]
    fn json_top_level_must_be_object() {
        let err = parse_json_object("[1, 2]").unwrap_err();
        match err {
            SourceError::NotAMapping { found } => assert_eq!(found, "[]any"),
            other => panic!("expected NotAMapping, got: {other}"),
        }

        let err = parse_json_object("null").unwrap_err();
        assert!(matches!(err, SourceError::NotAMapping { ref found } if found == "null"));
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = parse_json_object("{not json").unwrap_err();
        assert!(matches!(err, SourceError::InvalidJson(_)));
    }

    #[test]
    fn yaml_keeps_integers() {
        let yaml = r#"
name: Jessie
age: 26
height: 1.75
tags:
  - one
  - two
address:
  city: ~
"#;
        let map = parse_yaml_object(yaml).unwrap();
        assert_eq!(map["name"], SourceValue::from("Jessie"));
        assert_eq!(map["age"], SourceValue::Int(26));
        assert_eq!(map["height"], SourceValue::Float(1.75));
        assert_eq!(
            map["tags"],
            SourceValue::List(vec![SourceValue::from("one"), SourceValue::from("two")])
        );
        assert_eq!(map["address"].as_map().unwrap()["city"], SourceValue::Null);
    }

    #[test]
    fn yaml_scalar_keys_are_stringified() {
        let map = parse_yaml_object("1: a\ntrue: b\n").unwrap();
        assert_eq!(map["1"], SourceValue::from("a"));
        assert_eq!(map["true"], SourceValue::from("b"));
    }

    #[test]
    fn runtime_types() {
        assert_eq!(SourceValue::Null.runtime_type(), None);
        assert_eq!(SourceValue::from(true).runtime_type(), Some(FieldType::Bool));
        assert_eq!(SourceValue::from(3_i64).runtime_type(), Some(FieldType::Int64));
        assert_eq!(SourceValue::from(3.0).runtime_type(), Some(FieldType::Float64));
        assert_eq!(
            SourceValue::Map(SourceMap::new()).runtime_type(),
            Some(FieldType::map(FieldType::Any))
        );
    }
}
