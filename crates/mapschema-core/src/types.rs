//! # Record Schemas — Static Shape of a Destination
//!
//! A destination record is described by a [`RecordSchema`]: its type name
//! and an ordered list of [`FieldDescriptor`]s. Each descriptor carries the
//! declared [`FieldType`], an optional external-name tag and an embedded
//! flag. Types that always have the same shape implement [`Record`] so the
//! schema is built in one place and reused for every comparison.
//!
//! ## External Names
//!
//! The tag sub-language mirrors the usual JSON tag convention:
//!
//! | Tag            | External name       |
//! |----------------|---------------------|
//! | none or `""`   | declared field name |
//! | `-`            | field is skipped    |
//! | `name,opts`    | `name`              |
//! | `,opts`        | declared field name |
//! | anything else  | the tag verbatim    |
//!
//! Only a bare `-` skips a field; `-,` names the field `-`.

use std::sync::Arc;

/// Static type of a destination field.
///
/// Scalar widths are kept distinct so the detailed naming policy can
/// report them exactly. `Named` wraps a user-named type around its
/// underlying representation; convertibility always looks through it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    /// Accepts any non-null value.
    Any,
    /// Optional value; the only kind of type that accepts null.
    Pointer(Box<FieldType>),
    /// Homogeneous list. Elements are never inspected.
    List(Box<FieldType>),
    /// String-keyed map. Values are never inspected.
    Map(Box<FieldType>),
    /// Nested record.
    Record(Arc<RecordSchema>),
    /// A user-named type, e.g. `Celsius` over `float64`.
    Named {
        /// Declared type name.
        name: String,
        /// Representation the name stands for.
        underlying: Box<FieldType>,
    },
}

impl FieldType {
    /// `*T`
    pub fn pointer(elem: FieldType) -> Self {
        Self::Pointer(Box::new(elem))
    }

    /// `[]T`
    pub fn list(elem: FieldType) -> Self {
        Self::List(Box::new(elem))
    }

    /// `map[string]T`
    pub fn map(elem: FieldType) -> Self {
        Self::Map(Box::new(elem))
    }

    pub fn record(schema: RecordSchema) -> Self {
        Self::Record(Arc::new(schema))
    }

    pub fn named(name: impl Into<String>, underlying: FieldType) -> Self {
        Self::Named {
            name: name.into(),
            underlying: Box::new(underlying),
        }
    }

    /// Strips any `Named` wrappers.
    pub fn underlying(&self) -> &FieldType {
        match self {
            Self::Named { underlying, .. } => underlying.underlying(),
            other => other,
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.underlying(), Self::Pointer(_))
    }

    /// The pointee of a pointer type.
    pub fn elem(&self) -> Option<&FieldType> {
        match self.underlying() {
            Self::Pointer(elem) => Some(elem.as_ref()),
            _ => None,
        }
    }

    /// Returns the schema when this type is itself a record.
    pub fn as_record(&self) -> Option<&RecordSchema> {
        match self.underlying() {
            Self::Record(schema) => Some(schema.as_ref()),
            _ => None,
        }
    }

    /// Returns the schema when this type is a record, directly or through
    /// one level of pointer.
    pub fn record_shape(&self) -> Option<&RecordSchema> {
        self.as_record()
            .or_else(|| self.elem().and_then(FieldType::as_record))
    }

    pub fn is_signed_integer(&self) -> bool {
        matches!(
            self.underlying(),
            Self::Int | Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64
        )
    }

    pub fn is_unsigned_integer(&self) -> bool {
        matches!(
            self.underlying(),
            Self::Uint | Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64
        )
    }

    pub fn is_integer(&self) -> bool {
        self.is_signed_integer() || self.is_unsigned_integer()
    }

    pub fn is_float(&self) -> bool {
        matches!(self.underlying(), Self::Float32 | Self::Float64)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }
}

/// One field of a [`RecordSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Declared field name.
    pub name: String,
    /// Declared field type.
    pub ty: FieldType,
    /// External-name tag, see the module docs.
    pub tag: Option<String>,
    /// Embedded fields are compared as if declared on the parent.
    pub embedded: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            tag: None,
            embedded: false,
        }
    }

    /// Attach an external-name tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Mark the field as embedded.
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Resolves the name this field is looked up by in a source mapping.
    ///
    /// Returns `None` when the field is tagged to be skipped.
    pub fn external_name(&self) -> Option<&str> {
        let tag = match self.tag.as_deref() {
            None | Some("") => return Some(self.name.as_str()),
            Some(tag) => tag,
        };

        if tag == "-" {
            return None;
        }

        match tag.find(',') {
            Some(0) => Some(self.name.as_str()),
            Some(i) => Some(&tag[..i]),
            None => Some(tag),
        }
    }
}

/// Ordered field list of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl RecordSchema {
    /// Start an empty schema for the record type `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field with no tag.
    pub fn field(self, name: impl Into<String>, ty: FieldType) -> Self {
        self.with_field(FieldDescriptor::new(name, ty))
    }

    /// Append a field with an external-name tag.
    pub fn tagged(self, name: impl Into<String>, ty: FieldType, tag: impl Into<String>) -> Self {
        self.with_field(FieldDescriptor::new(name, ty).with_tag(tag))
    }

    /// Append an embedded record. The field takes the embedded type's name.
    pub fn embed(self, schema: RecordSchema) -> Self {
        let name = schema.name.clone();
        self.with_field(FieldDescriptor::new(name, FieldType::record(schema)).embedded())
    }

    /// Append a prebuilt descriptor.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The record as a value type.
    pub fn into_type(self) -> FieldType {
        FieldType::record(self)
    }

    /// A reference to the record, the shape comparison destinations take.
    pub fn into_reference(self) -> FieldType {
        FieldType::pointer(self.into_type())
    }
}

/// A Rust type with a fixed record shape.
///
/// ```
/// use mapschema_core::{FieldType, Record, RecordSchema};
///
/// struct Person;
///
/// impl Record for Person {
///     fn schema() -> RecordSchema {
///         RecordSchema::new("Person")
///             .tagged("FirstName", FieldType::String, "first_name")
///             .tagged("Age", FieldType::Int, "age")
///     }
/// }
///
/// assert_eq!(Person::schema().fields().len(), 2);
/// ```
pub trait Record {
    fn schema() -> RecordSchema;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tag: &str) -> FieldDescriptor {
        FieldDescriptor::new("Field", FieldType::String).with_tag(tag)
    }

    #[test]
    fn external_name_defaults_to_field_name() {
        let f = FieldDescriptor::new("Field", FieldType::String);
        assert_eq!(f.external_name(), Some("Field"));
        assert_eq!(tagged("").external_name(), Some("Field"));
    }

    #[test]
    fn external_name_bare_hyphen_skips() {
        assert_eq!(tagged("-").external_name(), None);
    }

    #[test]
    fn external_name_hyphen_comma_is_a_name() {
        assert_eq!(tagged("-,").external_name(), Some("-"));
        assert_eq!(tagged("-,omitempty").external_name(), Some("-"));
    }

    #[test]
    fn external_name_truncates_at_first_comma() {
        assert_eq!(tagged("a,omitempty").external_name(), Some("a"));
        assert_eq!(tagged("a,omitempty,string").external_name(), Some("a"));
        assert_eq!(tagged(",omitempty").external_name(), Some("Field"));
    }

    #[test]
    fn external_name_verbatim() {
        assert_eq!(tagged("first_name").external_name(), Some("first_name"));
    }

    #[test]
    fn record_shape_looks_through_one_pointer() {
        let inner = RecordSchema::new("Inner").field("X", FieldType::Int);
        let direct = inner.clone().into_type();
        let ptr = inner.clone().into_reference();
        let ptr_ptr = FieldType::pointer(ptr.clone());

        assert_eq!(direct.record_shape().map(RecordSchema::name), Some("Inner"));
        assert_eq!(ptr.record_shape().map(RecordSchema::name), Some("Inner"));
        assert!(ptr_ptr.record_shape().is_none());
        assert!(FieldType::Int.record_shape().is_none());
    }

    #[test]
    fn named_types_classify_by_underlying() {
        let celsius = FieldType::named("Celsius", FieldType::Float64);
        let id = FieldType::named("UserId", FieldType::Uint32);

        assert!(celsius.is_float());
        assert!(!celsius.is_integer());
        assert!(id.is_unsigned_integer());
        assert!(!id.is_signed_integer());
    }

    #[test]
    fn embed_uses_embedded_type_name() {
        let base = RecordSchema::new("Base").field("Foo", FieldType::String);
        let outer = RecordSchema::new("Outer").embed(base).field("Bar", FieldType::Bool);

        let first = &outer.fields()[0];
        assert_eq!(first.name, "Base");
        assert!(first.embedded);
        assert_eq!(outer.fields()[1].name, "Bar");
    }
}
