//! # Comparison Engine
//!
//! Walks a destination [`RecordSchema`] in declaration order and checks
//! each field against a [`SourceMap`]:
//!
//! 1. Key absent: the field is recorded as missing.
//! 2. Key present, value not convertible: the field is recorded as a
//!    mismatch. Nothing below it is inspected.
//! 3. Key present, convertible, and the field is a record (or a pointer to
//!    one) holding a mapping: the walk descends into it. Everything found
//!    below gets the field's external name prepended to its path.
//! 4. Otherwise the field matches and nothing is recorded.
//!
//! Embedded fields are expanded in place, as if their fields were declared
//! on the parent, without adding a path segment. Fields tagged `-` are
//! ignored entirely.
//!
//! The engine never mutates the destination, the source or the options,
//! and allocates nothing that outlives the call.

use mapschema_core::{CompareError, FieldType, Record, RecordSchema, SourceMap};
use tracing::{debug, trace};

use crate::options::{CompareOptions, ResolvedOptions};
use crate::result::{CompareResult, FieldMismatch, FieldMissing};

/// Checks `source` against the record `destination` refers to.
///
/// `destination` must be a pointer to a record type, mirroring a decode
/// target passed by reference. `options` may be `None` or partially set;
/// unset hooks use the defaults.
///
/// # Errors
///
/// Returns `CompareError::InvalidDestination` if `destination` is `None` or
/// is not a pointer to a record, and `CompareError::NilSource` if `source`
/// is `None`. Missing and mismatched fields are never errors.
///
/// # Example
///
/// ```
/// use mapschema_compare::compare_map_to_struct;
/// use mapschema_core::{parse_json_object, FieldType, RecordSchema};
///
/// let person = RecordSchema::new("Person")
///     .tagged("FirstName", FieldType::String, "first_name")
///     .tagged("Age", FieldType::Int, "age")
///     .into_reference();
/// let source = parse_json_object(r#"{"age": "26"}"#).unwrap();
///
/// let result = compare_map_to_struct(Some(&person), Some(&source), None).unwrap();
/// assert_eq!(result.missing_fields[0].field, "first_name");
/// assert_eq!(result.mismatched_fields[0].message(), "expected an int but it's a string");
/// ```
pub fn compare_map_to_struct(
    destination: Option<&FieldType>,
    source: Option<&SourceMap>,
    options: Option<&CompareOptions>,
) -> Result<CompareResult, CompareError> {
    let schema = destination
        .and_then(FieldType::elem)
        .and_then(FieldType::as_record)
        .ok_or(CompareError::InvalidDestination)?;
    let source = source.ok_or(CompareError::NilSource)?;

    Ok(run(schema, source, options))
}

/// Checks `source` against the schema of `R`.
///
/// The destination is valid by construction, so this cannot fail.
pub fn compare_record<R: Record>(
    source: &SourceMap,
    options: Option<&CompareOptions>,
) -> CompareResult {
    run(&R::schema(), source, options)
}

fn run(
    schema: &RecordSchema,
    source: &SourceMap,
    options: Option<&CompareOptions>,
) -> CompareResult {
    debug!(
        record = schema.name(),
        fields = schema.fields().len(),
        keys = source.len(),
        "comparing source mapping to record"
    );

    let mut results = CompareResult::default();
    let walker = Walker {
        opts: CompareOptions::resolve(options),
    };
    walker.compare(schema, source, &mut results);

    debug!(
        record = schema.name(),
        mismatched = results.mismatched_fields.len(),
        missing = results.missing_fields.len(),
        "comparison finished"
    );
    results
}

struct Walker<'a> {
    opts: ResolvedOptions<'a>,
}

impl Walker<'_> {
    fn compare(&self, schema: &RecordSchema, source: &SourceMap, results: &mut CompareResult) {
        for field in schema.fields() {
            let Some(name) = field.external_name() else {
                trace!(field = %field.name, "skipped by tag");
                continue;
            };

            if field.embedded {
                if let Some(embedded) = field.ty.record_shape() {
                    trace!(
                        field = %field.name,
                        record = embedded.name(),
                        "expanding embedded record"
                    );
                    self.compare(embedded, source, results);
                    continue;
                }
            }

            let Some(value) = source.get(name) else {
                trace!(field = name, "missing");
                results.missing_fields.push(FieldMissing::new(name));
                continue;
            };

            if !self.opts.convertible.can_convert(&field.ty, value) {
                let actual = match value.runtime_type() {
                    Some(ty) => self.opts.type_name.type_name(&ty),
                    None => "null".to_string(),
                };
                let expected = self.opts.type_name.type_name(&field.ty);
                trace!(field = name, %expected, %actual, "type mismatch");
                results.mismatched_fields.push(FieldMismatch {
                    field: name.to_string(),
                    expected,
                    actual,
                    path: Vec::new(),
                });
                continue;
            }

            if let (Some(nested), Some(map)) = (field.ty.record_shape(), value.as_map()) {
                let mismatched_before = results.mismatched_fields.len();
                let missing_before = results.missing_fields.len();

                self.compare(nested, map, results);

                for m in &mut results.mismatched_fields[mismatched_before..] {
                    m.path.insert(0, name.to_string());
                }
                for m in &mut results.missing_fields[missing_before..] {
                    m.path.insert(0, name.to_string());
                }
            }
        }
    }
}
