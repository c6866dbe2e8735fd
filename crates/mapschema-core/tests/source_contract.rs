//! Integration test: the deserializer contract the comparison engine relies
//! on, and the natural-language helpers used in its reports.

use mapschema_core::{
    format_path, json_object, parse_json_object, type_name_with_article, SourceMap, SourceValue,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn contains_int(value: &SourceValue) -> bool {
    match value {
        SourceValue::Int(_) => true,
        SourceValue::List(items) => items.iter().any(contains_int),
        SourceValue::Map(map) => map.values().any(contains_int),
        _ => false,
    }
}

#[test]
fn decoded_request_body_shape() {
    let src = parse_json_object(
        r#"{
            "first_name": "Jessie",
            "age": 26,
            "tags": ["a", 1],
            "address": {"country": "US", "city": null}
        }"#,
    )
    .unwrap();

    assert_eq!(src["first_name"], SourceValue::from("Jessie"));
    assert_eq!(src["age"], SourceValue::Float(26.0));
    assert_eq!(
        src["tags"],
        SourceValue::List(vec![SourceValue::from("a"), SourceValue::Float(1.0)])
    );

    let mut address = SourceMap::new();
    address.insert("country".to_string(), SourceValue::from("US"));
    address.insert("city".to_string(), SourceValue::Null);
    assert_eq!(src["address"], SourceValue::Map(address));
}

proptest! {
    /// JSON never yields integer source values, at any depth.
    #[test]
    fn json_numbers_never_become_ints(n in any::<i64>(), f in -1e9f64..1e9) {
        let value: Value = json!({"n": n, "nested": {"f": f, "list": [n, f]}});
        let src = json_object(value).unwrap();
        prop_assert!(!src.values().any(contains_int));
    }

    /// Every article form is either `null`, `a <name>` or `an <name>`.
    #[test]
    fn article_prefixes_the_name(name in "\\*?[a-zA-Z][a-zA-Z0-9]{0,10}") {
        let with_article = type_name_with_article(&name);
        prop_assert!(
            name == "null"
                || with_article == format!("a {name}")
                || with_article == format!("an {name}"),
            "unexpected article form: {}", with_article
        );
    }

    /// Splitting a formatted path on `.` recovers the segments.
    #[test]
    fn path_segments_round_trip(
        path in prop::collection::vec("[a-z_]{1,8}", 0..5),
        field in "[a-z_]{1,8}",
    ) {
        let formatted = format_path(&field, path.as_slice());
        let mut expected = path.clone();
        expected.push(field);
        let segments: Vec<String> = formatted.split('.').map(str::to_string).collect();
        prop_assert_eq!(segments, expected);
    }
}
