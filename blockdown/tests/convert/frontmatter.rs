//! Frontmatter integration tests
//!
//! Field typing, canonical ordering, and the JSON wire shape the editor
//! exchanges.

use blockdown::{extract_front_matter, frontmatter_fields_to_yaml, FieldType};
use serde_json::json;

#[test]
fn test_field_ordering_and_body() {
    let source = "---\ntags: [x, y]\ntitle: Hello\ndraft: true\nzzz: 1\n---\nbody\n";
    let (fields, body) = extract_front_matter(source).unwrap();

    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["title", "tags", "zzz", "draft"]);
    assert_eq!(body, "body\n");
}

#[test]
fn test_field_typing() {
    let source = "---\ntitle: Hello\ndate: 2024-07-01 09:30\ncount: 2.5\ndraft: false\ntags: [a]\n---\n";
    let (fields, _) = extract_front_matter(source).unwrap();

    let by_name = |name: &str| fields.iter().find(|f| f.name == name).unwrap();
    assert_eq!(by_name("title").field_type, FieldType::String);
    assert_eq!(by_name("title").string_value, "Hello");
    assert_eq!(by_name("date").field_type, FieldType::DateTime);
    assert_eq!(by_name("count").field_type, FieldType::Number);
    assert_eq!(by_name("count").number_value, 2.5);
    assert_eq!(by_name("draft").field_type, FieldType::Bool);
    assert!(!by_name("draft").bool_value);
    assert_eq!(by_name("tags").field_type, FieldType::StringSlice);
    assert_eq!(by_name("tags").string_slice_value, vec!["a"]);
}

#[test]
fn test_field_wire_shape() {
    let (fields, _) = extract_front_matter("---\ntitle: Hello\n---\n").unwrap();
    let value = serde_json::to_value(&fields[0]).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "title",
            "stringValue": "Hello",
            "boolValue": false,
            "numberValue": 0.0,
            "dateTimeValue": null,
            "stringSliceValue": [],
            "type": "string",
        })
    );
}

#[test]
fn test_yaml_delimiter_variants() {
    let (fields, body) = extract_front_matter("---yaml\ntitle: x\n---\nrest\n").unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(body, "rest\n");
}

#[test]
fn test_date_survives_round_trip() {
    let (fields, _) = extract_front_matter("---\ndate: 2024-07-01 09:30\n---\n").unwrap();
    let yaml = frontmatter_fields_to_yaml(&fields).unwrap();
    assert!(yaml.contains("2024-07-01 09:30"));

    let rebuilt = format!("{yaml}body\n");
    let (fields_again, _) = extract_front_matter(&rebuilt).unwrap();
    assert_eq!(fields_again, fields);
}
