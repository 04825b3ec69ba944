//! Frontmatter codec: YAML header ↔ typed field list
//!
//! A document may open with a YAML region delimited by `---` (or `---yaml`)
//! lines. Each scalar becomes a [`FrontmatterField`] typed by its runtime
//! value; the special key `date` is parsed against a fixed layout. Fields
//! keep exactly one populated value slot so the JSON wire shape matches the
//! editor's expectations.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::ConvertError;

/// The layout of the `date` field, e.g. `2024-07-01 09:30`.
pub const DATE_LAYOUT: &str = "%Y-%m-%d %H:%M";

/// Keys that always serialize first, in this order.
const PRIORITY_FIELDS: [&str; 6] = [
    "title",
    "date",
    "description",
    "category",
    "categories",
    "tags",
];

/// Wire names of every field type, used when decoding editor payloads.
const FIELD_TYPES: [&str; 5] = ["string", "bool", "number", "dateTime", "stringSlice"];

/// One typed frontmatter entry. Only the slot matching `field_type` is
/// populated; the rest stay zero-valued.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontmatterField {
    pub name: String,
    pub string_value: String,
    pub bool_value: bool,
    pub number_value: f64,
    pub date_time_value: Option<NaiveDateTime>,
    pub string_slice_value: Vec<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    #[default]
    #[serde(rename = "string")]
    String,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "dateTime")]
    DateTime,
    #[serde(rename = "stringSlice")]
    StringSlice,
}

/// Splits a document into its typed frontmatter fields and Markdown body.
///
/// Without an opening delimiter on the first line the whole input is body.
/// Otherwise the region up to the next line whose trimmed content is `---`
/// is parsed as YAML; a missing terminator is an error. CRLF line endings
/// are normalized to LF before any parsing.
pub fn extract_front_matter(
    content: &str,
) -> Result<(Vec<FrontmatterField>, String), ConvertError> {
    let content = content.replace("\r\n", "\n");
    if content.is_empty() {
        return Err(ConvertError::EmptyContent);
    }

    let mut lines = content.split('\n');
    let first_line = lines.next().unwrap_or_default();
    if first_line != "---" && first_line != "---yaml" {
        // No frontmatter, the entire content is the body.
        return Ok((Vec::new(), content.clone()));
    }

    let mut yaml = String::new();
    let mut in_front_matter = true;
    for line in lines.by_ref() {
        if line.trim() == "---" {
            in_front_matter = false;
            break;
        }
        yaml.push_str(line);
        yaml.push('\n');
    }
    if in_front_matter {
        return Err(ConvertError::UnterminatedFrontmatter);
    }

    let mut body = String::new();
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }
    // split('\n') yields a trailing empty segment when the content ends with
    // a newline; drop the extra line it would add to the body.
    if content.ends_with('\n') && body.ends_with('\n') {
        body.pop();
    }

    let mapping: Mapping = if yaml.trim().is_empty() {
        Mapping::new()
    } else {
        serde_yaml::from_str(&yaml).map_err(|e| ConvertError::MalformedYaml(e.to_string()))?
    };

    let fields = parse_frontmatter_fields(&mapping)?;
    Ok((fields, body))
}

fn parse_frontmatter_fields(mapping: &Mapping) -> Result<Vec<FrontmatterField>, ConvertError> {
    let mut fields = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let name = key
            .as_str()
            .ok_or_else(|| ConvertError::MalformedYaml(format!("non-string key: {key:?}")))?
            .to_string();

        let field = if name == "date" {
            let raw = value
                .as_str()
                .ok_or_else(|| ConvertError::InvalidDate(format!("{value:?}")))?;
            let parsed = NaiveDateTime::parse_from_str(raw, DATE_LAYOUT)
                .map_err(|_| ConvertError::InvalidDate(raw.to_string()))?;
            FrontmatterField {
                name,
                date_time_value: Some(parsed),
                field_type: FieldType::DateTime,
                ..Default::default()
            }
        } else {
            match value {
                Value::String(s) => FrontmatterField {
                    name,
                    string_value: s.clone(),
                    field_type: FieldType::String,
                    ..Default::default()
                },
                Value::Bool(b) => FrontmatterField {
                    name,
                    bool_value: *b,
                    field_type: FieldType::Bool,
                    ..Default::default()
                },
                Value::Number(n) => FrontmatterField {
                    name,
                    number_value: n.as_f64().unwrap_or_default(),
                    field_type: FieldType::Number,
                    ..Default::default()
                },
                Value::Sequence(seq) => {
                    let mut items = Vec::with_capacity(seq.len());
                    for item in seq {
                        match item.as_str() {
                            Some(s) => items.push(s.to_string()),
                            None => {
                                return Err(ConvertError::UnsupportedSliceType(format!(
                                    "{item:?}"
                                )))
                            }
                        }
                    }
                    FrontmatterField {
                        name,
                        string_slice_value: items,
                        field_type: FieldType::StringSlice,
                        ..Default::default()
                    }
                }
                other => {
                    return Err(ConvertError::MalformedYaml(format!(
                        "unsupported value for '{name}': {other:?}"
                    )))
                }
            }
        };
        fields.push(field);
    }

    Ok(order_fields(fields))
}

/// Applies the canonical field order: the priority keys first, then the
/// remaining non-bool fields alphabetically, then bool fields alphabetically.
fn order_fields(mut fields: Vec<FrontmatterField>) -> Vec<FrontmatterField> {
    let mut ordered = Vec::with_capacity(fields.len());
    for name in PRIORITY_FIELDS {
        if let Some(pos) = fields.iter().position(|f| f.name == name) {
            ordered.push(fields.remove(pos));
        }
    }

    let (mut bools, mut rest): (Vec<_>, Vec<_>) = fields
        .into_iter()
        .partition(|f| f.field_type == FieldType::Bool);
    rest.sort_by(|a, b| a.name.cmp(&b.name));
    bools.sort_by(|a, b| a.name.cmp(&b.name));

    ordered.extend(rest);
    ordered.extend(bools);
    ordered
}

/// Serializes fields back into a delimited YAML header.
///
/// Fields render in the order given; dates render back through the fixed
/// layout; integral numbers stay integers. An empty field list collapses to
/// bare delimiters.
pub fn frontmatter_fields_to_yaml(fields: &[FrontmatterField]) -> Result<String, ConvertError> {
    if fields.is_empty() {
        return Ok("---\n---\n".to_string());
    }

    let mut mapping = Mapping::new();
    for field in fields {
        let value = match field.field_type {
            FieldType::String => Value::String(field.string_value.clone()),
            FieldType::Bool => Value::Bool(field.bool_value),
            FieldType::Number => number_value(field.number_value),
            FieldType::DateTime => {
                let date = field.date_time_value.ok_or_else(|| {
                    ConvertError::InvalidDate(format!("field '{}' has no value", field.name))
                })?;
                Value::String(date.format(DATE_LAYOUT).to_string())
            }
            FieldType::StringSlice => Value::Sequence(
                field
                    .string_slice_value
                    .iter()
                    .cloned()
                    .map(Value::String)
                    .collect(),
            ),
        };
        mapping.insert(Value::String(field.name.clone()), value);
    }

    let yaml =
        serde_yaml::to_string(&mapping).map_err(|e| ConvertError::MalformedYaml(e.to_string()))?;
    Ok(format!("---\n{yaml}---\n"))
}

fn number_value(number: f64) -> Value {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        Value::Number(serde_yaml::Number::from(number as i64))
    } else {
        Value::Number(serde_yaml::Number::from(number))
    }
}

/// Decodes an editor payload into fields, reporting the offending element.
pub fn fields_from_json(json: &str) -> Result<Vec<FrontmatterField>, ConvertError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| ConvertError::MalformedYaml(e.to_string()))?;

    let mut fields = Vec::with_capacity(values.len());
    for value in values {
        let type_tag = value
            .get("type")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();
        if !FIELD_TYPES.contains(&type_tag.as_str()) {
            return Err(ConvertError::UnknownFieldType(type_tag));
        }
        let field = serde_json::from_value(value)
            .map_err(|e| ConvertError::MalformedYaml(e.to_string()))?;
        fields.push(field);
    }
    Ok(fields)
}
