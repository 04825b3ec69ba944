//! Error types for conversion operations

use std::fmt;

/// Errors that can occur while converting between Markdown and blocks
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Empty input handed to the frontmatter extractor
    EmptyContent,
    /// An opening `---` delimiter without a closing `---`
    UnterminatedFrontmatter,
    /// YAML parse or emit failure in the frontmatter
    MalformedYaml(String),
    /// A `date` field that does not match the `YYYY-MM-DD HH:MM` layout
    InvalidDate(String),
    /// A frontmatter sequence containing a non-string element
    UnsupportedSliceType(String),
    /// A frontmatter field `type` outside the enumerated set
    UnknownFieldType(String),
    /// A heading level outside 1..=6
    InvalidLevel(u8),
    /// A block `type` tag the renderer does not know
    UnknownBlockType(String),
    /// A block that fails shape validation
    SchemaViolation {
        index: usize,
        field: String,
        reason: String,
    },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::EmptyContent => write!(f, "empty content"),
            ConvertError::UnterminatedFrontmatter => write!(f, "unterminated frontmatter"),
            ConvertError::MalformedYaml(cause) => {
                write!(f, "failed to parse frontmatter: {cause}")
            }
            ConvertError::InvalidDate(value) => write!(f, "failed to parse date: {value}"),
            ConvertError::UnsupportedSliceType(value) => {
                write!(f, "unsupported slice type: {value}")
            }
            ConvertError::UnknownFieldType(kind) => write!(f, "unknown field type: {kind}"),
            ConvertError::InvalidLevel(level) => {
                write!(f, "heading level {level} is outside 1..=6")
            }
            ConvertError::UnknownBlockType(kind) => {
                write!(f, "no handler found for block type {kind}")
            }
            ConvertError::SchemaViolation {
                index,
                field,
                reason,
            } => write!(f, "block {index}: invalid '{field}': {reason}"),
        }
    }
}

impl std::error::Error for ConvertError {}
