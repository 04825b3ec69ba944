//! The block model shared by both conversion directions
//!
//! A block is a tagged unit of editor content. On the wire each block is a
//! `{"type": ..., "data": {...}}` pair; in here it is a closed enum so both
//! the parser and the renderer can pattern-match instead of poking at maps.
//!
//! Rich-text fields (`text`, `content`, `caption`, `message`) hold restricted
//! inline HTML: emphasis, links, inline code with the `inline-code` class,
//! images and line breaks. Plain-text fields (table cells, image captions)
//! hold unmarked strings.

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;
use crate::link_meta::LinkMeta;

/// A typed unit of editor content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Block {
    #[serde(rename = "header")]
    Header(HeaderData),
    #[serde(rename = "paragraph")]
    Paragraph(ParagraphData),
    #[serde(rename = "list")]
    List(ListData),
    #[serde(rename = "quote")]
    Quote(QuoteData),
    #[serde(rename = "alert")]
    Alert(AlertData),
    #[serde(rename = "code")]
    Code(CodeData),
    #[serde(rename = "table")]
    Table(TableData),
    #[serde(rename = "delimiter")]
    Delimiter(DelimiterData),
    #[serde(rename = "image")]
    Image(ImageData),
    #[serde(rename = "linkTool")]
    LinkTool(LinkToolData),
    #[serde(rename = "raw")]
    Raw(RawData),
}

impl Block {
    /// The wire name of this block's type tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Header(_) => "header",
            Block::Paragraph(_) => "paragraph",
            Block::List(_) => "list",
            Block::Quote(_) => "quote",
            Block::Alert(_) => "alert",
            Block::Code(_) => "code",
            Block::Table(_) => "table",
            Block::Delimiter(_) => "delimiter",
            Block::Image(_) => "image",
            Block::LinkTool(_) => "linkTool",
            Block::Raw(_) => "raw",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderData {
    pub text: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphData {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListData {
    pub style: ListStyle,
    pub meta: ListMeta,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Unordered,
    Ordered,
    Checklist,
}

/// Counter metadata for ordered lists. Empty for every other style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(rename = "counterType", skip_serializing_if = "Option::is_none")]
    pub counter_type: Option<CounterType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CounterType {
    Decimal,
    LowerRoman,
    UpperRoman,
    LowerAlpha,
    UpperAlpha,
    Unknown,
}

/// One list entry. `checked` is present exactly when the list style is
/// `checklist`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub content: String,
    pub items: Vec<ListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteData {
    pub text: String,
    pub caption: String,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertData {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub align: Alignment,
    // Older payloads used "text" for the message body.
    #[serde(alias = "text")]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Primary,
    Success,
    Secondary,
    Warning,
    Danger,
    /// Produced for unrecognized alert tokens on import; has no Markdown form.
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeData {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    pub with_headings: bool,
    pub stretched: bool,
    /// Rectangular grid of plain-text cells, row major.
    pub content: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelimiterData {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub file: ImageFile,
    pub caption: String,
    pub with_border: bool,
    pub with_background: bool,
    pub stretched: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFile {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkToolData {
    pub link: String,
    pub meta: LinkMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawData {
    pub html: String,
}

/// Hard cap on list-item nesting; conversion recurses per level.
const MAX_ITEM_DEPTH: usize = 64;

/// Wire names of every block type, used when decoding editor payloads.
const BLOCK_TYPES: [&str; 11] = [
    "header",
    "paragraph",
    "list",
    "quote",
    "alert",
    "code",
    "table",
    "delimiter",
    "image",
    "linkTool",
    "raw",
];

/// Validates that each block matches its declared shape.
///
/// Both conversion directions run this at their boundary. Heading levels are
/// deliberately not checked here; the renderer reports them as
/// [`ConvertError::InvalidLevel`] so the two failure modes stay distinct.
pub fn validate_blocks(blocks: &[Block]) -> Result<(), ConvertError> {
    for (index, block) in blocks.iter().enumerate() {
        match block {
            Block::List(data) => validate_list(index, data)?,
            Block::Table(data) => validate_table(index, data)?,
            Block::LinkTool(data) => validate_link_tool(index, data)?,
            _ => {}
        }
    }
    Ok(())
}

fn validate_list(index: usize, data: &ListData) -> Result<(), ConvertError> {
    let checklist = data.style == ListStyle::Checklist;
    if checklist && (data.meta.start.is_some() || data.meta.counter_type.is_some()) {
        return Err(ConvertError::SchemaViolation {
            index,
            field: "meta".to_string(),
            reason: "checklists carry no counter metadata".to_string(),
        });
    }
    if let Some(start) = data.meta.start {
        if start < 1 {
            return Err(ConvertError::SchemaViolation {
                index,
                field: "meta.start".to_string(),
                reason: "ordered lists start at 1 or above".to_string(),
            });
        }
    }
    validate_items(index, &data.items, checklist, 0)
}

fn validate_items(
    index: usize,
    items: &[ListItem],
    checklist: bool,
    depth: usize,
) -> Result<(), ConvertError> {
    if depth > MAX_ITEM_DEPTH {
        return Err(ConvertError::SchemaViolation {
            index,
            field: "items".to_string(),
            reason: format!("items nest deeper than {MAX_ITEM_DEPTH} levels"),
        });
    }
    for item in items {
        if checklist && item.checked.is_none() {
            return Err(ConvertError::SchemaViolation {
                index,
                field: "items.checked".to_string(),
                reason: "checklist items need a checked flag".to_string(),
            });
        }
        if !checklist && item.checked.is_some() {
            return Err(ConvertError::SchemaViolation {
                index,
                field: "items.checked".to_string(),
                reason: "checked is only valid on checklists".to_string(),
            });
        }
        validate_items(index, &item.items, checklist, depth + 1)?;
    }
    Ok(())
}

fn validate_table(index: usize, data: &TableData) -> Result<(), ConvertError> {
    let mut rows = data.content.iter();
    let width = rows.next().map(Vec::len).unwrap_or(0);
    if rows.any(|row| row.len() != width) {
        return Err(ConvertError::SchemaViolation {
            index,
            field: "content".to_string(),
            reason: "table rows differ in length".to_string(),
        });
    }
    Ok(())
}

fn validate_link_tool(index: usize, data: &LinkToolData) -> Result<(), ConvertError> {
    let parsed = url::Url::parse(&data.link).map_err(|e| ConvertError::SchemaViolation {
        index,
        field: "link".to_string(),
        reason: e.to_string(),
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConvertError::SchemaViolation {
            index,
            field: "link".to_string(),
            reason: format!("unexpected scheme '{}'", parsed.scheme()),
        });
    }
    Ok(())
}

/// Decodes an editor payload into blocks, reporting the offending element.
///
/// An unrecognized `type` tag is an [`ConvertError::UnknownBlockType`]; a
/// known tag with malformed `data` is a [`ConvertError::SchemaViolation`]
/// carrying the element index. Successfully decoded blocks are validated
/// before being returned.
pub fn blocks_from_json(json: &str) -> Result<Vec<Block>, ConvertError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| ConvertError::SchemaViolation {
            index: 0,
            field: "blocks".to_string(),
            reason: e.to_string(),
        })?;

    let mut blocks = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let type_tag = value
            .get("type")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();
        if !BLOCK_TYPES.contains(&type_tag.as_str()) {
            return Err(ConvertError::UnknownBlockType(type_tag));
        }
        let block =
            serde_json::from_value(value).map_err(|e| ConvertError::SchemaViolation {
                index,
                field: "data".to_string(),
                reason: e.to_string(),
            })?;
        blocks.push(block);
    }

    validate_blocks(&blocks)?;
    Ok(blocks)
}
