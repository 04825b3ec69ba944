//! Whole-document convenience: frontmatter + blocks together
//!
//! The editor exchanges a post as one JSON envelope holding the typed
//! frontmatter fields and the block list. Loading runs frontmatter
//! extraction then block parsing; saving serializes both parts and joins
//! them the way the storage layer expects.

use serde::{Deserialize, Serialize};

use crate::blocks::Block;
use crate::error::ConvertError;
use crate::frontmatter::{extract_front_matter, frontmatter_fields_to_yaml, FrontmatterField};
use crate::link_meta::LinkMetadataProvider;
use crate::markdown::{blocks_to_markdown, parse_markdown_to_blocks, ParseOptions, RenderOptions};

/// A post as the editor sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub frontmatter: Vec<FrontmatterField>,
    pub blocks: Vec<Block>,
}

impl Document {
    /// Parses a full Markdown document, header included.
    pub fn parse(
        content: &str,
        options: &ParseOptions,
        links: &dyn LinkMetadataProvider,
    ) -> Result<Self, ConvertError> {
        let (frontmatter, body) = extract_front_matter(content)?;
        let blocks = parse_markdown_to_blocks(&body, options, links)?;
        Ok(Self {
            frontmatter,
            blocks,
        })
    }

    /// Renders the document back to Markdown, header included. A document
    /// without frontmatter fields skips the header entirely.
    pub fn to_markdown(&self, options: &RenderOptions) -> Result<String, ConvertError> {
        let body = blocks_to_markdown(&self.blocks, options)?;
        if self.frontmatter.is_empty() {
            return Ok(format!("{body}\n"));
        }
        let yaml = frontmatter_fields_to_yaml(&self.frontmatter)?;
        Ok(format!("{yaml}\n{body}\n"))
    }
}
