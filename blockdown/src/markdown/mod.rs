//! Markdown ↔ blocks conversion
//!
//! This module implements both directions of the conversion between Markdown
//! documents and the block model.
//!
//! # Library Choice
//!
//! We use the `comrak` crate for the Markdown side. This choice is based on:
//! - Single crate for both parsing and inline rendering
//! - CommonMark compliance with the GFM extensions this content needs
//!   (tables, strikethrough, autolinks)
//! - Robust and well-maintained
//!
//! # Element Mapping Table
//!
//! | Markdown construct    | Block      | Notes                                         |
//! |-----------------------|------------|-----------------------------------------------|
//! | Heading               | header     | level 1..6, text as inline HTML               |
//! | Paragraph             | paragraph  | standalone images and bare URLs peel off      |
//! | Standalone `<img>`    | image      | url from `src`, caption from `alt`            |
//! | Bare URL paragraph    | linkTool   | metadata via the injected provider            |
//! | List                  | list       | ordered/unordered; checkboxes promote the     |
//! |                       |            | whole list to a checklist                     |
//! | Blockquote            | quote      | trailing `--` line becomes the caption        |
//! | `> [!TYPE]` quote     | alert      | GitHub-style alert headers, case-sensitive    |
//! | Code block            | code       | fenced keeps its info string as `language`    |
//! | Table (GFM)           | table      | plain-text cells, rectangular                 |
//! | Thematic break        | delimiter  |                                               |
//! | `<figure>` HTML block | image      | single figure wrapping a single img           |
//! | Other HTML block      | raw        | verbatim fallback                             |
//!
//! # Lossy conversions
//!
//! - Byte-level formatting of untouched regions is not preserved; inline
//!   rich text is canonicalized through the inline bridge on each pass.
//! - Checklists render without a bullet marker, matching the editor's
//!   convention rather than GFM task-list syntax.
//! - `)` ordered-list markers import as `upper-roman`; the delimiter
//!   character itself is not stored.

pub mod parser;
pub mod serializer;

pub use parser::parse_markdown_to_blocks;
pub use serializer::blocks_to_markdown;

use crate::blocks::Alignment;

/// Options for Markdown → blocks conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Cap on list nesting; deeper levels are dropped.
    pub max_depth: usize,
    /// Alignment recorded on quote captions and alerts.
    pub quote_caption_align: Alignment,
    pub table_stretched: bool,
    pub image_stretched: bool,
    pub image_with_border: bool,
    pub image_with_background: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: 5,
            quote_caption_align: Alignment::Left,
            table_stretched: false,
            image_stretched: false,
            image_with_border: false,
            image_with_background: false,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_quote_caption_align(mut self, align: Alignment) -> Self {
        self.quote_caption_align = align;
        self
    }

    pub fn with_table_stretched(mut self, stretched: bool) -> Self {
        self.table_stretched = stretched;
        self
    }

    pub fn with_image_stretched(mut self, stretched: bool) -> Self {
        self.image_stretched = stretched;
        self
    }

    pub fn with_image_border(mut self, border: bool) -> Self {
        self.image_with_border = border;
        self
    }

    pub fn with_image_background(mut self, background: bool) -> Self {
        self.image_with_background = background;
        self
    }
}

/// Options for blocks → Markdown conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderOptions {
    pub image_with_border: bool,
    pub image_with_background: bool,
    pub image_stretched: bool,
}

impl RenderOptions {
    pub fn with_image_border(mut self, border: bool) -> Self {
        self.image_with_border = border;
        self
    }

    pub fn with_image_background(mut self, background: bool) -> Self {
        self.image_with_background = background;
        self
    }

    pub fn with_image_stretched(mut self, stretched: bool) -> Self {
        self.image_stretched = stretched;
        self
    }
}
