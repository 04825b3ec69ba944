//! Markdown ↔ editor-block conversion for content backends
//!
//! This crate is the content-conversion core of a Markdown CMS: it translates
//! between a Markdown document (with a typed YAML frontmatter header) and an
//! ordered list of semantic blocks suitable for a structured, WYSIWYG-style
//! editor, and back again. The round trip is strong enough that loading,
//! editing and saving a post produces a diff limited to the edits the user
//! actually made.
//!
//! This is a pure lib: it powers the blockdown CLI but is shell agnostic.
//! No code here should suppose a shell environment, be it std printing,
//! env vars or a process-wide logger. The only effectful dependency is the
//! injected link-metadata provider.
//!
//! Architecture
//!
//! The heavy lifting is offloaded to specialized crates: comrak parses and
//! renders Markdown, html5ever parses the HTML fragments the block model
//! stores for rich text, serde_yaml handles the frontmatter. Our code is
//! the mapping layer between those ASTs and the block model.
//!
//! The file structure:
//! ```text
//! .
//! ├── error.rs          # ConvertError, the full error taxonomy
//! ├── blocks.rs         # Block model, schema validation, JSON boundary
//! ├── frontmatter.rs    # YAML header ↔ typed field list
//! ├── inline.rs         # inline HTML ↔ Markdown bridge, DOM helpers
//! ├── link_meta.rs      # injected metadata fetcher for bare-URL paragraphs
//! ├── document.rs       # frontmatter + blocks as one document
//! └── markdown
//!     ├── mod.rs        # ParseOptions / RenderOptions
//!     ├── parser.rs     # Markdown → blocks
//!     └── serializer.rs # blocks → Markdown
//! ```
//!
//! Conversion pipeline
//!
//! Reading a post:  bytes → frontmatter::extract_front_matter → (fields, body)
//! body → markdown::parse_markdown_to_blocks → Vec<Block>
//!
//! Writing a post:  fields → frontmatter::frontmatter_fields_to_yaml
//! blocks → markdown::blocks_to_markdown
//! document = yaml + "\n" + markdown + "\n"
//!
//! Rich text inside blocks (paragraph text, list item content, quote text
//! and captions, alert messages) is stored as a restricted inline-HTML
//! fragment. The inline module converts those fragments to Markdown on the
//! way out and renders Markdown runs to inline HTML on the way in. Inline
//! conversion never fails a whole document: on anything unexpected the
//! input passes through verbatim.
//!
//! Concurrency
//!
//! Every public operation is a pure function of its inputs. There is no
//! state shared between calls, so conversions may run concurrently on
//! disjoint inputs. Only the link-metadata provider may block; providers
//! are expected to bound their own fetch time and to return empty metadata
//! rather than fail.

pub mod blocks;
pub mod document;
pub mod error;
pub mod frontmatter;
pub mod inline;
pub mod link_meta;
pub mod markdown;

pub use blocks::{
    blocks_from_json, validate_blocks, AlertData, AlertKind, Alignment, Block, CodeData,
    CounterType, DelimiterData, HeaderData, ImageData, ImageFile, LinkToolData, ListData,
    ListItem, ListMeta, ListStyle, ParagraphData, QuoteData, RawData, TableData,
};
pub use document::Document;
pub use error::ConvertError;
pub use frontmatter::{
    extract_front_matter, frontmatter_fields_to_yaml, FieldType, FrontmatterField,
};
pub use link_meta::{LinkImage, LinkMeta, LinkMetadataProvider, MemoizedLinks, NoLinkMetadata};
pub use markdown::{blocks_to_markdown, parse_markdown_to_blocks, ParseOptions, RenderOptions};
