//! Markdown parsing (Markdown → blocks)
//!
//! Pipeline: Markdown string → Comrak AST → top-level dispatch → Vec<Block>.
//!
//! Each top-level AST node maps to exactly one block; container nodes (lists,
//! blockquotes) are consumed whole rather than walked into. Rich text is
//! reconstructed as a Markdown run from the inline AST and then rendered to
//! inline HTML through the inline bridge, so both passes share one engine.

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeCodeBlock, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::blocks::{
    self, AlertData, AlertKind, Block, CodeData, CounterType, DelimiterData, HeaderData,
    ImageData, ImageFile, LinkToolData, ListData, ListItem, ListMeta, ListStyle, ParagraphData,
    QuoteData, RawData, TableData,
};
use crate::error::ConvertError;
use crate::inline::{
    attr_value, direct_text, element_children, find_elements, markdown_to_html_inline,
    parse_fragment_dom, tag_name, text_content,
};
use crate::link_meta::LinkMetadataProvider;
use crate::markdown::ParseOptions;

/// GitHub-style alert header on the first quoted line, e.g. `[!WARNING]`.
/// The token is case-sensitive: `[!note]` stays a quote.
static ALERT_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\[!([A-Z]*)\]\n(.*)$").expect("alert pattern"));

/// A paragraph that is nothing but a URL.
static BARE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://\S+$").expect("link pattern"));

fn block_comrak_options() -> ComrakOptions {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    // The task-list extension stays off: checkbox prefixes are detected on
    // the item text so one checkbox can promote the whole list.
    options
}

/// Converts a Markdown body into an ordered list of blocks.
///
/// Blocks come back in document order. CRLF line endings are normalized
/// before parsing. The provider is consulted once per bare-URL paragraph.
pub fn parse_markdown_to_blocks(
    body: &str,
    options: &ParseOptions,
    links: &dyn LinkMetadataProvider,
) -> Result<Vec<Block>, ConvertError> {
    let body = body.replace("\r\n", "\n");
    let arena = Arena::new();
    let root = parse_document(&arena, &body, &block_comrak_options());

    let mut result = Vec::new();
    for node in root.children() {
        if let Some(block) = convert_node(node, options, links) {
            result.push(block);
        }
    }

    blocks::validate_blocks(&result)?;
    Ok(result)
}

fn convert_node<'a>(
    node: &'a AstNode<'a>,
    options: &ParseOptions,
    links: &dyn LinkMetadataProvider,
) -> Option<Block> {
    let value = node.data.borrow().value.clone();
    match value {
        NodeValue::Heading(heading) => Some(convert_heading(node, heading.level)),
        NodeValue::ThematicBreak => Some(Block::Delimiter(DelimiterData {})),
        NodeValue::CodeBlock(code) => Some(convert_code_block(&code)),
        NodeValue::List(list) => {
            let ordered = list.list_type == ListType::Ordered;
            Some(convert_list(
                node,
                ordered,
                list.start,
                list.delimiter,
                options,
            ))
        }
        NodeValue::BlockQuote => Some(convert_blockquote(node, options)),
        NodeValue::HtmlBlock(html) => Some(convert_html_block(&html.literal, options)),
        NodeValue::Table(_) => Some(convert_table(node, options)),
        NodeValue::Paragraph => Some(convert_paragraph(node, options, links)),
        other => {
            log::debug!("skipping unsupported top-level node: {other:?}");
            None
        }
    }
}

fn convert_heading<'a>(node: &'a AstNode<'a>, level: u8) -> Block {
    let text = markdown_to_html_inline(&collect_inline_markdown(node));
    Block::Header(HeaderData { text, level })
}

fn convert_code_block(code: &NodeCodeBlock) -> Block {
    let literal = code.literal.trim_matches('\n').to_string();
    let language = if code.fenced && !code.info.is_empty() {
        Some(code.info.clone())
    } else {
        None
    };
    Block::Code(CodeData {
        code: literal,
        language,
    })
}

struct RawItem {
    text: String,
    checkbox: Option<bool>,
    children: Vec<RawItem>,
}

fn convert_list<'a>(
    node: &'a AstNode<'a>,
    ordered: bool,
    start: usize,
    delimiter: ListDelimType,
    options: &ParseOptions,
) -> Block {
    let raw_items = collect_raw_items(node, 0, options.max_depth);
    let checklist = has_checkbox(&raw_items);

    let (style, meta) = if checklist {
        (ListStyle::Checklist, ListMeta::default())
    } else if ordered {
        (
            ListStyle::Ordered,
            ListMeta {
                start: Some(start as u32),
                counter_type: Some(counter_type_for(delimiter)),
            },
        )
    } else {
        (ListStyle::Unordered, ListMeta::default())
    };

    Block::List(ListData {
        style,
        meta,
        items: build_items(raw_items, checklist),
    })
}

fn collect_raw_items<'a>(
    list_node: &'a AstNode<'a>,
    depth: usize,
    max_depth: usize,
) -> Vec<RawItem> {
    if depth >= max_depth {
        return Vec::new();
    }

    let mut items = Vec::new();
    for item in list_node.children() {
        if !matches!(item.data.borrow().value, NodeValue::Item(_)) {
            continue;
        }

        let raw = collect_block_text(item);
        let trimmed = raw.trim();
        let mut checkbox = None;
        let mut stripped = None;
        for (prefix, checked) in [("[ ] ", false), ("[x] ", true), ("[X] ", true)] {
            if let Some(rest) = trimmed.strip_prefix(prefix) {
                checkbox = Some(checked);
                stripped = Some(rest.to_string());
                break;
            }
        }
        let text = stripped.unwrap_or(raw);

        let mut children = Vec::new();
        for child in item.children() {
            if matches!(child.data.borrow().value, NodeValue::List(_)) {
                children.extend(collect_raw_items(child, depth + 1, max_depth));
            }
        }

        items.push(RawItem {
            text,
            checkbox,
            children,
        });
    }
    items
}

fn has_checkbox(items: &[RawItem]) -> bool {
    items
        .iter()
        .any(|item| item.checkbox.is_some() || has_checkbox(&item.children))
}

fn build_items(raw: Vec<RawItem>, checklist: bool) -> Vec<ListItem> {
    raw.into_iter()
        .map(|item| ListItem {
            content: markdown_to_html_inline(&item.text),
            checked: if checklist {
                Some(item.checkbox.unwrap_or(false))
            } else {
                None
            },
            items: build_items(item.children, checklist),
        })
        .collect()
}

fn counter_type_for(delimiter: ListDelimType) -> CounterType {
    // `)` markers import as upper-roman and round-trip that way.
    match delimiter {
        ListDelimType::Period => CounterType::Decimal,
        ListDelimType::Paren => CounterType::UpperRoman,
    }
}

fn convert_blockquote<'a>(node: &'a AstNode<'a>, options: &ParseOptions) -> Block {
    let content = collect_block_text(node);

    if let Some(caps) = ALERT_HEADER.captures(&content) {
        let kind = match &caps[1] {
            "CAUTION" => AlertKind::Danger,
            "WARNING" => AlertKind::Warning,
            "IMPORTANT" => AlertKind::Secondary,
            "TIP" => AlertKind::Success,
            "NOTE" => AlertKind::Primary,
            _ => AlertKind::Info,
        };
        return Block::Alert(AlertData {
            kind,
            align: options.quote_caption_align,
            message: markdown_to_html_inline(&caps[2]),
        });
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let mut text = content.clone();
    let mut caption = String::new();
    if lines.len() > 1 {
        let last = lines[lines.len() - 1].trim();
        if let Some(rest) = last.strip_prefix("--") {
            caption = strip_caption_tags(rest.trim()).to_string();
            text = lines[..lines.len() - 1].join("\n");
        }
    }

    let caption_html = if caption.is_empty() {
        String::new()
    } else {
        markdown_to_html_inline(&caption)
    };

    Block::Quote(QuoteData {
        text: markdown_to_html_inline(&text),
        caption: caption_html,
        alignment: options.quote_caption_align,
    })
}

/// Drops the `<caption>` wrapper our own renderer adds around citations.
fn strip_caption_tags(caption: &str) -> &str {
    caption
        .strip_prefix("<caption>")
        .and_then(|rest| rest.strip_suffix("</caption>"))
        .unwrap_or(caption)
}

fn convert_html_block(literal: &str, options: &ParseOptions) -> Block {
    let html = literal.trim();
    if let Some(image) = figure_image(html, options) {
        return image;
    }
    Block::Raw(RawData {
        html: html.to_string(),
    })
}

/// Recognizes an HTML block that is exactly one `<figure>` wrapping a single
/// `<img>`, optionally with a `<figcaption>`.
fn figure_image(html: &str, options: &ParseOptions) -> Option<Block> {
    let root = parse_fragment_dom(html)?;
    if element_children(&root).len() != 1 {
        return None;
    }

    let figures = find_elements(&root, "figure");
    if figures.len() != 1 {
        return None;
    }
    let images = find_elements(&figures[0], "img");
    if images.len() != 1 {
        return None;
    }

    let url = attr_value(&images[0], "src").unwrap_or_default();
    let caption = find_elements(&figures[0], "figcaption")
        .first()
        .map(text_content)
        .unwrap_or_default();

    Some(Block::Image(ImageData {
        file: ImageFile { url },
        caption,
        with_border: options.image_with_border,
        with_background: options.image_with_background,
        stretched: options.image_stretched,
    }))
}

fn convert_table<'a>(node: &'a AstNode<'a>, options: &ParseOptions) -> Block {
    let mut content: Vec<Vec<String>> = Vec::new();
    let mut with_headings = false;

    for row in node.children() {
        let header = match row.data.borrow().value {
            NodeValue::TableRow(header) => header,
            _ => continue,
        };
        if header {
            with_headings = true;
        }

        let mut cells = Vec::new();
        for cell in row.children() {
            if matches!(cell.data.borrow().value, NodeValue::TableCell) {
                cells.push(collect_plain_text(cell).trim().to_string());
            }
        }
        content.push(cells);
    }

    // Keep the grid rectangular; short rows are padded with empty cells.
    let width = content.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut content {
        row.resize(width, String::new());
    }

    Block::Table(TableData {
        with_headings,
        stretched: options.table_stretched,
        content,
    })
}

fn convert_paragraph<'a>(
    node: &'a AstNode<'a>,
    options: &ParseOptions,
    links: &dyn LinkMetadataProvider,
) -> Block {
    let text = markdown_to_html_inline(&collect_inline_markdown(node));

    if let Some(image) = standalone_image(&text, options) {
        return image;
    }

    if let Some(url) = standalone_link(&text) {
        let meta = links.fetch(&url);
        return Block::LinkTool(LinkToolData { link: url, meta });
    }

    Block::Paragraph(ParagraphData { text })
}

/// A paragraph whose rendered HTML is exactly one `<img>` element.
fn standalone_image(html: &str, options: &ParseOptions) -> Option<Block> {
    if !html.contains("<img") {
        return None;
    }

    let root = parse_fragment_dom(html)?;
    let children = element_children(&root);
    if children.len() != 1 || tag_name(&children[0]).as_deref() != Some("img") {
        return None;
    }
    if !text_content(&root).trim().is_empty() {
        return None;
    }

    let url = attr_value(&children[0], "src").unwrap_or_default();
    let caption = attr_value(&children[0], "alt").unwrap_or_default();

    Some(Block::Image(ImageData {
        file: ImageFile { url },
        caption,
        with_border: options.image_with_border,
        with_background: options.image_with_background,
        stretched: options.image_stretched,
    }))
}

/// A paragraph that is nothing but a URL, either as literal text or as the
/// single anchor the autolink extension produces for one.
fn standalone_link(html: &str) -> Option<String> {
    if BARE_LINK.is_match(html) {
        return Some(html.to_string());
    }

    let root = parse_fragment_dom(html)?;
    let children = element_children(&root);
    if children.len() != 1 || tag_name(&children[0]).as_deref() != Some("a") {
        return None;
    }
    if !direct_text(&root).trim().is_empty() {
        return None;
    }

    let href = attr_value(&children[0], "href")?;
    let label = text_content(&children[0]);
    if href == label && BARE_LINK.is_match(&href) {
        Some(href)
    } else {
        None
    }
}

/// Reconstructs the Markdown source of a node's inline content.
fn collect_inline_markdown<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    for child in node.children() {
        push_inline_markdown(child, &mut out);
    }
    out
}

fn push_inline_markdown<'a>(node: &'a AstNode<'a>, out: &mut String) {
    let value = node.data.borrow().value.clone();
    match value {
        NodeValue::Text(text) => out.push_str(&text),
        NodeValue::SoftBreak => out.push('\n'),
        NodeValue::LineBreak => out.push_str("\\\n"),
        NodeValue::Code(code) => {
            out.push('`');
            out.push_str(&code.literal);
            out.push('`');
        }
        NodeValue::Emph => {
            out.push('*');
            for child in node.children() {
                push_inline_markdown(child, out);
            }
            out.push('*');
        }
        NodeValue::Strong => {
            out.push_str("**");
            for child in node.children() {
                push_inline_markdown(child, out);
            }
            out.push_str("**");
        }
        NodeValue::Strikethrough => {
            out.push_str("~~");
            for child in node.children() {
                push_inline_markdown(child, out);
            }
            out.push_str("~~");
        }
        NodeValue::Link(link) => {
            let mut label = String::new();
            for child in node.children() {
                push_inline_markdown(child, &mut label);
            }
            if label == link.url {
                out.push_str(&label);
            } else {
                out.push('[');
                out.push_str(&label);
                out.push_str("](");
                out.push_str(&link.url);
                out.push(')');
            }
        }
        NodeValue::Image(link) => {
            let mut alt = String::new();
            for child in node.children() {
                push_inline_markdown(child, &mut alt);
            }
            out.push_str("![");
            out.push_str(&alt);
            out.push_str("](");
            out.push_str(&link.url);
            out.push(')');
        }
        NodeValue::HtmlInline(html) => out.push_str(&html),
        _ => {
            for child in node.children() {
                push_inline_markdown(child, out);
            }
        }
    }
}

/// The textual content of a container's block children, one line per block.
/// Nested lists are excluded; they are consumed by the list walk instead.
fn collect_block_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut parts: Vec<String> = Vec::new();
    for child in node.children() {
        let value = child.data.borrow().value.clone();
        match value {
            NodeValue::Paragraph | NodeValue::Heading(_) => {
                parts.push(collect_inline_markdown(child));
            }
            NodeValue::CodeBlock(code) => {
                parts.push(code.literal.trim_end_matches('\n').to_string());
            }
            NodeValue::BlockQuote => parts.push(collect_block_text(child)),
            NodeValue::List(_) => {}
            _ => {}
        }
    }
    parts.join("\n")
}

/// Plain text of a node, with breaks collapsing to spaces.
fn collect_plain_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    push_plain_text(node, &mut out);
    out
}

fn push_plain_text<'a>(node: &'a AstNode<'a>, out: &mut String) {
    let value = node.data.borrow().value.clone();
    match value {
        NodeValue::Text(text) => out.push_str(&text),
        NodeValue::Code(code) => out.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
        _ => {
            for child in node.children() {
                push_plain_text(child, out);
            }
        }
    }
}
