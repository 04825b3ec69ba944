//! Import tests (Markdown → blocks)
//!
//! These verify the block lists produced for representative Markdown input,
//! asserting against the JSON wire shape the editor consumes.

use blockdown::{parse_markdown_to_blocks, Block, NoLinkMetadata, ParseOptions};
use serde_json::json;

use super::StubLinks;

fn parse(md: &str) -> Vec<Block> {
    parse_markdown_to_blocks(md, &ParseOptions::default(), &NoLinkMetadata)
        .expect("should parse markdown")
}

fn wire(blocks: &[Block]) -> serde_json::Value {
    serde_json::to_value(blocks).expect("blocks serialize")
}

#[test]
fn test_header_and_paragraph() {
    let blocks = parse("# Hello\n\nWorld and *emphasis*.\n");
    assert_eq!(
        wire(&blocks),
        json!([
            {"type": "header", "data": {"text": "Hello", "level": 1}},
            {"type": "paragraph", "data": {"text": "World and <em>emphasis</em>."}},
        ])
    );
}

#[test]
fn test_checklist_promotion() {
    let blocks = parse("- [ ] todo\n- [x] done\n  - [ ] nested\n");
    assert_eq!(
        wire(&blocks),
        json!([
            {"type": "list", "data": {
                "style": "checklist",
                "meta": {},
                "items": [
                    {"content": "todo", "items": [], "checked": false},
                    {"content": "done", "items": [
                        {"content": "nested", "items": [], "checked": false},
                    ], "checked": true},
                ],
            }},
        ])
    );
}

#[test]
fn test_single_checkbox_promotes_whole_list() {
    let blocks = parse("- plain\n- [x] ticked\n");
    match &blocks[0] {
        Block::List(data) => {
            assert_eq!(serde_json::to_value(data.style).unwrap(), json!("checklist"));
            assert_eq!(data.items[0].checked, Some(false));
            assert_eq!(data.items[1].checked, Some(true));
            assert!(data.meta.start.is_none());
            assert!(data.meta.counter_type.is_none());
        }
        other => panic!("expected list, got {}", other.type_name()),
    }
}

#[test]
fn test_alert_from_blockquote() {
    let blocks = parse("> [!WARNING]\n> be careful\n");
    assert_eq!(
        wire(&blocks),
        json!([
            {"type": "alert", "data": {"type": "warning", "align": "left", "message": "be careful"}},
        ])
    );
}

#[test]
fn test_image_from_figure_html() {
    let blocks = parse(
        "<figure><img src=\"/a.png\" alt=\"A\"/><figcaption>A</figcaption></figure>\n",
    );
    assert_eq!(
        wire(&blocks),
        json!([
            {"type": "image", "data": {
                "file": {"url": "/a.png"},
                "caption": "A",
                "withBorder": false,
                "withBackground": false,
                "stretched": false,
            }},
        ])
    );
}

#[test]
fn test_image_from_standalone_markdown_image() {
    let blocks = parse("![A](/a.png)\n");
    match &blocks[0] {
        Block::Image(data) => {
            assert_eq!(data.file.url, "/a.png");
            assert_eq!(data.caption, "A");
        }
        other => panic!("expected image, got {}", other.type_name()),
    }
}

#[test]
fn test_image_flags_follow_options() {
    let options = ParseOptions::default()
        .with_image_border(true)
        .with_image_stretched(true);
    let blocks = parse_markdown_to_blocks("![A](/a.png)\n", &options, &NoLinkMetadata).unwrap();
    match &blocks[0] {
        Block::Image(data) => {
            assert!(data.with_border);
            assert!(data.stretched);
            assert!(!data.with_background);
        }
        other => panic!("expected image, got {}", other.type_name()),
    }
}

#[test]
fn test_ordered_list_counter() {
    let blocks = parse("3. a\n4. b\n");
    assert_eq!(
        wire(&blocks),
        json!([
            {"type": "list", "data": {
                "style": "ordered",
                "meta": {"start": 3, "counterType": "decimal"},
                "items": [
                    {"content": "a", "items": []},
                    {"content": "b", "items": []},
                ],
            }},
        ])
    );
}

#[test]
fn test_bare_url_becomes_link_tool() {
    let blocks =
        parse_markdown_to_blocks("https://example.com\n", &ParseOptions::default(), &StubLinks)
            .unwrap();
    assert_eq!(
        wire(&blocks),
        json!([
            {"type": "linkTool", "data": {
                "link": "https://example.com",
                "meta": {
                    "title": "Example Domain",
                    "description": "metadata for https://example.com",
                    "image": {"url": "https://example.com/og.png"},
                },
            }},
        ])
    );
}

#[test]
fn test_paragraph_with_link_is_not_a_link_tool() {
    let blocks = parse("see [the docs](https://example.com) for more\n");
    assert!(matches!(blocks[0], Block::Paragraph(_)));
}

#[test]
fn test_quote_with_caption_and_alignment() {
    let blocks = parse("> hard work pays off\n> -- anonymous\n");
    assert_eq!(
        wire(&blocks),
        json!([
            {"type": "quote", "data": {
                "text": "hard work pays off",
                "caption": "anonymous",
                "alignment": "left",
            }},
        ])
    );
}

#[test]
fn test_document_order_is_preserved() {
    let md = "# One\n\ntwo\n\n---\n\n```sh\nthree\n```\n\n> four\n";
    let blocks = parse(md);
    let types: Vec<&str> = blocks.iter().map(Block::type_name).collect();
    assert_eq!(types, vec!["header", "paragraph", "delimiter", "code", "quote"]);
}
