//! Round-trip properties
//!
//! Parsing the rendering of a block list yields an equivalent list, and a
//! second render pass is byte-identical to the first. Inline rich text is
//! canonicalized through the inline bridge, so equivalence is checked on the
//! block structure rather than raw Markdown bytes.

use blockdown::{
    blocks_from_json, blocks_to_markdown, extract_front_matter, frontmatter_fields_to_yaml,
    parse_markdown_to_blocks, Block, NoLinkMetadata, ParseOptions, RenderOptions,
};
use serde_json::json;

fn reparse(md: &str) -> Vec<Block> {
    parse_markdown_to_blocks(md, &ParseOptions::default(), &NoLinkMetadata)
        .expect("rendered markdown reparses")
}

fn editor_blocks(value: serde_json::Value) -> Vec<Block> {
    blocks_from_json(&value.to_string()).expect("wire payload decodes")
}

#[test]
fn test_block_list_survives_render_and_parse() {
    let original = editor_blocks(json!([
        {"type": "header", "data": {"text": "Release notes", "level": 2}},
        {"type": "paragraph", "data": {"text": "All <em>kinds</em> of fixes."}},
        {"type": "list", "data": {
            "style": "ordered",
            "meta": {"start": 3, "counterType": "decimal"},
            "items": [
                {"content": "a", "items": []},
                {"content": "b", "items": []},
            ],
        }},
        {"type": "quote", "data": {"text": "ship it", "caption": "the lead", "alignment": "left"}},
        {"type": "alert", "data": {"type": "warning", "align": "left", "message": "breaking change"}},
        {"type": "code", "data": {"code": "cargo update", "language": "sh"}},
        {"type": "delimiter", "data": {}},
        {"type": "table", "data": {
            "withHeadings": true,
            "stretched": false,
            "content": [["crate", "version"], ["serde", "1.0"]],
        }},
    ]));

    let md = blocks_to_markdown(&original, &RenderOptions::default()).unwrap();
    let parsed = reparse(&md);
    assert_eq!(parsed, original);
}

#[test]
fn test_render_is_idempotent() {
    let original = editor_blocks(json!([
        {"type": "header", "data": {"text": "Title", "level": 1}},
        {"type": "paragraph", "data": {"text": "Plain and <strong>strong</strong>."}},
        {"type": "list", "data": {
            "style": "unordered",
            "meta": {},
            "items": [
                {"content": "first", "items": [
                    {"content": "nested", "items": []},
                ]},
            ],
        }},
        {"type": "quote", "data": {"text": "said once", "caption": "", "alignment": "left"}},
    ]));

    let first = blocks_to_markdown(&original, &RenderOptions::default()).unwrap();
    let reparsed = reparse(&first);
    let second = blocks_to_markdown(&reparsed, &RenderOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_fenced_code_round_trips_bytes() {
    let original = editor_blocks(json!([
        {"type": "code", "data": {
            "code": "fn main() {\n    println!(\"hi\");\n}",
            "language": "rust",
        }},
    ]));
    let md = blocks_to_markdown(&original, &RenderOptions::default()).unwrap();
    assert_eq!(reparse(&md), original);
}

#[test]
fn test_indented_code_round_trips_bytes() {
    let original = editor_blocks(json!([
        {"type": "code", "data": {"code": "first line\nsecond line"}},
    ]));
    let md = blocks_to_markdown(&original, &RenderOptions::default()).unwrap();
    assert_eq!(reparse(&md), original);
}

#[test]
fn test_image_with_caption_round_trips_through_figure() {
    let original = editor_blocks(json!([
        {"type": "image", "data": {
            "file": {"url": "/img/cover.png"},
            "caption": "The cover",
            "withBorder": false,
            "withBackground": false,
            "stretched": false,
        }},
    ]));
    let md = blocks_to_markdown(&original, &RenderOptions::default()).unwrap();
    assert!(md.starts_with("<figure>"));
    assert_eq!(reparse(&md), original);
}

#[test]
fn test_image_without_caption_round_trips_through_markdown() {
    let original = editor_blocks(json!([
        {"type": "image", "data": {
            "file": {"url": "/img/cover.png"},
            "caption": "",
            "withBorder": false,
            "withBackground": false,
            "stretched": false,
        }},
    ]));
    let md = blocks_to_markdown(&original, &RenderOptions::default()).unwrap();
    let parsed = reparse(&md);
    // The options comment renders as its own raw block; the image survives.
    match &parsed[0] {
        Block::Image(data) => {
            assert_eq!(data.file.url, "/img/cover.png");
            assert_eq!(data.caption, "");
        }
        other => panic!("expected image, got {}", other.type_name()),
    }
}

#[test]
fn test_frontmatter_and_body_reassemble() {
    let source = "---\ntags: [x, y]\ntitle: Hello\ndraft: true\nzzz: 1\n---\nbody\n";
    let (fields, body) = extract_front_matter(source).unwrap();

    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["title", "tags", "zzz", "draft"]);
    assert_eq!(body, "body\n");

    let yaml = frontmatter_fields_to_yaml(&fields).unwrap();
    let rebuilt = format!("{yaml}{body}");
    let (fields_again, body_again) = extract_front_matter(&rebuilt).unwrap();
    assert_eq!(fields_again, fields);
    assert_eq!(body_again, body);
}
