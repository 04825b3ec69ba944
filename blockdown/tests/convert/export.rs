//! Export tests (blocks → Markdown)
//!
//! These verify the Markdown rendered for representative block lists,
//! building the inputs from the JSON wire shape the editor produces.

use blockdown::{blocks_from_json, blocks_to_markdown, Block, RenderOptions};
use serde_json::json;

fn blocks(value: serde_json::Value) -> Vec<Block> {
    blocks_from_json(&value.to_string()).expect("wire payload decodes")
}

fn render(value: serde_json::Value) -> String {
    blocks_to_markdown(&blocks(value), &RenderOptions::default()).expect("blocks render")
}

#[test]
fn test_header_paragraph_and_delimiter() {
    let md = render(json!([
        {"type": "header", "data": {"text": "Title", "level": 1}},
        {"type": "paragraph", "data": {"text": "Some <strong>bold</strong> text."}},
        {"type": "delimiter", "data": {}},
    ]));
    assert_eq!(md, "# Title\n\nSome **bold** text.\n\n---");
}

#[test]
fn test_ordered_list_markers_continue_from_start() {
    let md = render(json!([
        {"type": "list", "data": {
            "style": "ordered",
            "meta": {"start": 3, "counterType": "decimal"},
            "items": [
                {"content": "a", "items": []},
                {"content": "b", "items": []},
            ],
        }},
    ]));
    assert_eq!(md, "3. a\n4. b");
}

#[test]
fn test_nested_ordered_markers_follow_depth_formula() {
    let md = render(json!([
        {"type": "list", "data": {
            "style": "ordered",
            "meta": {"start": 2, "counterType": "decimal"},
            "items": [
                {"content": "outer", "items": [
                    {"content": "inner", "items": []},
                ]},
            ],
        }},
    ]));
    // Depth 1 starts at start + (start - 1) = 3.
    assert_eq!(md, "2. outer\n    3. inner");
}

#[test]
fn test_roman_and_alpha_counters() {
    let md = render(json!([
        {"type": "list", "data": {
            "style": "ordered",
            "meta": {"start": 1, "counterType": "upper-roman"},
            "items": [
                {"content": "one", "items": []},
                {"content": "two", "items": []},
            ],
        }},
        {"type": "list", "data": {
            "style": "ordered",
            "meta": {"start": 1, "counterType": "lower-alpha"},
            "items": [
                {"content": "first", "items": []},
            ],
        }},
    ]));
    assert_eq!(md, "I. one\nII. two\n\na. first");
}

#[test]
fn test_checklist_markers() {
    let md = render(json!([
        {"type": "list", "data": {
            "style": "checklist",
            "meta": {},
            "items": [
                {"content": "todo", "items": [], "checked": false},
                {"content": "done", "items": [], "checked": true},
            ],
        }},
    ]));
    assert_eq!(md, "[ ] todo\n[x] done");
}

#[test]
fn test_fenced_and_indented_code() {
    let md = render(json!([
        {"type": "code", "data": {"code": "fn main() {}", "language": "rust"}},
        {"type": "code", "data": {"code": "plain\nlines"}},
    ]));
    assert_eq!(md, "```rust\nfn main() {}\n```\n\n    plain\n    lines");
}

#[test]
fn test_quote_with_caption() {
    let md = render(json!([
        {"type": "quote", "data": {
            "text": "first line\nsecond line",
            "caption": "someone",
            "alignment": "left",
        }},
    ]));
    assert_eq!(
        md,
        "> first line\n> second line\n> \n> -- <caption>someone</caption>"
    );
}

#[test]
fn test_alert_headers_round_out() {
    let md = render(json!([
        {"type": "alert", "data": {"type": "danger", "align": "left", "message": "stop"}},
    ]));
    assert_eq!(md, "> [!CAUTION]\n> stop");
}

#[test]
fn test_table_with_heading_separator() {
    let md = render(json!([
        {"type": "table", "data": {
            "withHeadings": true,
            "stretched": false,
            "content": [["a", "b"], ["1", "2"]],
        }},
    ]));
    assert_eq!(md, "| a | b |\n| --- | --- |\n| 1 | 2 |");
}

#[test]
fn test_link_tool_renders_bare_url() {
    let md = render(json!([
        {"type": "linkTool", "data": {
            "link": "https://example.com",
            "meta": {"title": "", "description": "", "image": {"url": ""}},
        }},
    ]));
    assert_eq!(md, "https://example.com");
}

#[test]
fn test_raw_html_passes_through() {
    let md = render(json!([
        {"type": "raw", "data": {"html": "<aside>note</aside>"}},
    ]));
    assert_eq!(md, "<aside>note</aside>");
}
