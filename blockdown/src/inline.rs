//! Inline HTML ↔ Markdown bridge
//!
//! Rich-text runs inside blocks are stored as restricted inline HTML. This
//! module converts those fragments in both directions and hosts the small
//! DOM toolkit the parser reuses for figure and standalone-image detection.
//!
//! # Library Choice
//!
//! Markdown → HTML goes through `comrak`, the same engine used for block
//! parsing, so emphasis, strikethrough, autolinks and inline code behave
//! identically in both passes. HTML → Markdown walks an `html5ever` +
//! `markup5ever_rcdom` fragment tree; the browser-grade parser absorbs the
//! malformed HTML a hand-edited post can contain.
//!
//! Inline conversion is best effort by contract: anything unexpected passes
//! through verbatim rather than failing the surrounding conversion.

use comrak::{markdown_to_html, ComrakOptions};
use html5ever::tendril::TendrilSink;
use html5ever::{namespace_url, ns, LocalName, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Comrak options for inline runs: GFM inline features plus raw HTML
/// passthrough, since the block model stores rich text as inline HTML.
pub(crate) fn inline_comrak_options() -> ComrakOptions {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.render.unsafe_ = true;
    options
}

/// Renders an inline Markdown run to a restricted inline-HTML fragment.
///
/// A single enclosing paragraph wrapper is stripped, and every inline code
/// span is annotated with the `inline-code` class to distinguish it from
/// block code downstream.
pub fn markdown_to_html_inline(text: &str) -> String {
    let html = markdown_to_html(text, &inline_comrak_options());
    let mut content = html.trim().to_string();

    if content.starts_with("<p>") && content.ends_with("</p>") {
        content = content[3..content.len() - 4].to_string();
    }

    // Comrak emits inline code as a bare <code> tag; code span content is
    // entity-escaped, so this replacement cannot touch user text.
    if content.contains("<code>") {
        content = content.replace("<code>", "<code class=\"inline-code\">");
    }

    content
}

/// Converts a short inline HTML fragment to its Markdown equivalent.
///
/// Recognizes emphasis, strong, strikethrough, links, inline code, images
/// and line breaks; unknown wrappers contribute their children. If the
/// fragment has no markup, or the parse yields nothing usable, the input
/// comes back unchanged.
pub fn html_to_markdown(fragment: &str) -> String {
    if !fragment.contains('<') {
        return fragment.to_string();
    }

    let root = match parse_fragment_dom(fragment) {
        Some(root) => root,
        None => {
            log::warn!("inline fragment did not parse, passing through verbatim");
            return fragment.to_string();
        }
    };

    let mut out = String::new();
    for child in root.children.borrow().iter() {
        push_markdown(child, &mut out);
    }
    out.trim().to_string()
}

fn push_markdown(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { name, .. } => {
            let tag = name.local.as_ref();
            match tag {
                "strong" | "b" => wrap_children(node, out, "**"),
                "em" | "i" => wrap_children(node, out, "*"),
                "del" | "s" | "strike" => wrap_children(node, out, "~~"),
                "code" => {
                    out.push('`');
                    out.push_str(&text_content(node));
                    out.push('`');
                }
                "a" => {
                    let href = attr_value(node, "href").unwrap_or_default();
                    let mut label = String::new();
                    for child in node.children.borrow().iter() {
                        push_markdown(child, &mut label);
                    }
                    if label == href {
                        // Autolinked URL; the bare form survives a re-parse.
                        out.push_str(&href);
                    } else {
                        out.push('[');
                        out.push_str(&label);
                        out.push_str("](");
                        out.push_str(&href);
                        out.push(')');
                    }
                }
                "img" => {
                    let src = attr_value(node, "src").unwrap_or_default();
                    let alt = attr_value(node, "alt").unwrap_or_default();
                    out.push_str("![");
                    out.push_str(&alt);
                    out.push_str("](");
                    out.push_str(&src);
                    out.push(')');
                }
                "br" => out.push('\n'),
                "p" => {
                    if !out.is_empty() {
                        out.push_str("\n\n");
                    }
                    for child in node.children.borrow().iter() {
                        push_markdown(child, out);
                    }
                }
                _ => {
                    for child in node.children.borrow().iter() {
                        push_markdown(child, out);
                    }
                }
            }
        }
        _ => {}
    }
}

fn wrap_children(node: &Handle, out: &mut String, marker: &str) {
    out.push_str(marker);
    for child in node.children.borrow().iter() {
        push_markdown(child, out);
    }
    out.push_str(marker);
}

/// Parses an HTML fragment and returns the synthetic root element whose
/// children are the fragment's top-level nodes.
pub(crate) fn parse_fragment_dom(fragment: &str) -> Option<Handle> {
    let dom = html5ever::parse_fragment(
        RcDom::default(),
        ParseOpts::default(),
        QualName::new(None, ns!(html), LocalName::from("body")),
        vec![],
    )
    .one(String::from(fragment));

    let root = dom.document.children.borrow().first().cloned();
    // `RcDom`'s `Node::drop` eagerly empties every descendant's children
    // list (an iterative-drop optimization), which would sever `root`'s
    // children out from under it when `dom` goes out of scope here even
    // though `root` itself is still held by the caller. Leaking `dom`
    // keeps the tree intact for the returned handle.
    std::mem::forget(dom);
    root
}

/// The element children of a node, skipping text and comments.
pub(crate) fn element_children(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

/// All descendant elements with the given tag name, in document order.
pub(crate) fn find_elements(node: &Handle, tag: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    collect_elements(node, tag, &mut found);
    found
}

fn collect_elements(node: &Handle, tag: &str, found: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data {
            if name.local.as_ref() == tag {
                found.push(child.clone());
            }
        }
        collect_elements(child, tag, found);
    }
}

pub(crate) fn tag_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref().to_string()),
        _ => None,
    }
}

pub(crate) fn attr_value(node: &Handle, attr: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref() == attr)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Concatenated text of all descendant text nodes.
pub(crate) fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: &Handle, out: &mut String) {
    for child in node.children.borrow().iter() {
        if let NodeData::Text { contents } = &child.data {
            out.push_str(&contents.borrow());
        }
        collect_text(child, out);
    }
}

/// Text directly under a node, ignoring text nested in child elements.
pub(crate) fn direct_text(node: &Handle) -> String {
    let mut text = String::new();
    for child in node.children.borrow().iter() {
        if let NodeData::Text { contents } = &child.data {
            text.push_str(&contents.borrow());
        }
    }
    text
}

/// Escapes text for use inside an HTML attribute or text node.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
