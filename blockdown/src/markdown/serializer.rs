//! Markdown serialization (blocks → Markdown)
//!
//! Renders a block list back into a Markdown document. Each block emits its
//! own rendering followed by a blank line; inline-HTML fields go back through
//! the inline bridge so the output re-parses to an equivalent block list.

use crate::blocks::{
    self, AlertData, AlertKind, Alignment, Block, CodeData, CounterType, HeaderData, ImageData,
    ListData, ListItem, ListMeta, ListStyle, QuoteData, TableData,
};
use crate::error::ConvertError;
use crate::inline::{html_escape, html_to_markdown};
use crate::markdown::RenderOptions;

/// Renders blocks to a Markdown document.
///
/// The block list is validated first; rendering itself can only fail on a
/// heading level outside 1..=6 or an alert type with no Markdown header.
pub fn blocks_to_markdown(
    input: &[Block],
    options: &RenderOptions,
) -> Result<String, ConvertError> {
    blocks::validate_blocks(input)?;

    let mut out = String::new();
    for (index, block) in input.iter().enumerate() {
        match block {
            Block::Paragraph(data) => {
                out.push_str(&html_to_markdown(data.text.trim()));
                out.push_str("\n\n");
            }
            Block::Header(data) => render_header(&mut out, data)?,
            Block::List(data) => render_list(&mut out, data),
            Block::Code(data) => render_code(&mut out, data),
            Block::Quote(data) => render_quote(&mut out, data),
            Block::Alert(data) => render_alert(&mut out, index, data)?,
            Block::Table(data) => render_table(&mut out, data),
            Block::Delimiter(_) => out.push_str("---\n\n"),
            Block::Image(data) => render_image(&mut out, data, options),
            Block::LinkTool(data) => {
                out.push_str(&data.link);
                out.push_str("\n\n");
            }
            Block::Raw(data) => {
                out.push_str(&data.html);
                out.push_str("\n\n");
            }
        }
    }

    Ok(out.trim().to_string())
}

fn render_header(out: &mut String, data: &HeaderData) -> Result<(), ConvertError> {
    if !(1..=6).contains(&data.level) {
        return Err(ConvertError::InvalidLevel(data.level));
    }
    out.push_str(&"#".repeat(data.level as usize));
    out.push(' ');
    out.push_str(&html_to_markdown(&data.text));
    out.push_str("\n\n");
    Ok(())
}

fn render_list(out: &mut String, data: &ListData) {
    render_items(out, &data.items, data.style, &data.meta, 0);
    out.push('\n');
}

fn render_items(
    out: &mut String,
    items: &[ListItem],
    style: ListStyle,
    meta: &ListMeta,
    depth: usize,
) {
    let indent = "    ".repeat(depth);
    for (index, item) in items.iter().enumerate() {
        let content = html_to_markdown(&item.content);
        match style {
            ListStyle::Checklist => {
                let marker = if item.checked.unwrap_or(false) {
                    "[x]"
                } else {
                    "[ ]"
                };
                out.push_str(&format!("{indent}{marker} {content}\n"));
            }
            ListStyle::Ordered => {
                let start = i64::from(meta.start.unwrap_or(1));
                // Nested levels inherit the source's numbering convention:
                // the first marker at depth d is start + d * (start - 1).
                let base = start + depth as i64 * (start - 1);
                let counter = meta.counter_type.unwrap_or(CounterType::Decimal);
                let marker = ordered_marker(base + index as i64, counter);
                out.push_str(&format!("{indent}{marker}{content}\n"));
            }
            ListStyle::Unordered => {
                out.push_str(&format!("{indent}- {content}\n"));
            }
        }
        if !item.items.is_empty() {
            render_items(out, &item.items, style, meta, depth + 1);
        }
    }
}

fn ordered_marker(index: i64, counter: CounterType) -> String {
    match counter {
        CounterType::LowerRoman => format!("{}. ", to_roman(index).to_lowercase()),
        CounterType::UpperRoman => format!("{}. ", to_roman(index)),
        CounterType::LowerAlpha if (1..=26).contains(&index) => {
            format!("{}. ", char::from(b'a' + index as u8 - 1))
        }
        CounterType::UpperAlpha if (1..=26).contains(&index) => {
            format!("{}. ", char::from(b'A' + index as u8 - 1))
        }
        _ => format!("{index}. "),
    }
}

fn to_roman(mut number: i64) -> String {
    const NUMERALS: [(i64, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    let mut result = String::new();
    for (value, symbol) in NUMERALS {
        while number >= value {
            number -= value;
            result.push_str(symbol);
        }
    }
    result
}

fn render_code(out: &mut String, data: &CodeData) {
    match data.language.as_deref() {
        Some(language) if !language.is_empty() => {
            out.push_str(&format!("```{language}\n{}\n```\n\n", data.code));
        }
        _ => {
            for line in data.code.split('\n') {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
    }
}

fn render_quote(out: &mut String, data: &QuoteData) {
    let text = html_to_markdown(&data.text);
    for line in text.split('\n') {
        out.push_str("> ");
        out.push_str(line);
        out.push('\n');
    }
    if !data.caption.is_empty() {
        let caption = html_to_markdown(&data.caption);
        out.push_str("> \n");
        out.push_str(&format!("> -- <caption>{caption}</caption>\n"));
    }
    out.push('\n');
}

fn render_alert(out: &mut String, index: usize, data: &AlertData) -> Result<(), ConvertError> {
    let header = match data.kind {
        AlertKind::Primary => "[!NOTE]",
        AlertKind::Success => "[!TIP]",
        AlertKind::Secondary => "[!IMPORTANT]",
        AlertKind::Warning => "[!WARNING]",
        AlertKind::Danger => "[!CAUTION]",
        AlertKind::Info => {
            return Err(ConvertError::SchemaViolation {
                index,
                field: "type".to_string(),
                reason: "alert type 'info' has no markdown header".to_string(),
            })
        }
    };

    out.push_str(&format!("> {header}\n"));

    if data.align == Alignment::Center {
        // Centered alerts keep their raw HTML body inside an aligning div.
        out.push_str("> <div align='center'>\n");
        for line in data.message.split('\n') {
            out.push_str(&format!("> {line}\n"));
        }
        out.push_str("> </div>\n");
    } else {
        let message = html_to_markdown(&data.message);
        for line in message.split('\n') {
            out.push_str(&format!("> {line}\n"));
        }
    }
    out.push('\n');
    Ok(())
}

fn render_table(out: &mut String, data: &TableData) {
    for (row_index, row) in data.content.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|cell| html_to_markdown(cell)).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
        if data.with_headings && row_index == 0 {
            out.push('|');
            for _ in 0..cells.len() {
                out.push_str(" --- |");
            }
            out.push('\n');
        }
    }
    out.push('\n');
}

fn render_image(out: &mut String, data: &ImageData, options: &RenderOptions) {
    if !data.caption.is_empty() {
        let mut classes = Vec::new();
        if options.image_with_border {
            classes.push("with-border");
        }
        if options.image_with_background {
            classes.push("with-background");
        }
        if options.image_stretched {
            classes.push("stretched");
        }
        out.push_str(&format!(
            "<figure><img src=\"{}\" alt=\"{}\" class=\"{}\"><figcaption>{}</figcaption></figure>\n\n",
            html_escape(&data.file.url),
            html_escape(&data.caption),
            classes.join(" "),
            html_escape(&data.caption),
        ));
    } else {
        out.push_str(&format!("![{}]({})\n", data.caption, data.file.url));
        out.push_str("<!-- Options: ");
        if options.image_with_border {
            out.push_str("border, ");
        }
        if options.image_with_background {
            out.push_str("background, ");
        }
        if options.image_stretched {
            out.push_str("stretched, ");
        }
        out.push_str("-->\n\n");
    }
}
