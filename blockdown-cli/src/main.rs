// Command-line interface for blockdown
//
// This binary converts Markdown posts to the editor's block JSON envelope and
// back. The core capabilities come from the blockdown crate; this layer only
// handles files, flags and configuration.
//
// Usage:
//  blockdown blocks <post.md> [-o <post.json>]    - Markdown to block envelope
//  blockdown markdown <post.json> [-o <post.md>]  - block envelope to Markdown
//
// Parse and render toggles come from an optional blockdown.toml layered over
// the embedded defaults (see blockdown-config). Link metadata is not fetched
// here: bare-URL paragraphs get empty metadata, the backend fills them in.

use blockdown::{Document, NoLinkMetadata, ParseOptions, RenderOptions};
use blockdown_config::{BlockdownConfig, Loader};
use clap::{Arg, Command, ValueHint};
use std::fs;

fn build_cli() -> Command {
    Command::new("blockdown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown posts to editor blocks and back")
        .long_about(
            "blockdown converts between Markdown documents and the block JSON\n\
            envelope used by the editor.\n\n\
            Commands:\n  \
            - blocks:   parse a Markdown post into {frontmatter, blocks} JSON\n  \
            - markdown: render {frontmatter, blocks} JSON back to Markdown\n\n\
            Examples:\n  \
            blockdown blocks post.md                 # JSON to stdout\n  \
            blockdown blocks post.md -o post.json    # JSON to file\n  \
            blockdown markdown post.json -o post.md  # Markdown to file",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a blockdown.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("blocks")
                .about("Parse a Markdown post into the block JSON envelope")
                .arg(
                    Arg::new("input")
                        .help("Path to the Markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("markdown")
                .about("Render the block JSON envelope back to Markdown")
                .arg(
                    Arg::new("input")
                        .help("Path to the JSON file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_config(matches.get_one::<String>("config"));

    match matches.subcommand() {
        Some(("blocks", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output");
            handle_blocks_command(input, output.map(String::as_str), &config);
        }
        Some(("markdown", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output");
            handle_markdown_command(input, output.map(String::as_str), &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn load_config(path: Option<&String>) -> BlockdownConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("blockdown.toml"),
    };
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    })
}

/// Handle the blocks command (Markdown → JSON envelope)
fn handle_blocks_command(input: &str, output: Option<&str>, config: &BlockdownConfig) {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let options = ParseOptions::from(&config.parse);
    let document = Document::parse(&source, &options, &NoLinkMetadata).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let json = serde_json::to_string_pretty(&document).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    write_result(output, &format!("{json}\n"));
}

/// Handle the markdown command (JSON envelope → Markdown)
fn handle_markdown_command(input: &str, output: Option<&str>, config: &BlockdownConfig) {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let document: Document = serde_json::from_str(&source).unwrap_or_else(|e| {
        eprintln!("Invalid block envelope: {e}");
        std::process::exit(1);
    });

    let options = RenderOptions::from(&config.render);
    let markdown = document.to_markdown(&options).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    write_result(output, &markdown);
}

fn write_result(output: Option<&str>, data: &str) {
    match output {
        Some(path) => {
            fs::write(path, data).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{data}"),
    }
}
