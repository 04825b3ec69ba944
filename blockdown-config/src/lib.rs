//! Shared configuration loader for the blockdown toolchain.
//!
//! `defaults/blockdown.default.toml` is embedded into every binary so that
//! docs and runtime behavior stay in sync. Applications layer user-specific
//! files on top of those defaults via [`Loader`] before deserializing into
//! [`BlockdownConfig`].

use blockdown::{Alignment, ParseOptions, RenderOptions};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/blockdown.default.toml");

/// Top-level configuration consumed by blockdown applications.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockdownConfig {
    pub parse: ParseConfig,
    pub render: RenderConfig,
}

/// Mirrors the knobs exposed by the Markdown → blocks parser.
#[derive(Debug, Clone, Deserialize)]
pub struct ParseConfig {
    pub max_depth: usize,
    pub quote_caption_align: ConfigAlignment,
    pub table_stretched: bool,
    pub image_stretched: bool,
    pub image_with_border: bool,
    pub image_with_background: bool,
}

/// Mirrors the knobs exposed by the blocks → Markdown renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub image_with_border: bool,
    pub image_with_background: bool,
    pub image_stretched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ConfigAlignment {
    #[serde(rename = "left")]
    Left,
    #[serde(rename = "center")]
    Center,
}

impl From<ConfigAlignment> for Alignment {
    fn from(align: ConfigAlignment) -> Self {
        match align {
            ConfigAlignment::Left => Alignment::Left,
            ConfigAlignment::Center => Alignment::Center,
        }
    }
}

impl From<&ParseConfig> for ParseOptions {
    fn from(config: &ParseConfig) -> Self {
        ParseOptions {
            max_depth: config.max_depth,
            quote_caption_align: config.quote_caption_align.into(),
            table_stretched: config.table_stretched,
            image_stretched: config.image_stretched,
            image_with_border: config.image_with_border,
            image_with_background: config.image_with_background,
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        RenderOptions {
            image_with_border: config.image_with_border,
            image_with_background: config.image_with_background,
            image_stretched: config.image_stretched,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<BlockdownConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
