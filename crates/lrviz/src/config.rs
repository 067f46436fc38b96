//! Configuration types for revealing and drawing automata.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as TOML files; every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining reveal and style settings.
//! - [`RevealConfig`] - Controls how newly revealed nodes are placed.
//! - [`StyleConfig`] - Controls colors and fonts of exported diagrams.
//!
//! # Example
//!
//! ```
//! # use lrviz::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.reveal().node_offset(), 100.0);
//! assert!(config.style().node_fill().is_ok());
//! ```

use serde::Deserialize;

use lrviz_core::color::Color;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Reveal configuration section.
    #[serde(default)]
    reveal: RevealConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(reveal: RevealConfig, style: StyleConfig) -> Self {
        Self { reveal, style }
    }

    /// Returns the reveal configuration.
    pub fn reveal(&self) -> &RevealConfig {
        &self.reveal
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Settings of the reveal engine.
#[derive(Debug, Clone, Deserialize)]
pub struct RevealConfig {
    /// Diagonal offset applied to a node revealed from an already visible source.
    #[serde(default = "RevealConfig::default_node_offset")]
    node_offset: f32,
}

impl RevealConfig {
    const DEFAULT_NODE_OFFSET: f32 = 100.0;

    fn default_node_offset() -> f32 {
        Self::DEFAULT_NODE_OFFSET
    }

    /// Creates a reveal configuration with the given placement offset.
    pub fn new(node_offset: f32) -> Self {
        Self { node_offset }
    }

    /// Offset added to both coordinates of the source position when placing
    /// a newly revealed target node.
    pub fn node_offset(&self) -> f32 {
        self.node_offset
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NODE_OFFSET)
    }
}

/// Visual styling of exported diagrams.
///
/// Colors are kept as strings and parsed on access so that an invalid value
/// is reported where it is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleConfig {
    /// Background color; transparent when unset.
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    node_fill: Option<String>,

    #[serde(default)]
    node_stroke: Option<String>,

    #[serde(default)]
    edge_color: Option<String>,

    #[serde(default)]
    text_color: Option<String>,

    #[serde(default)]
    font_family: Option<String>,

    #[serde(default)]
    font_size: Option<u16>,
}

impl StyleConfig {
    const DEFAULT_FONT_FAMILY: &str = "Courier New";
    const DEFAULT_FONT_SIZE: u16 = 13;

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid color.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Fill color of item-set boxes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid color.
    pub fn node_fill(&self) -> Result<Color, String> {
        parse_color(self.node_fill.as_deref(), "white", "node fill")
    }

    /// Border color of item-set boxes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid color.
    pub fn node_stroke(&self) -> Result<Color, String> {
        parse_color(self.node_stroke.as_deref(), "#334155", "node stroke")
    }

    /// Color of transition arrows and their labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid color.
    pub fn edge_color(&self) -> Result<Color, String> {
        parse_color(self.edge_color.as_deref(), "#1e40af", "edge color")
    }

    /// Color of item-set text.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid color.
    pub fn text_color(&self) -> Result<Color, String> {
        parse_color(self.text_color.as_deref(), "black", "text color")
    }

    pub fn font_family(&self) -> &str {
        self.font_family
            .as_deref()
            .unwrap_or(Self::DEFAULT_FONT_FAMILY)
    }

    pub fn font_size(&self) -> u16 {
        self.font_size.unwrap_or(Self::DEFAULT_FONT_SIZE)
    }
}

fn parse_color(value: Option<&str>, default: &str, what: &str) -> Result<Color, String> {
    Color::new(value.unwrap_or(default)).map_err(|err| format!("Invalid {what} in config: {err}"))
}
