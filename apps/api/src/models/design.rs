//! User-chosen design settings and their resolution against documented defaults.
//!
//! Every numeric field is optional on the wire. `DesignSettings::resolve` merges
//! the defaults in before anything downstream reads a value, so the layout
//! pipeline only ever sees a fully populated `ResolvedDesign`.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontFamily;
use crate::layout::page::REM_PX;

pub const DEFAULT_THEME_COLOR: &str = "#3b82f6";
pub const DEFAULT_HEADER_SIZE: f32 = 2.25;
pub const DEFAULT_SECTION_TITLE_SIZE: f32 = 1.5;
pub const DEFAULT_BODY_SIZE: f32 = 1.0;
pub const DEFAULT_LINE_HEIGHT: f32 = 1.6;
pub const DEFAULT_SECTION_PADDING_REM: f32 = 2.0;
pub const DEFAULT_ITEM_GAP_REM: f32 = 1.0;
pub const DEFAULT_SCALE: f32 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlignment {
    pub fn css(self) -> &'static str {
        match self {
            TextAlignment::Left => "left",
            TextAlignment::Center => "center",
            TextAlignment::Right => "right",
            TextAlignment::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontSizes {
    pub header: Option<f32>,
    pub section_title: Option<f32>,
    pub body: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Spacing {
    pub line_height: Option<f32>,
    pub section_padding: Option<f32>,
    pub item_gap: Option<f32>,
}

/// Design settings as stored and sent by the editor. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignSettings {
    pub theme_color: Option<String>,
    pub font_family: Option<FontFamily>,
    pub text_alignment: Option<TextAlignment>,
    pub font_sizes: Option<FontSizes>,
    pub spacing: Option<Spacing>,
    /// Legacy global multiplier (0.7–1.3) applied on top of the font sizes.
    pub scale: Option<f32>,
}

/// Design settings with every default applied. Sizes are multipliers of 1rem.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDesign {
    pub theme_color: String,
    pub font: FontFamily,
    pub alignment: TextAlignment,
    pub header_size: f32,
    pub section_title_size: f32,
    pub body_size: f32,
    pub line_height: f32,
    pub section_padding_rem: f32,
    pub item_gap_rem: f32,
    pub scale: f32,
}

impl Default for ResolvedDesign {
    fn default() -> Self {
        DesignSettings::default().resolve()
    }
}

/// Keeps `value` only when it is a finite positive number.
fn positive_or(value: Option<f32>, default: f32) -> f32 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => default,
    }
}

/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, a bare colour keyword or
/// an `rgb()`/`rgba()`/`hsl()`/`hsla()` call. The value is spliced into inline
/// styles, so anything that could end the declaration is rejected.
fn is_css_color(value: &str) -> bool {
    if let Some(hex) = value.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    if value.chars().all(|c| c.is_ascii_alphabetic()) {
        return !value.is_empty();
    }

    let lower = value.to_ascii_lowercase();
    let args = ["rgb(", "rgba(", "hsl(", "hsla("]
        .iter()
        .find_map(|prefix| lower.strip_prefix(prefix))
        .and_then(|rest| rest.strip_suffix(')'));
    match args {
        Some(args) => args.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | ',' | '%' | '/' | '-' | '+')
        }),
        None => false,
    }
}

impl DesignSettings {
    pub fn resolve(&self) -> ResolvedDesign {
        let sizes = self.font_sizes.unwrap_or_default();
        let spacing = self.spacing.unwrap_or_default();

        let theme_color = self
            .theme_color
            .as_deref()
            .map(str::trim)
            .filter(|c| is_css_color(c))
            .unwrap_or(DEFAULT_THEME_COLOR)
            .to_string();

        // Padding and gap may legitimately be zero; only negatives fall back.
        let non_negative_or = |value: Option<f32>, default: f32| match value {
            Some(v) if v.is_finite() && v >= 0.0 => v,
            _ => default,
        };

        ResolvedDesign {
            theme_color,
            font: self.font_family.unwrap_or_default(),
            alignment: self.text_alignment.unwrap_or_default(),
            header_size: positive_or(sizes.header, DEFAULT_HEADER_SIZE),
            section_title_size: positive_or(sizes.section_title, DEFAULT_SECTION_TITLE_SIZE),
            body_size: positive_or(sizes.body, DEFAULT_BODY_SIZE),
            line_height: positive_or(spacing.line_height, DEFAULT_LINE_HEIGHT),
            section_padding_rem: non_negative_or(
                spacing.section_padding,
                DEFAULT_SECTION_PADDING_REM,
            ),
            item_gap_rem: non_negative_or(spacing.item_gap, DEFAULT_ITEM_GAP_REM),
            scale: positive_or(self.scale, DEFAULT_SCALE),
        }
    }
}

impl ResolvedDesign {
    pub fn header_px(&self) -> f32 {
        self.header_size * self.scale * REM_PX
    }

    pub fn section_title_px(&self) -> f32 {
        self.section_title_size * self.scale * REM_PX
    }

    pub fn body_px(&self) -> f32 {
        self.body_size * self.scale * REM_PX
    }

    /// Trailing padding after every block. Not affected by `scale`.
    pub fn section_padding_px(&self) -> f32 {
        self.section_padding_rem * REM_PX
    }

    pub fn css_font_stack(&self) -> &'static str {
        self.font.css_stack()
    }
}
