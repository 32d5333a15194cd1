//! Content blocks: the atomic, order-significant units the paginator moves
//! between pages. A block's content is a small element tree that both the
//! typesetter (for measurement) and the page renderer (for markup) walk, so
//! the two always agree on what is being laid out.

use crate::layout::page::REM_PX;
use crate::models::design::{ResolvedDesign, TextAlignment};

pub const HEADER_ID: &str = "header";
pub const SUMMARY_ID: &str = "summary";
pub const EXPERIENCE_TITLE_ID: &str = "experience-title";
pub const EDUCATION_TITLE_ID: &str = "education-title";
pub const SKILLS_ID: &str = "skills";
pub const FOOTER_ID: &str = "footer";

pub fn experience_block_id(entry_id: &str) -> String {
    format!("exp-{entry_id}")
}

pub fn education_block_id(entry_id: &str) -> String {
    format!("edu-{entry_id}")
}

/// Id given to a block whose laid-out box could not be found.
pub fn fallback_block_id(index: usize) -> String {
    format!("unknown-{index}")
}

// ────────────────────────────────────────────────────────────────────────────
// Text styling
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    /// The person's name.
    Name,
    /// Professional title under the name.
    Headline,
    SectionTitle,
    /// Entry titles such as position or institution.
    Subheading,
    Body,
    /// Dates, contact details, secondary lines.
    Detail,
    /// Fixed-size fine print, not affected by the scale settings.
    Caption,
}

impl TextRole {
    pub fn font_px(self, design: &ResolvedDesign) -> f32 {
        match self {
            TextRole::Name => design.header_px(),
            TextRole::Headline => design.body_px() * 1.25,
            TextRole::SectionTitle => design.section_title_px(),
            TextRole::Subheading => design.body_px() * 1.125,
            TextRole::Body => design.body_px(),
            TextRole::Detail => design.body_px() * 0.875,
            TextRole::Caption => 0.75 * REM_PX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Main,
    Secondary,
    Muted,
    Theme,
}

impl Tone {
    pub fn color(self, design: &ResolvedDesign) -> &str {
        match self {
            Tone::Main => "#111827",
            Tone::Secondary => "#4b5563",
            Tone::Muted => "#6b7280",
            Tone::Theme => design.theme_color.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub role: TextRole,
    pub tone: Tone,
    pub bold: bool,
    pub uppercase: bool,
    /// Overrides the document-wide alignment for this run.
    pub align: Option<TextAlignment>,
    pub margin_bottom_rem: f32,
}

impl TextRun {
    pub fn new(text: impl Into<String>, role: TextRole) -> Self {
        TextRun {
            text: text.into(),
            role,
            tone: Tone::Main,
            bold: false,
            uppercase: false,
            align: None,
            margin_bottom_rem: 0.0,
        }
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    pub fn align(mut self, align: TextAlignment) -> Self {
        self.align = Some(align);
        self
    }

    pub fn margin(mut self, rem: f32) -> Self {
        self.margin_bottom_rem = rem;
        self
    }

    /// The string as it is actually painted.
    pub fn display_text(&self) -> String {
        if self.uppercase {
            self.text.to_uppercase()
        } else {
            self.text.clone()
        }
    }
}

/// Wrapping list of short items (contact details, skill tags).
#[derive(Debug, Clone, PartialEq)]
pub struct FlowRun {
    pub items: Vec<String>,
    pub role: TextRole,
    pub tone: Tone,
    /// Render items as rounded tags with padding.
    pub pill: bool,
    pub align: Option<TextAlignment>,
    pub margin_bottom_rem: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoSlot {
    pub url: String,
    pub width_px: f32,
    pub height_px: f32,
    pub round: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Elements and blocks
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A wrapping paragraph.
    Text(TextRun),
    /// Left text wraps; right text never wraps and is pinned to the right edge.
    Row { left: TextRun, right: TextRun },
    Flow(FlowRun),
    /// One line per skill: name plus a five-dot proficiency meter.
    SkillMeter {
        entries: Vec<(String, u8)>,
        margin_bottom_rem: f32,
    },
    /// Horizontal rule.
    Rule {
        thickness_px: f32,
        tone: Tone,
        margin_bottom_rem: f32,
    },
    /// A photo on its own line, centred.
    Photo {
        photo: PhotoSlot,
        margin_bottom_rem: f32,
    },
    /// Photo on the left, `body` stacked beside it.
    WithPhoto {
        photo: PhotoSlot,
        body: Vec<Element>,
        margin_bottom_rem: f32,
    },
}

/// An atomic renderable unit. Never split across pages.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    pub id: String,
    pub elements: Vec<Element>,
}

impl ContentBlock {
    pub fn new(id: impl Into<String>, elements: Vec<Element>) -> Self {
        ContentBlock {
            id: id.into(),
            elements,
        }
    }
}

/// A block with the height it measured at. Only valid for the design and
/// content width it was measured under.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredBlock {
    pub id: String,
    pub height_px: f32,
    pub elements: Vec<Element>,
}

impl MeasuredBlock {
    pub fn new(block: ContentBlock, height_px: f32) -> Self {
        MeasuredBlock {
            id: block.id,
            height_px,
            elements: block.elements,
        }
    }

    /// A contentless block of a given height. Used to drive pagination with
    /// synthetic heights.
    pub fn synthetic(id: impl Into<String>, height_px: f32) -> Self {
        MeasuredBlock {
            id: id.into(),
            height_px,
            elements: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_block_ids() {
        assert_eq!(experience_block_id("42"), "exp-42");
        assert_eq!(education_block_id("x"), "edu-x");
        assert_eq!(fallback_block_id(3), "unknown-3");
    }

    #[test]
    fn test_caption_ignores_scale() {
        let mut design = ResolvedDesign::default();
        let before = TextRole::Caption.font_px(&design);
        design.scale = 1.3;
        assert_eq!(TextRole::Caption.font_px(&design), before);
        assert!(TextRole::Body.font_px(&design) > 16.0);
    }

    #[test]
    fn test_theme_tone_uses_design_color() {
        let mut design = ResolvedDesign::default();
        design.theme_color = "#ff0000".to_string();
        assert_eq!(Tone::Theme.color(&design), "#ff0000");
    }

    #[test]
    fn test_uppercase_display_text() {
        let run = TextRun::new("Skills", TextRole::SectionTitle).uppercase();
        assert_eq!(run.display_text(), "SKILLS");
    }
}
