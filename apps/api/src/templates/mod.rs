//! Template registry.
//!
//! A template is a visual skin over the same resume content. Each id maps to
//! a block producer; ids without a dedicated producer fall back to the classic
//! one so every skin still paginates correctly.

pub mod classic;
pub mod executive;
pub mod minimalist;

use serde::{Deserialize, Serialize};

use crate::layout::blocks::{ContentBlock, PhotoSlot};
use crate::models::design::{DesignSettings, ResolvedDesign};
use crate::models::resume::ResumeContent;

/// Produces the ordered block list for one template.
pub type BlockProducer = fn(&ResumeContent, &ResolvedDesign, TemplateId) -> Vec<ContentBlock>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateId {
    #[default]
    Classic,
    Modern,
    Creative,
    Minimalist,
    Professional,
    Executive,
    Elegant,
    ModernMinimalist,
    Bold,
    Sidebar,
    Designer,
    Academic,
    Tech,
    Corporate,
    Startup,
    Compact,
}

/// How a template frames the profile photo, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoFrame {
    pub width_px: f32,
    pub height_px: f32,
    pub aspect_ratio: f32,
    pub round: bool,
}

/// Catalogue entry returned by `GET /api/v1/templates`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: TemplateId,
    pub name: &'static str,
    pub supports_photo: bool,
    pub photo_frame: Option<PhotoFrame>,
    /// Crop size for uploaded photos, `[width, height]` in pixels.
    pub processing_dimensions: Option<(u32, u32)>,
}

impl TemplateId {
    pub const ALL: [TemplateId; 16] = [
        TemplateId::Classic,
        TemplateId::Modern,
        TemplateId::Creative,
        TemplateId::Minimalist,
        TemplateId::Professional,
        TemplateId::Executive,
        TemplateId::Elegant,
        TemplateId::ModernMinimalist,
        TemplateId::Bold,
        TemplateId::Sidebar,
        TemplateId::Designer,
        TemplateId::Academic,
        TemplateId::Tech,
        TemplateId::Corporate,
        TemplateId::Startup,
        TemplateId::Compact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Classic => "classic",
            TemplateId::Modern => "modern",
            TemplateId::Creative => "creative",
            TemplateId::Minimalist => "minimalist",
            TemplateId::Professional => "professional",
            TemplateId::Executive => "executive",
            TemplateId::Elegant => "elegant",
            TemplateId::ModernMinimalist => "modern-minimalist",
            TemplateId::Bold => "bold",
            TemplateId::Sidebar => "sidebar",
            TemplateId::Designer => "designer",
            TemplateId::Academic => "academic",
            TemplateId::Tech => "tech",
            TemplateId::Corporate => "corporate",
            TemplateId::Startup => "startup",
            TemplateId::Compact => "compact",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TemplateId::Classic => "Classic",
            TemplateId::Modern => "Modern",
            TemplateId::Creative => "Creative",
            TemplateId::Minimalist => "Minimalist",
            TemplateId::Professional => "Professional",
            TemplateId::Executive => "Executive",
            TemplateId::Elegant => "Elegant",
            TemplateId::ModernMinimalist => "Modern Minimalist",
            TemplateId::Bold => "Bold",
            TemplateId::Sidebar => "Sidebar",
            TemplateId::Designer => "Designer",
            TemplateId::Academic => "Academic",
            TemplateId::Tech => "Tech",
            TemplateId::Corporate => "Corporate",
            TemplateId::Startup => "Startup",
            TemplateId::Compact => "Compact",
        }
    }

    /// Lenient lookup; unknown ids resolve to the classic template.
    pub fn parse(raw: &str) -> TemplateId {
        let raw = raw.trim();
        TemplateId::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or_default()
    }

    pub fn supports_photo(self) -> bool {
        matches!(
            self,
            TemplateId::Sidebar
                | TemplateId::Modern
                | TemplateId::Creative
                | TemplateId::Designer
                | TemplateId::Executive
                | TemplateId::Tech
                | TemplateId::Corporate
                | TemplateId::Startup
                | TemplateId::Compact
        )
    }

    /// Display frame for the profile photo, `None` when the template shows
    /// no photo.
    pub fn photo_frame(self) -> Option<PhotoFrame> {
        if !self.supports_photo() {
            return None;
        }
        let (width_px, height_px, round) = match self {
            TemplateId::Sidebar => (200.0, 200.0, true),
            TemplateId::Modern => (180.0, 180.0, true),
            TemplateId::Creative => (250.0, 250.0, true),
            TemplateId::Designer => (300.0, 300.0, false),
            TemplateId::Executive => (200.0, 240.0, false),
            TemplateId::Tech => (112.0, 112.0, true),
            TemplateId::Corporate | TemplateId::Startup => (128.0, 128.0, true),
            TemplateId::Compact => (80.0, 80.0, true),
            _ => (200.0, 200.0, true),
        };
        Some(PhotoFrame {
            width_px,
            height_px,
            aspect_ratio: width_px / height_px,
            round,
        })
    }

    /// Pixel size the photo pipeline should crop to: twice the display frame
    /// so the image stays sharp on high-density screens and in exports.
    pub fn processing_dimensions(self) -> Option<(u32, u32)> {
        self.photo_frame()
            .map(|f| ((f.width_px * 2.0) as u32, (f.height_px * 2.0) as u32))
    }

    pub fn producer(self) -> BlockProducer {
        match self {
            TemplateId::Executive => executive::produce,
            TemplateId::Minimalist | TemplateId::ModernMinimalist => minimalist::produce,
            _ => classic::produce,
        }
    }

    pub fn summary(self) -> TemplateSummary {
        TemplateSummary {
            id: self,
            name: self.display_name(),
            supports_photo: self.supports_photo(),
            photo_frame: self.photo_frame(),
            processing_dimensions: self.processing_dimensions(),
        }
    }
}

impl From<String> for TemplateId {
    fn from(raw: String) -> Self {
        TemplateId::parse(&raw)
    }
}

impl From<TemplateId> for String {
    fn from(id: TemplateId) -> Self {
        id.as_str().to_string()
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the design and runs the template's producer.
pub fn produce(
    content: &ResumeContent,
    settings: &DesignSettings,
    template: TemplateId,
) -> (ResolvedDesign, Vec<ContentBlock>) {
    let design = settings.resolve();
    let blocks = (template.producer())(content, &design, template);
    (design, blocks)
}

/// Photo slot for `template`, when it shows photos and the resume has one.
pub(crate) fn photo_slot(content: &ResumeContent, template: TemplateId) -> Option<PhotoSlot> {
    let frame = template.photo_frame()?;
    let photo = content.personal_info.photo.as_ref()?;
    let url = photo.url.trim();
    if url.is_empty() {
        return None;
    }
    Some(PhotoSlot {
        url: url.to_string(),
        width_px: frame.width_px,
        height_px: frame.height_px,
        round: frame.round,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::resume::{Education, Experience, PersonalInfo, ResumeContent, Skill};

    pub fn make_content(experiences: usize) -> ResumeContent {
        ResumeContent {
            personal_info: PersonalInfo {
                full_name: "Ada Lovelace".to_string(),
                title: "Analytical Engineer".to_string(),
                email: "ada@example.com".to_string(),
                phone: "+44 20 0000 0000".to_string(),
                address: "London".to_string(),
                summary: Some(
                    "Engineer who turns difficult numerical problems into dependable programs."
                        .to_string(),
                ),
                ..Default::default()
            },
            experience: (1..=experiences)
                .map(|i| Experience {
                    id: i.to_string(),
                    company: format!("Company {i}"),
                    position: "Senior Engineer".to_string(),
                    start_date: "2019".to_string(),
                    end_date: "2022".to_string(),
                    description: "Designed and shipped the scheduling core, cut latency \
                                  by half and mentored four engineers."
                        .to_string(),
                    ..Default::default()
                })
                .collect(),
            education: vec![Education {
                id: "e1".to_string(),
                institution: "University of London".to_string(),
                degree: "BSc Mathematics".to_string(),
                start_date: "2012".to_string(),
                end_date: "2015".to_string(),
                ..Default::default()
            }],
            skills: ["Rust", "Distributed Systems", "Numerical Methods"]
                .iter()
                .enumerate()
                .map(|(i, name)| Skill {
                    id: format!("s{i}"),
                    name: name.to_string(),
                    level: 4,
                })
                .collect(),
        }
    }
}
