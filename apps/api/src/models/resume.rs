use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::design::DesignSettings;
use crate::templates::TemplateId;

/// Photo attached to a resume by the photo pipeline. Rendered as-is; the URL
/// already points at the cropped, resized asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Photo {
    pub id: String,
    pub url: String,
    pub original_url: Option<String>,
    pub crop_data: Option<CropData>,
    pub file_name: String,
    pub file_size: u64,
    pub mime_type: String,
    pub resume_photo_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropData {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub zoom: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub photo: Option<Photo>,
}

impl PersonalInfo {
    /// Summary text, or `None` when absent or whitespace only.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Non-empty contact fields in display order.
    pub fn contact_items(&self) -> Vec<String> {
        [
            Some(self.email.as_str()),
            Some(self.phone.as_str()),
            Some(self.address.as_str()),
            self.location.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub location: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub level: i32,
}

impl Skill {
    /// Proficiency clamped to the 1–5 scale used by meter-style templates.
    pub fn clamped_level(&self) -> u8 {
        self.level.clamp(1, 5) as u8
    }
}

/// The editable resume document. List order is user-controlled and rendered
/// top-to-bottom, except skills which carry no ordering guarantee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeContent {
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
}

/// What the editor persists: content, design and the chosen skin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub content: ResumeContent,
    pub design_settings: DesignSettings,
    pub selected_template: TemplateId,
}

/// Human-readable date range, `"<start> - Present"` for current entries.
pub fn date_range(start: &str, end: &str, current: bool) -> String {
    let end = if current { "Present" } else { end.trim() };
    match (start.trim(), end) {
        ("", "") => String::new(),
        (s, "") => s.to_string(),
        ("", e) => e.to_string(),
        (s, e) => format!("{s} - {e}"),
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ResumeDocumentRow {
    pub id: Uuid,
    pub document: Json<ResumeDocument>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_deserializes_editor_payload() {
        let raw = r##"{
            "content": {
                "personalInfo": {"fullName": "Ada Lovelace", "title": "Engineer", "summary": "  "},
                "experience": [{"id": "a1", "company": "Engines", "position": "Analyst", "current": true}],
                "skills": [{"id": "s1", "name": "Math", "level": 9}]
            },
            "designSettings": {"themeColor": "#123456", "scale": 1.1},
            "selectedTemplate": "modern-minimalist"
        }"##;
        let doc: ResumeDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.content.personal_info.full_name, "Ada Lovelace");
        assert_eq!(doc.content.experience[0].id, "a1");
        assert!(doc.content.education.is_empty());
        assert_eq!(doc.selected_template, TemplateId::ModernMinimalist);
        assert_eq!(doc.design_settings.scale, Some(1.1));
    }

    #[test]
    fn test_blank_summary_is_none() {
        let info = PersonalInfo {
            summary: Some("   \n ".to_string()),
            ..Default::default()
        };
        assert_eq!(info.summary_text(), None);
    }

    #[test]
    fn test_contact_items_skip_empty_fields() {
        let info = PersonalInfo {
            email: "ada@example.com".to_string(),
            phone: " ".to_string(),
            location: Some("London".to_string()),
            ..Default::default()
        };
        assert_eq!(info.contact_items(), vec!["ada@example.com", "London"]);
    }

    #[test]
    fn test_skill_level_clamped() {
        let high = Skill {
            level: 50,
            ..Default::default()
        };
        let low = Skill {
            level: -2,
            ..Default::default()
        };
        assert_eq!(high.clamped_level(), 5);
        assert_eq!(low.clamped_level(), 1);
    }

    #[test]
    fn test_date_range_formats() {
        assert_eq!(date_range("2020", "2022", false), "2020 - 2022");
        assert_eq!(date_range("2020", "", true), "2020 - Present");
        assert_eq!(date_range("", "", false), "");
        assert_eq!(date_range("2019", "", false), "2019");
    }
}
