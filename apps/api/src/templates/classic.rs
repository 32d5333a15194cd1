//! Classic: centred header, underlined section titles, tag-style skills.
//!
//! Also the fallback for every template without a dedicated producer. For
//! those that show photos, the photo sits to the left of the header.

use crate::layout::blocks::{
    education_block_id, experience_block_id, ContentBlock, Element, FlowRun, TextRole, TextRun,
    Tone, EDUCATION_TITLE_ID, EXPERIENCE_TITLE_ID, FOOTER_ID, HEADER_ID, SKILLS_ID, SUMMARY_ID,
};
use crate::models::design::{ResolvedDesign, TextAlignment};
use crate::models::resume::{date_range, ResumeContent};
use crate::templates::{photo_slot, TemplateId};

pub const FOOTER_TEXT: &str = "Generated with cv-api";

pub fn produce(
    content: &ResumeContent,
    design: &ResolvedDesign,
    template: TemplateId,
) -> Vec<ContentBlock> {
    let info = &content.personal_info;
    let mut blocks = Vec::new();

    blocks.push(header(content, design, template));

    if let Some(summary) = info.summary_text() {
        blocks.push(ContentBlock::new(
            SUMMARY_ID,
            vec![
                section_title("Professional Summary", design),
                Element::Text(TextRun::new(summary, TextRole::Body).tone(Tone::Secondary)),
            ],
        ));
    }

    if !content.experience.is_empty() {
        blocks.push(ContentBlock::new(
            EXPERIENCE_TITLE_ID,
            vec![section_title("Work Experience", design)],
        ));
        for exp in &content.experience {
            let mut elements = vec![
                Element::Row {
                    left: TextRun::new(&exp.position, TextRole::Subheading).bold(),
                    right: TextRun::new(
                        date_range(&exp.start_date, &exp.end_date, exp.current),
                        TextRole::Detail,
                    )
                    .tone(Tone::Muted),
                },
                Element::Text(
                    TextRun::new(&exp.company, TextRole::Body)
                        .tone(Tone::Theme)
                        .bold()
                        .margin(0.5),
                ),
            ];
            if let Some(location) = exp.location.as_deref() {
                elements.push(Element::Text(
                    TextRun::new(location, TextRole::Detail)
                        .tone(Tone::Muted)
                        .margin(0.25),
                ));
            }
            elements.push(Element::Text(
                TextRun::new(&exp.description, TextRole::Body).tone(Tone::Secondary),
            ));
            blocks.push(ContentBlock::new(experience_block_id(&exp.id), elements));
        }
    }

    if !content.education.is_empty() {
        blocks.push(ContentBlock::new(
            EDUCATION_TITLE_ID,
            vec![section_title("Education", design)],
        ));
        for edu in &content.education {
            blocks.push(ContentBlock::new(
                education_block_id(&edu.id),
                vec![
                    Element::Row {
                        left: TextRun::new(&edu.institution, TextRole::Subheading).bold(),
                        right: TextRun::new(
                            date_range(&edu.start_date, &edu.end_date, edu.current),
                            TextRole::Detail,
                        )
                        .tone(Tone::Muted),
                    },
                    Element::Text(
                        TextRun::new(&edu.degree, TextRole::Body)
                            .tone(Tone::Theme)
                            .margin(0.5),
                    ),
                    Element::Text(
                        TextRun::new(&edu.description, TextRole::Body).tone(Tone::Secondary),
                    ),
                ],
            ));
        }
    }

    if !content.skills.is_empty() {
        blocks.push(ContentBlock::new(
            SKILLS_ID,
            vec![
                section_title("Skills", design),
                Element::Flow(FlowRun {
                    items: content.skills.iter().map(|s| s.name.clone()).collect(),
                    role: TextRole::Detail,
                    tone: Tone::Main,
                    pill: true,
                    align: None,
                    margin_bottom_rem: 0.0,
                }),
            ],
        ));
    }

    blocks.push(footer());
    blocks
}

fn header(content: &ResumeContent, design: &ResolvedDesign, template: TemplateId) -> ContentBlock {
    let info = &content.personal_info;
    let photo = photo_slot(content, template);
    let align = if photo.is_some() {
        TextAlignment::Left
    } else {
        TextAlignment::Center
    };

    let body = vec![
        Element::Text(
            TextRun::new(&info.full_name, TextRole::Name)
                .tone(Tone::Theme)
                .bold()
                .align(align)
                .margin(0.5),
        ),
        Element::Text(
            TextRun::new(&info.title, TextRole::Headline)
                .tone(Tone::Secondary)
                .align(align)
                .margin(0.75),
        ),
        Element::Flow(FlowRun {
            items: info.contact_items(),
            role: TextRole::Detail,
            tone: Tone::Muted,
            pill: false,
            align: Some(align),
            margin_bottom_rem: design.item_gap_rem,
        }),
    ];

    let elements = match photo {
        Some(photo) => vec![Element::WithPhoto {
            photo,
            body,
            margin_bottom_rem: 0.0,
        }],
        None => body,
    };
    ContentBlock::new(HEADER_ID, elements)
}

fn section_title(title: &str, design: &ResolvedDesign) -> Element {
    Element::Text(
        TextRun::new(title, TextRole::SectionTitle)
            .bold()
            .margin(design.item_gap_rem),
    )
}

pub(crate) fn footer() -> ContentBlock {
    ContentBlock::new(
        FOOTER_ID,
        vec![Element::Text(
            TextRun::new(FOOTER_TEXT, TextRole::Caption)
                .tone(Tone::Muted)
                .align(TextAlignment::Center),
        )],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Experience, Photo};
    use crate::templates::fixtures::make_content;

    #[test]
    fn test_header_centred_without_photo() {
        let content = make_content(1);
        let blocks = produce(&content, &ResolvedDesign::default(), TemplateId::Classic);
        match &blocks[0].elements[0] {
            Element::Text(run) => {
                assert_eq!(run.text, "Ada Lovelace");
                assert_eq!(run.align, Some(TextAlignment::Center));
            }
            other => panic!("unexpected header element {other:?}"),
        }
    }

    #[test]
    fn test_photo_templates_put_photo_beside_header() {
        let mut content = make_content(1);
        content.personal_info.photo = Some(Photo {
            url: "https://cdn.example.com/ada.jpg".to_string(),
            ..Default::default()
        });
        let blocks = produce(&content, &ResolvedDesign::default(), TemplateId::Tech);
        assert!(matches!(
            &blocks[0].elements[0],
            Element::WithPhoto { photo, .. } if photo.width_px == 112.0
        ));
    }

    #[test]
    fn test_current_role_shows_present() {
        let mut content = make_content(0);
        content.experience.push(Experience {
            id: "now".to_string(),
            position: "Lead".to_string(),
            start_date: "2023".to_string(),
            current: true,
            ..Default::default()
        });
        let blocks = produce(&content, &ResolvedDesign::default(), TemplateId::Classic);
        let exp = blocks.iter().find(|b| b.id == "exp-now").unwrap();
        match &exp.elements[0] {
            Element::Row { right, .. } => assert_eq!(right.text, "2023 - Present"),
            other => panic!("unexpected element {other:?}"),
        }
    }
}
