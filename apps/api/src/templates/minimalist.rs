//! Minimalist: upper-case name in the theme colour, a single contact line,
//! thin rules under section titles and plain skill runs.

use crate::layout::blocks::{
    education_block_id, experience_block_id, ContentBlock, Element, FlowRun, TextRole, TextRun,
    Tone, EDUCATION_TITLE_ID, EXPERIENCE_TITLE_ID, HEADER_ID, SKILLS_ID, SUMMARY_ID,
};
use crate::models::design::{ResolvedDesign, TextAlignment};
use crate::models::resume::{date_range, ResumeContent};
use crate::templates::classic::footer;
use crate::templates::TemplateId;

const CONTACT_SEPARATOR: &str = " • ";

pub fn produce(
    content: &ResumeContent,
    design: &ResolvedDesign,
    _template: TemplateId,
) -> Vec<ContentBlock> {
    let info = &content.personal_info;
    let mut blocks = Vec::new();

    blocks.push(ContentBlock::new(
        HEADER_ID,
        vec![
            Element::Text(
                TextRun::new(&info.full_name, TextRole::Name)
                    .tone(Tone::Theme)
                    .uppercase()
                    .align(TextAlignment::Center)
                    .margin(0.25),
            ),
            Element::Text(
                TextRun::new(&info.title, TextRole::Headline)
                    .tone(Tone::Secondary)
                    .align(TextAlignment::Center)
                    .margin(0.5),
            ),
            Element::Text(
                TextRun::new(info.contact_items().join(CONTACT_SEPARATOR), TextRole::Detail)
                    .tone(Tone::Muted)
                    .align(TextAlignment::Center),
            ),
        ],
    ));

    if let Some(summary) = info.summary_text() {
        let mut elements = section_title("Summary", design);
        elements.push(Element::Text(
            TextRun::new(summary, TextRole::Body).tone(Tone::Secondary),
        ));
        blocks.push(ContentBlock::new(SUMMARY_ID, elements));
    }

    if !content.experience.is_empty() {
        blocks.push(ContentBlock::new(
            EXPERIENCE_TITLE_ID,
            section_title("Experience", design),
        ));
        for exp in &content.experience {
            blocks.push(ContentBlock::new(
                experience_block_id(&exp.id),
                vec![
                    Element::Row {
                        left: TextRun::new(&exp.company, TextRole::Body).bold(),
                        right: TextRun::new(
                            date_range(&exp.start_date, &exp.end_date, exp.current),
                            TextRole::Detail,
                        )
                        .tone(Tone::Muted),
                    },
                    Element::Text(
                        TextRun::new(&exp.position, TextRole::Body)
                            .tone(Tone::Secondary)
                            .margin(0.25),
                    ),
                    Element::Text(
                        TextRun::new(&exp.description, TextRole::Detail).tone(Tone::Secondary),
                    ),
                ],
            ));
        }
    }

    if !content.education.is_empty() {
        blocks.push(ContentBlock::new(
            EDUCATION_TITLE_ID,
            section_title("Education", design),
        ));
        for edu in &content.education {
            blocks.push(ContentBlock::new(
                education_block_id(&edu.id),
                vec![
                    Element::Row {
                        left: TextRun::new(&edu.institution, TextRole::Body).bold(),
                        right: TextRun::new(
                            date_range(&edu.start_date, &edu.end_date, edu.current),
                            TextRole::Detail,
                        )
                        .tone(Tone::Muted),
                    },
                    Element::Text(
                        TextRun::new(&edu.degree, TextRole::Body)
                            .tone(Tone::Secondary)
                            .margin(0.25),
                    ),
                    Element::Text(
                        TextRun::new(&edu.description, TextRole::Detail).tone(Tone::Secondary),
                    ),
                ],
            ));
        }
    }

    if !content.skills.is_empty() {
        let mut elements = section_title("Skills", design);
        elements.push(Element::Flow(FlowRun {
            items: content.skills.iter().map(|s| s.name.clone()).collect(),
            role: TextRole::Body,
            tone: Tone::Secondary,
            pill: false,
            align: None,
            margin_bottom_rem: 0.0,
        }));
        blocks.push(ContentBlock::new(SKILLS_ID, elements));
    }

    blocks.push(footer());
    blocks
}

fn section_title(title: &str, design: &ResolvedDesign) -> Vec<Element> {
    vec![
        Element::Text(
            TextRun::new(title, TextRole::SectionTitle)
                .tone(Tone::Theme)
                .uppercase()
                .margin(0.25),
        ),
        Element::Rule {
            thickness_px: 1.0,
            tone: Tone::Muted,
            margin_bottom_rem: design.item_gap_rem,
        },
    ]
}
