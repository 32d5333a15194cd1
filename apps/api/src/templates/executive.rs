//! Executive: portrait photo above a centred header, upper-case section
//! titles over a theme-coloured rule, competencies as a dotted meter.

use crate::layout::blocks::{
    education_block_id, experience_block_id, ContentBlock, Element, FlowRun, TextRole, TextRun,
    Tone, EDUCATION_TITLE_ID, EXPERIENCE_TITLE_ID, HEADER_ID, SKILLS_ID, SUMMARY_ID,
};
use crate::models::design::{ResolvedDesign, TextAlignment};
use crate::models::resume::{date_range, ResumeContent};
use crate::templates::classic::footer;
use crate::templates::{photo_slot, TemplateId};

const RULE_PX: f32 = 2.0;

pub fn produce(
    content: &ResumeContent,
    design: &ResolvedDesign,
    template: TemplateId,
) -> Vec<ContentBlock> {
    let info = &content.personal_info;
    let mut blocks = Vec::new();

    let mut header = Vec::new();
    if let Some(photo) = photo_slot(content, template) {
        header.push(Element::Photo {
            photo,
            margin_bottom_rem: 1.0,
        });
    }
    header.extend([
        Element::Text(
            TextRun::new(&info.full_name, TextRole::Name)
                .bold()
                .align(TextAlignment::Center)
                .margin(0.5),
        ),
        Element::Text(
            TextRun::new(&info.title, TextRole::Headline)
                .tone(Tone::Theme)
                .uppercase()
                .align(TextAlignment::Center)
                .margin(0.75),
        ),
        Element::Flow(FlowRun {
            items: info.contact_items(),
            role: TextRole::Detail,
            tone: Tone::Secondary,
            pill: false,
            align: Some(TextAlignment::Center),
            margin_bottom_rem: design.item_gap_rem,
        }),
        Element::Rule {
            thickness_px: RULE_PX,
            tone: Tone::Theme,
            margin_bottom_rem: 0.0,
        },
    ]);
    blocks.push(ContentBlock::new(HEADER_ID, header));

    if let Some(summary) = info.summary_text() {
        let mut elements = section_title("Executive Profile", design);
        elements.push(Element::Text(
            TextRun::new(summary, TextRole::Body).tone(Tone::Secondary),
        ));
        blocks.push(ContentBlock::new(SUMMARY_ID, elements));
    }

    if !content.experience.is_empty() {
        blocks.push(ContentBlock::new(
            EXPERIENCE_TITLE_ID,
            section_title("Professional Experience", design),
        ));
        for exp in &content.experience {
            blocks.push(ContentBlock::new(
                experience_block_id(&exp.id),
                vec![
                    Element::Row {
                        left: TextRun::new(&exp.position, TextRole::Subheading)
                            .bold()
                            .uppercase(),
                        right: TextRun::new(
                            date_range(&exp.start_date, &exp.end_date, exp.current),
                            TextRole::Detail,
                        )
                        .tone(Tone::Muted)
                        .bold(),
                    },
                    Element::Text(
                        TextRun::new(&exp.company, TextRole::Body)
                            .tone(Tone::Theme)
                            .bold()
                            .margin(0.5),
                    ),
                    Element::Text(
                        TextRun::new(&exp.description, TextRole::Body).tone(Tone::Secondary),
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
                        left: TextRun::new(&edu.degree, TextRole::Subheading).bold(),
                        right: TextRun::new(
                            date_range(&edu.start_date, &edu.end_date, edu.current),
                            TextRole::Detail,
                        )
                        .tone(Tone::Muted),
                    },
                    Element::Text(
                        TextRun::new(&edu.institution, TextRole::Body)
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
        let mut elements = section_title("Core Competencies", design);
        elements.push(Element::SkillMeter {
            entries: content
                .skills
                .iter()
                .map(|s| (s.name.clone(), s.clamped_level()))
                .collect(),
            margin_bottom_rem: 0.0,
        });
        blocks.push(ContentBlock::new(SKILLS_ID, elements));
    }

    blocks.push(footer());
    blocks
}

fn section_title(title: &str, design: &ResolvedDesign) -> Vec<Element> {
    vec![
        Element::Text(
            TextRun::new(title, TextRole::SectionTitle)
                .bold()
                .uppercase()
                .margin(0.25),
        ),
        Element::Rule {
            thickness_px: RULE_PX,
            tone: Tone::Theme,
            margin_bottom_rem: design.item_gap_rem,
        },
    ]
}
