//! Page renderer: turns paginated blocks into fixed-size page canvases.
//!
//! Trusts the paginator's partition completely. The display zoom is applied
//! only by `render_preview_document`, around already-rendered pages.

use serde::Serialize;

use crate::layout::blocks::{Element, FlowRun, MeasuredBlock, PhotoSlot, TextRun};
use crate::layout::markup::{attr, text, PAGE_TEMPLATE, PREVIEW_TEMPLATE};
use crate::layout::page::{PageDimensions, FOOTER_OFFSET_MM};
use crate::layout::paginator::page_height;
use crate::layout::typesetter::{
    FLOW_GAP_PX, METER_DOT_PX, PHOTO_GAP_PX, PILL_PAD_X_PX, PILL_PAD_Y_PX, ROW_GAP_PX,
};
use crate::models::design::{ResolvedDesign, TextAlignment};

pub const DEFAULT_ZOOM: f32 = 0.8;
pub const MIN_ZOOM: f32 = 0.3;
pub const MAX_ZOOM: f32 = 2.0;

/// One page canvas, independently rasterizable at exactly page dimensions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    /// 1-based.
    pub number: usize,
    pub width_mm: f32,
    pub height_mm: f32,
    pub block_ids: Vec<String>,
    pub content_height_px: f32,
    pub html: String,
}

pub fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_finite() {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        DEFAULT_ZOOM
    }
}

/// Renders each page's blocks inside a `width × height` canvas with the
/// margin as padding and a `Page n` footer.
pub fn render(
    pages: &[Vec<MeasuredBlock>],
    dimensions: &PageDimensions,
    design: &ResolvedDesign,
) -> Vec<RenderedPage> {
    pages
        .iter()
        .enumerate()
        .map(|(index, page)| render_page(index + 1, page, dimensions, design))
        .collect()
}

fn render_page(
    number: usize,
    blocks: &[MeasuredBlock],
    dimensions: &PageDimensions,
    design: &ResolvedDesign,
) -> RenderedPage {
    let mut body = String::new();
    for block in blocks {
        body.push_str(&format!(
            "<div class=\"cv-block\" data-id=\"{}\" style=\"padding-bottom:{}rem;\">",
            attr(&block.id),
            design.section_padding_rem
        ));
        for element in &block.elements {
            render_element(element, design, &mut body);
        }
        body.push_str("</div>\n");
    }

    let html = PAGE_TEMPLATE
        .replace("{number}", &number.to_string())
        .replace("{width_mm}", &dimensions.width_mm.to_string())
        .replace("{height_mm}", &dimensions.height_mm.to_string())
        .replace("{margin_mm}", &dimensions.margin_mm.to_string())
        .replace("{footer_offset_mm}", &FOOTER_OFFSET_MM.to_string())
        .replace("{font_family}", &attr(design.css_font_stack()))
        .replace("{line_height}", &design.line_height.to_string())
        .replace("{text_align}", design.alignment.css())
        .replace("{blocks}", &body);

    RenderedPage {
        number,
        width_mm: dimensions.width_mm,
        height_mm: dimensions.height_mm,
        block_ids: blocks.iter().map(|b| b.id.clone()).collect(),
        content_height_px: page_height(blocks),
        html,
    }
}

/// Wraps rendered pages for on-screen display at `zoom`.
pub fn render_preview_document(pages: &[RenderedPage], zoom: f32) -> String {
    let pages_html: String = pages.iter().map(|p| p.html.as_str()).collect();
    PREVIEW_TEMPLATE
        .replace("{zoom}", &clamp_zoom(zoom).to_string())
        .replace("{pages}", &pages_html)
}

// ────────────────────────────────────────────────────────────────────────────
// Elements
// ────────────────────────────────────────────────────────────────────────────

fn text_style(run: &TextRun, design: &ResolvedDesign) -> String {
    let mut style = format!(
        "font-size:{}px;line-height:{};color:{};font-weight:{};",
        run.role.font_px(design),
        design.line_height,
        attr(run.tone.color(design)),
        if run.bold { 700 } else { 400 },
    );
    if let Some(align) = run.align {
        style.push_str(&format!("text-align:{};", align.css()));
    }
    style
}

fn flex_justify(align: TextAlignment) -> &'static str {
    match align {
        TextAlignment::Center => "center",
        TextAlignment::Right => "flex-end",
        TextAlignment::Left | TextAlignment::Justify => "flex-start",
    }
}

fn render_element(element: &Element, design: &ResolvedDesign, out: &mut String) {
    match element {
        Element::Text(run) => {
            if run.text.trim().is_empty() {
                return;
            }
            out.push_str(&format!(
                "<p style=\"margin:0 0 {}rem 0;white-space:pre-wrap;{}\">{}</p>",
                run.margin_bottom_rem,
                text_style(run, design),
                text(&run.display_text())
            ));
        }

        Element::Row { left, right } => {
            out.push_str(&format!(
                "<div style=\"display:flex;justify-content:space-between;align-items:baseline;\
                 gap:{ROW_GAP_PX}px;margin:0 0 {}rem 0;\">\
                 <span style=\"flex:1;min-width:0;{}\">{}</span>\
                 <span style=\"white-space:nowrap;{}\">{}</span></div>",
                left.margin_bottom_rem,
                text_style(left, design),
                text(&left.display_text()),
                text_style(right, design),
                text(&right.display_text())
            ));
        }

        Element::Flow(flow) => render_flow(flow, design, out),

        Element::SkillMeter {
            entries,
            margin_bottom_rem,
        } => {
            if entries.is_empty() {
                return;
            }
            out.push_str(&format!(
                "<div style=\"margin:0 0 {margin_bottom_rem}rem 0;\">"
            ));
            for (name, level) in entries {
                out.push_str(&format!(
                    "<div style=\"display:flex;justify-content:space-between;align-items:center;\
                     font-size:{}px;line-height:{};\"><span>{}</span><span>",
                    design.body_px(),
                    design.line_height,
                    text(name)
                ));
                for dot in 1..=5u8 {
                    let fill = if dot <= *level {
                        attr(&design.theme_color)
                    } else {
                        "#e5e7eb".to_string()
                    };
                    out.push_str(&format!(
                        "<span style=\"display:inline-block;width:{METER_DOT_PX}px;\
                         height:{METER_DOT_PX}px;border-radius:50%;margin-left:4px;\
                         background:{fill};\"></span>"
                    ));
                }
                out.push_str("</span></div>");
            }
            out.push_str("</div>");
        }

        Element::Rule {
            thickness_px,
            tone,
            margin_bottom_rem,
        } => {
            out.push_str(&format!(
                "<hr style=\"border:0;border-top:{thickness_px}px solid {};height:0;\
                 margin:0 0 {margin_bottom_rem}rem 0;\">",
                attr(tone.color(design))
            ));
        }

        Element::Photo {
            photo,
            margin_bottom_rem,
        } => {
            out.push_str(&format!(
                "<div style=\"display:flex;justify-content:center;height:{}px;\
                 margin:0 0 {margin_bottom_rem}rem 0;\">",
                photo.height_px
            ));
            render_photo(photo, out);
            out.push_str("</div>");
        }

        Element::WithPhoto {
            photo,
            body,
            margin_bottom_rem,
        } => {
            out.push_str(&format!(
                "<div style=\"display:flex;align-items:flex-start;gap:{PHOTO_GAP_PX}px;\
                 margin:0 0 {margin_bottom_rem}rem 0;\">"
            ));
            render_photo(photo, out);
            out.push_str("<div style=\"flex:1;min-width:0;\">");
            for child in body {
                render_element(child, design, out);
            }
            out.push_str("</div></div>");
        }
    }
}

fn render_flow(flow: &FlowRun, design: &ResolvedDesign, out: &mut String) {
    let items: Vec<&str> = flow
        .items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        return;
    }
    let justify = flex_justify(flow.align.unwrap_or(design.alignment));
    out.push_str(&format!(
        "<div style=\"display:flex;flex-wrap:wrap;gap:{FLOW_GAP_PX}px;justify-content:{justify};\
         margin:0 0 {}rem 0;\">",
        flow.margin_bottom_rem
    ));
    let pill = if flow.pill {
        format!(
            "padding:{PILL_PAD_Y_PX}px {PILL_PAD_X_PX}px;border-radius:9999px;background:#f3f4f6;"
        )
    } else {
        String::new()
    };
    for item in items {
        out.push_str(&format!(
            "<span style=\"white-space:nowrap;font-size:{}px;line-height:{};color:{};{pill}\">{}</span>",
            flow.role.font_px(design),
            design.line_height,
            attr(flow.tone.color(design)),
            text(item)
        ));
    }
    out.push_str("</div>");
}

fn render_photo(photo: &PhotoSlot, out: &mut String) {
    out.push_str(&format!(
        "<img src=\"{}\" alt=\"\" style=\"width:{}px;height:{}px;object-fit:cover;flex-shrink:0;\
         border-radius:{};\">",
        attr(&photo.url),
        photo.width_px,
        photo.height_px,
        if photo.round { "50%" } else { "4px" }
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::blocks::{TextRole, Tone};

    fn make_block(id: &str, text: &str) -> MeasuredBlock {
        MeasuredBlock {
            id: id.to_string(),
            height_px: 100.0,
            elements: vec![Element::Text(TextRun::new(text, TextRole::Body))],
        }
    }

    #[test]
    fn test_each_page_has_numbered_footer() {
        let pages = vec![vec![make_block("header", "Ada")], vec![make_block("exp-1", "Work")]];
        let rendered = render(&pages, &PageDimensions::A4, &ResolvedDesign::default());
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].number, 1);
        assert!(rendered[0].html.contains("Page 1</div>"));
        assert!(rendered[1].html.contains("Page 2</div>"));
        assert!(rendered[1].html.contains("bottom:10mm"));
        assert!(rendered[1].html.contains("right:20mm"));
    }

    #[test]
    fn test_page_canvas_has_exact_dimensions() {
        let pages = vec![vec![make_block("header", "Ada")]];
        let rendered = render(&pages, &PageDimensions::A4, &ResolvedDesign::default());
        let html = &rendered[0].html;
        assert!(html.contains("width:210mm"));
        assert!(html.contains("height:297mm"));
        assert!(html.contains("padding:20mm"));
        assert_eq!(rendered[0].width_mm, 210.0);
        assert_eq!(rendered[0].height_mm, 297.0);
    }

    #[test]
    fn test_blocks_rendered_in_assigned_order() {
        let pages = vec![vec![
            make_block("header", "first"),
            make_block("summary", "second"),
            make_block("footer", "third"),
        ]];
        let rendered = render(&pages, &PageDimensions::A4, &ResolvedDesign::default());
        let html = &rendered[0].html;
        let a = html.find("first").unwrap();
        let b = html.find("second").unwrap();
        let c = html.find("third").unwrap();
        assert!(a < b && b < c);
        assert_eq!(rendered[0].block_ids, vec!["header", "summary", "footer"]);
        assert_eq!(rendered[0].content_height_px, 300.0);
    }

    #[test]
    fn test_user_text_is_escaped() {
        let pages = vec![vec![make_block("summary", "<script>alert(1)</script> {number}")]];
        let rendered = render(&pages, &PageDimensions::A4, &ResolvedDesign::default());
        assert!(!rendered[0].html.contains("<script>"));
        assert!(rendered[0].html.contains("&lt;script&gt;"));
        assert!(rendered[0].html.contains("{number}"));
    }

    #[test]
    fn test_theme_color_cannot_break_out_of_style() {
        let mut design = ResolvedDesign::default();
        design.theme_color = "red\"><script>".to_string();
        let block = MeasuredBlock {
            id: "header".to_string(),
            height_px: 10.0,
            elements: vec![Element::Text(
                TextRun::new("Ada", TextRole::Name).tone(Tone::Theme),
            )],
        };
        let rendered = render(&[vec![block]], &PageDimensions::A4, &design);
        assert!(!rendered[0].html.contains("<script>"));
    }

    #[test]
    fn test_preview_zoom_only_wraps_pages() {
        let pages = render(
            &[vec![make_block("header", "Ada")]],
            &PageDimensions::A4,
            &ResolvedDesign::default(),
        );
        let doc = render_preview_document(&pages, 1.5);
        assert!(doc.contains("transform:scale(1.5)"));
        assert!(doc.contains(&pages[0].html));
    }

    #[test]
    fn test_zoom_is_clamped() {
        assert_eq!(clamp_zoom(5.0), MAX_ZOOM);
        assert_eq!(clamp_zoom(0.0), MIN_ZOOM);
        assert_eq!(clamp_zoom(f32::NAN), DEFAULT_ZOOM);
    }
}
