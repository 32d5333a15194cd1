//! Markup shells for rendered pages.
//!
//! Placeholders are substituted with `.replace`. `{blocks}` / `{pages}` carry
//! user text and are always substituted last.

pub const PAGE_TEMPLATE: &str = "\
<section class=\"cv-page\" data-page=\"{number}\" style=\"position:relative;box-sizing:border-box;\
overflow:hidden;width:{width_mm}mm;height:{height_mm}mm;padding:{margin_mm}mm;\
background:#ffffff;color:#111827;font-family:{font_family};line-height:{line_height};\
text-align:{text_align};\">\n\
{blocks}\
<div class=\"cv-page-number\" style=\"position:absolute;bottom:{footer_offset_mm}mm;\
right:{margin_mm}mm;font-size:0.75rem;line-height:1;color:#6b7280;\">Page {number}</div>\n\
</section>\n";

pub const PREVIEW_TEMPLATE: &str = "\
<div class=\"cv-preview\" style=\"display:flex;flex-direction:column;align-items:center;gap:20px;\
transform:scale({zoom});transform-origin:top center;\">\n\
{pages}\
</div>\n";

pub const PRINT_TEMPLATE: &str = "\
<!DOCTYPE html>\n\
<html>\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<meta name=\"cv-export-scale\" content=\"{scale}\">\n\
<title>{title}</title>\n\
<style>\n\
@page { size: {width_mm}mm {height_mm}mm; margin: 0; }\n\
html, body { margin: 0; padding: 0; background: #ffffff; }\n\
.cv-page { break-after: page; page-break-after: always; }\n\
.cv-page:last-child { break-after: auto; page-break-after: auto; }\n\
</style>\n\
</head>\n\
<body>\n\
{pages}\
</body>\n\
</html>\n";

pub fn escape_text(input: &str, out: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

pub fn escape_attr(input: &str, out: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

pub fn attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    escape_attr(input, &mut out);
    out
}

pub fn text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    escape_text(input, &mut out);
    out
}
