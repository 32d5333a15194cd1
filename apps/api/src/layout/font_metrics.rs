//! Static font-metric tables for the four editor font families.
//!
//! Character widths are in em units (relative to font size), taken from the
//! standard core-font AFM metrics of the face each CSS stack resolves to first.
//! This is an approximation of what a browser computes with real glyph shaping,
//! but it is stable, deterministic and wraps text the same way the page renderer
//! asks the browser to (`white-space: pre-wrap`, break at spaces).
//!
//! All proportional tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32. Other characters use `average_char_width`.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

/// The font family selector offered by the design panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// System UI sans-serif. Measured with Helvetica metrics.
    #[default]
    Sans,
    /// Georgia. Measured as Times widened to Georgia's proportions.
    Serif,
    /// Courier New. Fixed pitch.
    Mono,
    /// Times New Roman.
    Times,
}

impl FontFamily {
    /// CSS `font-family` value the page renderer emits for this selector.
    pub fn css_stack(self) -> &'static str {
        match self {
            FontFamily::Sans => "ui-sans-serif, system-ui, sans-serif",
            FontFamily::Serif => "Georgia, serif",
            FontFamily::Mono => "\"Courier New\", monospace",
            FontFamily::Times => "\"Times New Roman\", Times, serif",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Character-width table for a font family.
///
/// `widths[i]` = width of ASCII character `(i + 32)` at 1em, multiplied by
/// `width_scale`. A `None` table means fixed pitch at `average_char_width`.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: Option<&'static [f32; 95]>,
    width_scale: f32,
    /// Fallback width for characters outside the table.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        match self.widths {
            Some(table) if (32..=126).contains(&code) => table[code - 32] * self.width_scale,
            _ => self.average_char_width,
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Measures the rendered width of a string in pixels at `font_px`.
    pub fn measure_px(&self, s: &str, font_px: f32) -> f32 {
        self.measure_str(s) * font_px
    }

    /// Counts printed lines for `text` greedily word-wrapped at `max_width_px`.
    ///
    /// Hard newlines start a new line (`pre-wrap`); a blank paragraph still
    /// occupies a line, but trailing newlines add nothing. A single word wider than the line is never broken and
    /// takes a line of its own. Empty or whitespace-only text occupies 0 lines.
    pub fn wrap_line_count(&self, text: &str, font_px: f32, max_width_px: f32) -> usize {
        if text.trim().is_empty() {
            return 0;
        }
        let space_px = self.space_width * font_px;

        text.trim_end_matches(['\n', '\r'])
            .split('\n')
            .map(|paragraph| {
                let mut lines = 1usize;
                let mut current = 0.0_f32;
                let mut first = true;

                for word in paragraph.split_whitespace() {
                    let word_px = self.measure_px(word, font_px);
                    let gap = if first { 0.0 } else { space_px };

                    if !first && current + gap + word_px > max_width_px {
                        lines += 1;
                        current = word_px;
                    } else {
                        current += gap + word_px;
                        first = false;
                    }
                }
                lines
            })
            .sum()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
static HELVETICA_WIDTHS: [f32; 95] = [
    // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
    // 0      1      2      3      4      5      6      7      8      9
    0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
    // :      ;      <      =      >      ?      @
    0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
    // A      B      C      D      E      F      G      H      I      J      K      L      M
    0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
    // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
    0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
    // [      \      ]      ^      _      `
    0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
    // a      b      c      d      e      f      g      h      i      j      k      l      m
    0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
    // n      o      p      q      r      s      t      u      v      w      x      y      z
    0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
    // {      |      }      ~
    0.334, 0.260, 0.334, 0.584,
];

#[rustfmt::skip]
static TIMES_WIDTHS: [f32; 95] = [
    // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
    // 0      1      2      3      4      5      6      7      8      9
    0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
    // :      ;      <      =      >      ?      @
    0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
    // A      B      C      D      E      F      G      H      I      J      K      L      M
    0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
    // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
    0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
    // [      \      ]      ^      _      `
    0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
    // a      b      c      d      e      f      g      h      i      j      k      l      m
    0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
    // n      o      p      q      r      s      t      u      v      w      x      y      z
    0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
    // {      |      }      ~
    0.480, 0.200, 0.480, 0.541,
];

static SANS_TABLE: FontMetricTable = FontMetricTable {
    widths: Some(&HELVETICA_WIDTHS),
    width_scale: 1.0,
    average_char_width: 0.53,
    space_width: 0.278,
};

/// Georgia sets roughly 12% wider than Times at the same size.
static SERIF_TABLE: FontMetricTable = FontMetricTable {
    widths: Some(&TIMES_WIDTHS),
    width_scale: 1.12,
    average_char_width: 0.54,
    space_width: 0.28,
};

static MONO_TABLE: FontMetricTable = FontMetricTable {
    widths: None,
    width_scale: 1.0,
    average_char_width: 0.60,
    space_width: 0.60,
};

static TIMES_TABLE: FontMetricTable = FontMetricTable {
    widths: Some(&TIMES_WIDTHS),
    width_scale: 1.0,
    average_char_width: 0.48,
    space_width: 0.25,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Sans => &SANS_TABLE,
        FontFamily::Serif => &SERIF_TABLE,
        FontFamily::Mono => &MONO_TABLE,
        FontFamily::Times => &TIMES_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(FontFamily::Sans);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontFamily::Sans);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!(
            (width - 2.056).abs() < 1e-3,
            "Rust width should be ~2.056, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFamily::Times);
        let width = metrics.measure_str("é");
        assert!((width - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_mono_is_fixed_pitch() {
        let metrics = get_metrics(FontFamily::Mono);
        assert!((metrics.measure_str("iiii") - metrics.measure_str("WWWW")).abs() < 1e-6);
        assert!((metrics.measure_px("abc", 10.0) - 18.0).abs() < 1e-4);
    }

    #[test]
    fn test_serif_wider_than_times() {
        let text = "Architected distributed caching layer";
        let serif = get_metrics(FontFamily::Serif).measure_str(text);
        let times = get_metrics(FontFamily::Times).measure_str(text);
        assert!(serif > times);
    }

    #[test]
    fn test_wrap_empty_text_is_zero_lines() {
        let metrics = get_metrics(FontFamily::Sans);
        assert_eq!(metrics.wrap_line_count("", 16.0, 600.0), 0);
        assert_eq!(metrics.wrap_line_count("  \n ", 16.0, 600.0), 0);
    }

    #[test]
    fn test_wrap_single_word_is_one_line() {
        let metrics = get_metrics(FontFamily::Sans);
        assert_eq!(metrics.wrap_line_count("Rust", 16.0, 600.0), 1);
    }

    #[test]
    fn test_wrap_long_text_wraps() {
        let metrics = get_metrics(FontFamily::Sans);
        let text = "word ".repeat(60);
        let lines = metrics.wrap_line_count(&text, 16.0, 300.0);
        assert!(lines > 3, "expected several lines, got {lines}");
    }

    #[test]
    fn test_wrap_counts_hard_newlines() {
        let metrics = get_metrics(FontFamily::Sans);
        assert_eq!(metrics.wrap_line_count("one\ntwo\n\nfour", 16.0, 600.0), 4);
    }

    #[test]
    fn test_wrap_ignores_trailing_newlines() {
        let metrics = get_metrics(FontFamily::Sans);
        assert_eq!(metrics.wrap_line_count("one\ntwo\n", 16.0, 600.0), 2);
        assert_eq!(metrics.wrap_line_count("one\r\n\n", 16.0, 600.0), 1);
    }

    #[test]
    fn test_wrap_oversized_word_takes_own_line() {
        let metrics = get_metrics(FontFamily::Mono);
        // each word is 10 chars * 0.6 * 10px = 60px, line fits 50px
        assert_eq!(metrics.wrap_line_count("aaaaaaaaaa bbbbbbbbbb", 10.0, 50.0), 2);
    }

    #[test]
    fn test_larger_font_never_fewer_lines() {
        let metrics = get_metrics(FontFamily::Serif);
        let text = "Led a team of five engineers building a resilient ingestion pipeline";
        let small = metrics.wrap_line_count(text, 14.0, 400.0);
        let large = metrics.wrap_line_count(text, 20.0, 400.0);
        assert!(large >= small);
    }
}
