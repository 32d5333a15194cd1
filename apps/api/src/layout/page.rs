//! Page geometry. Everything is specified in millimetres and converted to
//! CSS pixels with a single fixed factor so measurement and rendering agree.

use serde::{Deserialize, Serialize};

/// CSS pixels per millimetre used for on-screen measurement.
pub const PX_PER_MM: f32 = 3.78;

/// CSS pixels per rem.
pub const REM_PX: f32 = 16.0;

/// Distance of the page-number footer from the bottom edge.
pub const FOOTER_OFFSET_MM: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDimensions {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl PageDimensions {
    /// 210mm × 297mm with a 20mm margin on every side.
    pub const A4: PageDimensions = PageDimensions {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 20.0,
    };

    pub fn printable_width_mm(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    pub fn printable_height_mm(&self) -> f32 {
        self.height_mm - 2.0 * self.margin_mm
    }

    /// Width blocks are measured and laid out at.
    pub fn content_width_px(&self) -> f32 {
        self.printable_width_mm() * PX_PER_MM
    }

    /// Height budget the paginator fills.
    pub fn printable_height_px(&self) -> f32 {
        self.printable_height_mm() * PX_PER_MM
    }
}

impl Default for PageDimensions {
    fn default() -> Self {
        PageDimensions::A4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_printable_box() {
        let a4 = PageDimensions::A4;
        assert_eq!(a4.printable_width_mm(), 170.0);
        assert_eq!(a4.printable_height_mm(), 257.0);
        assert!((a4.content_width_px() - 642.6).abs() < 1e-2);
        assert!((a4.printable_height_px() - 971.46).abs() < 1e-2);
    }
}
