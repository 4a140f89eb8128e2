//! Text measurement used to reserve label width.

use crate::models::FontSpec;

/// Pixel width of a string in a given font. Supplied by the host when it
/// has a real rasteriser; [`HeuristicMeasure`] otherwise.
pub trait TextMeasure {
    fn string_width(&self, text: &str, font: &FontSpec) -> i32;
}

/// Heuristic: every character is 0.6 of the font size wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMeasure;

impl TextMeasure for HeuristicMeasure {
    fn string_width(&self, text: &str, font: &FontSpec) -> i32 {
        let px = estimate_text_width_px(text, font.size_px);
        i32::try_from(px).unwrap_or(i32::MAX)
    }
}

/// Estimate the pixel width of `text` at `font_px`, rounded up.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    let units = text.chars().count() as u64 * u64::from(font_px) * 3;
    u32::try_from(units.div_ceil(5)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_grows_with_length_and_size() {
        assert_eq!(estimate_text_width_px("", 12), 0);
        assert_eq!(estimate_text_width_px("10 s", 10), 24);
        assert_eq!(estimate_text_width_px("5 s", 12), 22);
        assert!(estimate_text_width_px("100 s", 12) > estimate_text_width_px("10 s", 12));
        assert!(estimate_text_width_px("10 s", 20) > estimate_text_width_px("10 s", 12));
    }
}
