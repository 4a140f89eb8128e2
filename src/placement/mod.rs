//! Where a label goes on the image.
//!
//! The reserved width always comes from the worst-case (last frame) text so the
//! label box does not change size from frame to frame. Positions are clamped so
//! the box stays inside the image; when even that is impossible the result is
//! flagged as clipped and a warning is logged, never an error.

pub mod text;

use crate::models::{ImageSize, LocationPreset, PlacementConfig, Rect};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
pub use text::{HeuristicMeasure, TextMeasure, estimate_text_width_px};

/// Result of placing a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub label: Rect,
    /// Same as `label` when the background box is enabled.
    pub background: Option<Rect>,
    /// True when the label is larger than the image and could not fit.
    pub clipped: bool,
}

impl Placement {
    /// Left end of the text baseline: the bottom-left corner of the box.
    pub fn origin(&self) -> (i32, i32) {
        (self.label.x, self.label.bottom())
    }
}

/// Compute the label rectangle for `worst_text`.
///
/// With no custom region of interest the box is anchored at the configured
/// `(x, y)` and is one font size tall; a custom region is used as the box.
pub fn compute_bounds<M: TextMeasure>(
    image: ImageSize,
    roi: Option<Rect>,
    config: &PlacementConfig,
    worst_text: &str,
    measure: &M,
) -> Placement {
    let size = config.font.height();
    let anchor = match roi.filter(|r| image.is_custom_roi(r)) {
        Some(r) => r,
        None => Rect::new(config.x, config.y, image.width, size),
    };

    // Clamp in i64: typed coordinates may sit at the ends of the i32 range.
    let (img_w, img_h, size_px) = (
        i64::from(image.width),
        i64::from(image.height),
        i64::from(size),
    );
    let mut x = i64::from(anchor.x);
    let mut y = i64::from(anchor.y);

    // off the top
    if y + i64::from(anchor.height) < size_px {
        y = 1;
    }
    // off the bottom
    if img_h < y + size_px {
        y = img_h - size_px;
    }

    let width = measure.string_width(worst_text, &config.font);
    if i64::from(width) > img_w - x {
        x = img_w - i64::from(width);
    }

    let clipped = width > image.width || size > image.height;
    let rect = Rect::new(to_coord(x.max(0)), to_coord(y.max(0)), width, anchor.height);
    if clipped {
        warn!(
            "label {worst_text:?} ({}x{size} px) does not fit a {}x{} image",
            rect.width, image.width, image.height
        );
    }
    debug!("label placed at {rect:?}");

    Placement {
        label: rect,
        background: config.background.then_some(rect),
        clipped,
    }
}

fn to_coord(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// Unclamped anchor of a corner preset; `None` for [`LocationPreset::Custom`].
pub fn preset_anchor(preset: LocationPreset, image: ImageSize) -> Option<(i32, i32)> {
    match preset {
        LocationPreset::UpperLeft => Some((0, 0)),
        LocationPreset::UpperRight => Some((image.width, 0)),
        LocationPreset::LowerLeft => Some((0, image.height)),
        LocationPreset::LowerRight => Some((image.width, image.height)),
        LocationPreset::Custom => None,
    }
}

/// Select `preset` and move `(x, y)` to its clamped position.
///
/// `Custom` keeps the current coordinates.
pub fn apply_preset<M: TextMeasure>(
    config: &mut PlacementConfig,
    preset: LocationPreset,
    image: ImageSize,
    worst_text: &str,
    measure: &M,
) {
    config.preset = preset;
    let Some((x, y)) = preset_anchor(preset, image) else {
        return;
    };
    let probe = PlacementConfig {
        x,
        y,
        ..config.clone()
    };
    let placed = compute_bounds(image, None, &probe, worst_text, measure);
    config.x = placed.label.x;
    config.y = placed.label.y;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_right_hugs_the_corner() {
        let image = ImageSize::new(200, 100);
        let mut cfg = PlacementConfig::default();
        apply_preset(&mut cfg, LocationPreset::LowerRight, image, "10 s", &HeuristicMeasure);
        let width = estimate_text_width_px("10 s", 12) as i32;
        assert_eq!((cfg.x, cfg.y), (200 - width, 100 - 12));
        assert_eq!(cfg.preset, LocationPreset::LowerRight);
    }
}
