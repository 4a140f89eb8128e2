use crate::error::SessionError;
use crate::format::FormatKind;
use serde::{Deserialize, Serialize};

/// Font size used when no custom region of interest drives it.
pub const DEFAULT_FONT_SIZE: u32 = 12;
/// Bounds applied to a font size derived from a region of interest.
pub const MIN_ROI_FONT_SIZE: u32 = 7;
pub const MAX_ROI_FONT_SIZE: u32 = 80;

/// Start offset, interval and the visible frame range of a stack.
///
/// Frames are 1-based. `frame_step` is the `n` in "label every n-th frame";
/// anything below 1 behaves as 1 (see [`SequenceConfig::step`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub start: f64,
    pub interval: f64,
    pub first_frame: i64,
    pub last_frame: i64,
    pub frame_step: i64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            start: 1.0,
            interval: 1.0,
            first_frame: 1,
            last_frame: 1,
            frame_step: 1,
        }
    }
}

impl SequenceConfig {
    /// Defaults for a stack of `stack_size` images: every frame visible.
    pub fn for_stack(stack_size: i64) -> Self {
        Self {
            last_frame: stack_size.max(1),
            ..Self::default()
        }
    }

    /// Effective every-n-th step, never below 1.
    pub fn step(&self) -> i64 {
        self.frame_step.max(1)
    }

    /// Check the range invariant `1 <= first_frame <= last_frame`.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.first_frame < 1 || self.first_frame > self.last_frame {
            return Err(SessionError::InvalidRange {
                first: self.first_frame,
                last: self.last_frame,
            });
        }
        Ok(())
    }

    /// True when `frame` falls in the visible range and on the every-n-th mask.
    pub fn is_labeled(&self, frame: i64) -> bool {
        frame >= self.first_frame && frame <= self.last_frame && frame % self.step() == 0
    }
}

/// Per-format user input: chosen unit, custom suffix, decimals and digital pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatState {
    /// One of the active kind's allowed units.
    pub unit: String,
    /// Suffix typed by the user; only the custom-suffix kind reads it.
    pub custom_suffix: String,
    pub decimal_places: u32,
    /// Digital pattern such as `mm:ss`; empty means `HH:mm:ss.SSS`.
    pub custom_pattern: String,
}

impl Default for FormatState {
    fn default() -> Self {
        Self {
            unit: "s".into(),
            custom_suffix: String::new(),
            decimal_places: 3,
            custom_pattern: String::new(),
        }
    }
}

/// Screen corner presets for the label anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationPreset {
    UpperRight,
    LowerRight,
    LowerLeft,
    UpperLeft,
    /// Coordinates typed by the user (or taken from a region of interest).
    Custom,
}

impl LocationPreset {
    pub fn name(self) -> &'static str {
        match self {
            LocationPreset::UpperRight => "Upper Right",
            LocationPreset::LowerRight => "Lower Right",
            LocationPreset::LowerLeft => "Lower Left",
            LocationPreset::UpperLeft => "Upper Left",
            LocationPreset::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

/// The font the host draws with. Only the size takes part in placement;
/// the rest is carried through for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub family: String,
    pub size_px: u32,
    pub style: FontStyle,
    pub antialiased: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "SansSerif".into(),
            size_px: DEFAULT_FONT_SIZE,
            style: FontStyle::Plain,
            antialiased: true,
        }
    }
}

impl FontSpec {
    /// Pixel size as a signed coordinate.
    pub fn height(&self) -> i32 {
        i32::try_from(self.size_px).unwrap_or(i32::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub x: i32,
    pub y: i32,
    pub preset: LocationPreset,
    pub background: bool,
    pub font: FontSpec,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            x: 2,
            y: 15,
            preset: LocationPreset::UpperLeft,
            background: false,
            font: FontSpec::default(),
        }
    }
}

impl PlacementConfig {
    /// Initial placement for an image, honouring a custom region of interest:
    /// the anchor moves to the region's corner and the font follows its height.
    pub fn for_image(image: ImageSize, roi: Option<Rect>) -> Self {
        let mut cfg = Self::default();
        if let Some(r) = roi.filter(|r| image.is_custom_roi(r)) {
            cfg.x = r.x;
            cfg.y = r.y;
            cfg.preset = LocationPreset::Custom;
        }
        cfg.font.size_px = default_font_size(image, roi);
        cfg
    }

    /// Manual x edit; any change leaves preset mode.
    pub fn set_x(&mut self, x: i32) {
        if x != self.x {
            self.x = x;
            self.preset = LocationPreset::Custom;
        }
    }

    /// Manual y edit; any change leaves preset mode.
    pub fn set_y(&mut self, y: i32) {
        if y != self.y {
            self.y = y;
            self.preset = LocationPreset::Custom;
        }
    }
}

/// Font size heuristic: region height clamped to [7, 80] for a custom
/// region of interest, the default size otherwise.
pub fn default_font_size(image: ImageSize, roi: Option<Rect>) -> u32 {
    match roi.filter(|r| image.is_custom_roi(r)) {
        Some(r) => (r.height.max(0) as u32).clamp(MIN_ROI_FONT_SIZE, MAX_ROI_FONT_SIZE),
        None => DEFAULT_FONT_SIZE,
    }
}

/// Axis-aligned pixel rectangle; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: i32,
    pub height: i32,
}

impl ImageSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn full_rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// A region counts as custom unless it spans the whole image.
    pub fn is_custom_roi(&self, roi: &Rect) -> bool {
        roi.width != self.width || roi.height != self.height
    }
}

/// Everything the host needs to draw one frame's label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameLabel {
    pub frame: i64,
    pub text: String,
    /// Left end of the text baseline.
    pub origin: (i32, i32),
    pub bounds: Rect,
    pub background: Option<Rect>,
}

/// Complete label configuration as stored in a settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    pub sequence: SequenceConfig,
    pub kind: FormatKind,
    pub format: FormatState,
    pub placement: PlacementConfig,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            sequence: SequenceConfig::default(),
            kind: FormatKind::Decimal,
            format: FormatState::default(),
            placement: PlacementConfig::default(),
        }
    }
}

impl LabelSettings {
    /// Defaults for a given stack and image, following any custom region of interest.
    pub fn for_stack(stack_size: i64, image: ImageSize, roi: Option<Rect>) -> Self {
        Self {
            sequence: SequenceConfig::for_stack(stack_size),
            placement: PlacementConfig::for_image(image, roi),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_below_one_is_one() {
        let cfg = SequenceConfig {
            frame_step: 0,
            ..SequenceConfig::for_stack(5)
        };
        assert_eq!(cfg.step(), 1);
        assert!((1..=5).all(|f| cfg.is_labeled(f)));
    }

    #[test]
    fn roi_drives_font_size_and_anchor() {
        let image = ImageSize::new(200, 100);
        let small = Some(Rect::new(10, 20, 50, 4));
        let big = Some(Rect::new(10, 20, 50, 95));
        assert_eq!(default_font_size(image, small), 7);
        assert_eq!(default_font_size(image, big), 80);
        assert_eq!(default_font_size(image, Some(image.full_rect())), 12);
        assert_eq!(default_font_size(image, None), 12);

        let cfg = PlacementConfig::for_image(image, Some(Rect::new(10, 20, 50, 30)));
        assert_eq!((cfg.x, cfg.y, cfg.preset), (10, 20, LocationPreset::Custom));
        assert_eq!(cfg.font.size_px, 30);
    }

    #[test]
    fn editing_coordinates_forces_custom() {
        let mut cfg = PlacementConfig::default();
        cfg.set_x(cfg.x);
        assert_eq!(cfg.preset, LocationPreset::UpperLeft);
        cfg.set_y(40);
        assert_eq!(cfg.preset, LocationPreset::Custom);
    }
}
