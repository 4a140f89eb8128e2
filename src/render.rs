//! SVG overlay for a computed label: the optional background box and the text,
//! on a transparent canvas the size of the image.
//!
//! Text is written as an SVG `<text>` element, so no font file is needed here;
//! the viewer resolves the family.

use crate::models::{FontSpec, FontStyle, FrameLabel, ImageSize};
use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::prelude::*;
use plotters::style::FontStyle as PlotFontStyle;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_svg::SVGBackend;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Rgb8 = Rgb8 {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const BLACK: Rgb8 = Rgb8 { r: 0, g: 0, b: 0 };

    fn to_plotters(self) -> RGBColor {
        RGBColor(self.r, self.g, self.b)
    }
}

/// Foreground (text) and background (box) colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelColors {
    pub foreground: Rgb8,
    pub background: Rgb8,
}

impl Default for LabelColors {
    fn default() -> Self {
        Self {
            foreground: Rgb8::WHITE,
            background: Rgb8::BLACK,
        }
    }
}

/// Map host font names onto the generic families SVG viewers know.
fn svg_family(family: &str) -> &str {
    match family.to_ascii_lowercase().as_str() {
        "sansserif" | "sans-serif" | "dialog" => "sans-serif",
        "serif" => "serif",
        "monospaced" | "monospace" => "monospace",
        _ => family,
    }
}

fn svg_style(style: FontStyle) -> PlotFontStyle {
    match style {
        FontStyle::Plain => PlotFontStyle::Normal,
        FontStyle::Bold => PlotFontStyle::Bold,
        FontStyle::Italic => PlotFontStyle::Italic,
        // plotters has no combined style; bold is the more legible choice
        FontStyle::BoldItalic => PlotFontStyle::Bold,
    }
}

/// Write `label` as an SVG overlay to `path`.
pub fn write_overlay_svg<P: AsRef<Path>>(
    label: &FrameLabel,
    image: ImageSize,
    font: &FontSpec,
    colors: LabelColors,
    path: P,
) -> Result<()> {
    let size = (image.width.max(1) as u32, image.height.max(1) as u32);
    let mut backend = SVGBackend::new(path.as_ref(), size);

    if let Some(bg) = label.background {
        let fill = colors.background.to_plotters().filled();
        backend
            .draw_rect((bg.x, bg.y), (bg.right(), bg.bottom()), &fill, true)
            .map_err(|e| anyhow!("drawing label background: {e}"))?;
    }

    let text_style = (svg_family(&font.family), f64::from(font.size_px))
        .into_font()
        .style(svg_style(font.style))
        .color(&colors.foreground.to_plotters())
        .pos(Pos::new(HPos::Left, VPos::Bottom));
    backend
        .draw_text(&label.text, &text_style, label.origin)
        .map_err(|e| anyhow!("drawing label text: {e}"))?;

    backend
        .present()
        .map_err(|e| anyhow!("writing svg: {e}"))?;
    Ok(())
}
