//! Raw text of the configuration fields and its conversion to settings.
//!
//! Numeric fields stay strings here so a half-typed value can be reported with
//! the field it came from instead of silently keeping an old number.

use crate::error::{Field, ParseError};
use crate::format::FormatKind;
use crate::models::{LabelSettings, LocationPreset};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    pub kind: FormatKind,
    pub unit: String,
    pub custom_suffix: String,
    pub custom_pattern: String,
    pub decimal_places: String,
    pub start: String,
    pub interval: String,
    pub first_frame: String,
    pub last_frame: String,
    pub frame_step: String,
    pub x: String,
    pub y: String,
    pub preset: LocationPreset,
    pub background: bool,
}

impl SettingsForm {
    /// Form showing the given settings.
    pub fn from_settings(s: &LabelSettings) -> Self {
        Self {
            kind: s.kind,
            unit: s.format.unit.clone(),
            custom_suffix: s.format.custom_suffix.clone(),
            custom_pattern: s.format.custom_pattern.clone(),
            decimal_places: s.format.decimal_places.to_string(),
            start: s.sequence.start.to_string(),
            interval: s.sequence.interval.to_string(),
            first_frame: s.sequence.first_frame.to_string(),
            last_frame: s.sequence.last_frame.to_string(),
            frame_step: s.sequence.frame_step.to_string(),
            x: s.placement.x.to_string(),
            y: s.placement.y.to_string(),
            preset: s.placement.preset,
            background: s.placement.background,
        }
    }

    /// Apply the form on top of `base`.
    ///
    /// A new preset is recorded but its coordinates are left for the caller to
    /// resolve against the image; otherwise a changed x or y switches the
    /// preset to `Custom`. Switching the format kind reselects the unit.
    pub fn parse(&self, base: &LabelSettings) -> Result<LabelSettings, ParseError> {
        let start = parse_finite(Field::Start, &self.start)?;
        let interval = parse_finite(Field::Interval, &self.interval)?;
        let decimal_places: u32 = parse_field(Field::DecimalPlaces, &self.decimal_places)?;
        let first_frame: i64 = parse_field(Field::FirstFrame, &self.first_frame)?;
        let last_frame: i64 = parse_field(Field::LastFrame, &self.last_frame)?;
        let frame_step: i64 = parse_field(Field::FrameStep, &self.frame_step)?;
        let x: i32 = parse_field(Field::X, &self.x)?;
        let y: i32 = parse_field(Field::Y, &self.y)?;

        let mut out = base.clone();
        out.sequence.start = start;
        out.sequence.interval = interval;
        out.sequence.first_frame = first_frame;
        out.sequence.last_frame = last_frame;
        out.sequence.frame_step = frame_step;

        out.kind = self.kind;
        out.format.unit = if self.kind != base.kind {
            self.kind.reselect_unit(&self.unit).to_string()
        } else {
            self.unit.clone()
        };
        out.format.custom_suffix = self.custom_suffix.clone();
        out.format.custom_pattern = self.custom_pattern.clone();
        out.format.decimal_places = decimal_places;

        out.placement.background = self.background;
        if self.preset != base.placement.preset {
            out.placement.preset = self.preset;
        } else {
            out.placement.set_x(x);
            out.placement.set_y(y);
        }
        Ok(out)
    }
}

fn parse_field<T: FromStr>(field: Field, text: &str) -> Result<T, ParseError> {
    text.trim().parse::<T>().map_err(|_| ParseError {
        field,
        value: text.to_string(),
    })
}

fn parse_finite(field: Field, text: &str) -> Result<f64, ParseError> {
    let v: f64 = parse_field(field, text)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParseError {
            field,
            value: text.to_string(),
        })
    }
}
