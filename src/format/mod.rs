//! Label text for an elapsed value.
//!
//! - `Decimal`: `7.250 s`, with a fixed list of unit suffixes
//! - `Digital`: clock style `00:01:05.000`, optionally a user pattern (see [`pattern`])
//! - `CustomSuffix`: decimal number followed by whatever suffix the user typed
//!
//! Invalid input never fails a call: the label becomes a readable diagnostic.

pub mod pattern;

use crate::models::FormatState;
use crate::time::TimeModel;
use chrono::TimeDelta;
use log::warn;
use pattern::DurationPattern;
use serde::{Deserialize, Serialize};

/// Most decimal places a label is printed with.
pub const MAX_DECIMAL_PLACES: u32 = 9;

/// Shown in place of a digital label when the unit cannot be converted.
pub const DIGITAL_UNIT_ERROR: &str =
    "For a digital 00:00:00.000 time you must use min, s or ms only as the time units.";

const DECIMAL_UNITS: [&str; 12] = [
    "y", "w", "d", "h", "min", "s", "ms", "us", "ns", "ps", "fs", "as",
];
const DIGITAL_UNITS: [&str; 3] = ["min", "s", "ms"];
const CUSTOM_SUFFIX_UNITS: [&str; 1] = ["Custom Suffix"];

/// Which configuration inputs a format reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub custom_suffix: bool,
    pub custom_pattern: bool,
    pub decimal_places: bool,
}

/// The available label formats. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormatKind {
    #[default]
    Decimal,
    Digital,
    CustomSuffix,
}

impl FormatKind {
    pub const ALL: [FormatKind; 3] = [
        FormatKind::Decimal,
        FormatKind::Digital,
        FormatKind::CustomSuffix,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormatKind::Decimal => "Decimal",
            FormatKind::Digital => "Digital",
            FormatKind::CustomSuffix => "Custom Format",
        }
    }

    /// Units offered for selection, in display order. Never empty.
    pub fn allowed_units(self) -> &'static [&'static str] {
        match self {
            FormatKind::Decimal => &DECIMAL_UNITS,
            FormatKind::Digital => &DIGITAL_UNITS,
            FormatKind::CustomSuffix => &CUSTOM_SUFFIX_UNITS,
        }
    }

    pub fn capabilities(self) -> Capabilities {
        match self {
            FormatKind::Decimal => Capabilities {
                custom_suffix: false,
                custom_pattern: false,
                decimal_places: true,
            },
            FormatKind::Digital => Capabilities {
                custom_suffix: false,
                custom_pattern: true,
                decimal_places: false,
            },
            FormatKind::CustomSuffix => Capabilities {
                custom_suffix: true,
                custom_pattern: false,
                decimal_places: true,
            },
        }
    }

    pub fn supports_custom_suffix(self) -> bool {
        self.capabilities().custom_suffix
    }

    pub fn supports_custom_pattern(self) -> bool {
        self.capabilities().custom_pattern
    }

    pub fn supports_decimal_places(self) -> bool {
        self.capabilities().decimal_places
    }

    /// Unit to select after switching to this kind. Keeps `current` when it is
    /// still allowed, otherwise falls back to `s` or the first allowed unit.
    pub fn reselect_unit(self, current: &str) -> &'static str {
        let units = self.allowed_units();
        units
            .iter()
            .find(|u| **u == current)
            .or_else(|| units.iter().find(|u| **u == "s"))
            .copied()
            .unwrap_or(units[0])
    }

    /// Render `elapsed` under this format.
    pub fn format(self, elapsed: f64, time: &TimeModel, state: &FormatState) -> String {
        match self {
            FormatKind::Decimal => decimal_label(elapsed, time, &state.unit, state.decimal_places),
            FormatKind::CustomSuffix => {
                decimal_label(elapsed, time, &state.custom_suffix, state.decimal_places)
            }
            FormatKind::Digital => digital_label(elapsed, state),
        }
    }
}

/// Units offered by `kind`.
pub fn available_units_for(kind: FormatKind) -> &'static [&'static str] {
    kind.allowed_units()
}

pub fn capabilities_of(kind: FormatKind) -> Capabilities {
    kind.capabilities()
}

/// A format bound to a sequence and the user's format state.
#[derive(Debug, Clone, Copy)]
pub struct LabelFormatter<'a> {
    pub kind: FormatKind,
    pub time: TimeModel,
    pub state: &'a FormatState,
}

impl<'a> LabelFormatter<'a> {
    pub fn new(kind: FormatKind, time: TimeModel, state: &'a FormatState) -> Self {
        Self { kind, time, state }
    }

    pub fn format(&self, elapsed: f64) -> String {
        self.kind.format(elapsed, &self.time, self.state)
    }

    pub fn label_for_frame(&self, frame: i64) -> String {
        self.format(self.time.elapsed_at(frame))
    }

    /// Label of the last visible frame, used to reserve width for the whole run.
    /// Assumes the last value renders widest; non-monotonic formats can break that.
    pub fn last_label(&self) -> String {
        self.format(self.time.last_elapsed())
    }
}

fn decimal_label(elapsed: f64, time: &TimeModel, suffix: &str, places: u32) -> String {
    if time.is_static() {
        return suffix.to_string();
    }
    let number = if places == 0 {
        // truncation toward zero, not rounding
        format!("{}", elapsed.trunc() as i64)
    } else {
        round_half_up(elapsed, places)
    };
    format!("{number} {suffix}")
}

/// Fixed-point text with ties rounded away from zero (`3.25` -> `3.3`).
/// Precision is capped at [`MAX_DECIMAL_PLACES`].
fn round_half_up(value: f64, places: u32) -> String {
    let places = places.min(MAX_DECIMAL_PLACES);
    let factor = 10f64.powi(places as i32);
    let scaled = (value * factor).round();
    let value = if scaled.is_finite() { scaled / factor } else { value };
    format!("{:.*}", places as usize, value)
}

fn digital_label(elapsed: f64, state: &FormatState) -> String {
    let factor = match state.unit.as_str() {
        "min" => 60_000.0,
        "s" => 1_000.0,
        "ms" => 1.0,
        other => {
            warn!("digital label: unsupported unit {other:?}");
            return DIGITAL_UNIT_ERROR.to_string();
        }
    };

    let pattern = if state.custom_pattern.is_empty() {
        DurationPattern::default()
    } else {
        match DurationPattern::parse(&state.custom_pattern) {
            Ok(p) => p,
            Err(e) => {
                warn!("digital label: bad pattern {:?}: {e}", state.custom_pattern);
                return format!("Invalid pattern: {e}");
            }
        }
    };

    let millis = (elapsed * factor).round();
    let duration = if millis.is_finite() && millis.abs() < i64::MAX as f64 {
        TimeDelta::try_milliseconds(millis as i64)
    } else {
        None
    };
    match duration {
        Some(d) => pattern.render(d),
        None => {
            warn!("digital label: {elapsed} {} is out of range", state.unit);
            format!("Time out of range: {elapsed} {}", state.unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_up_rounding() {
        assert_eq!(round_half_up(3.25, 1), "3.3");
        assert_eq!(round_half_up(-3.25, 1), "-3.3");
        assert_eq!(round_half_up(2.0, 3), "2.000");
        assert_eq!(round_half_up(1.5, 20).len(), "1.".len() + 20);
    }

    #[test]
    fn reselect_keeps_valid_unit() {
        assert_eq!(FormatKind::Digital.reselect_unit("min"), "min");
        assert_eq!(FormatKind::Digital.reselect_unit("h"), "s");
        assert_eq!(FormatKind::CustomSuffix.reselect_unit("s"), "Custom Suffix");
    }
}
