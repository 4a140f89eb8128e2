//! Typed errors for the labeling core.
//!
//! Formatting problems (a bad unit for the digital clock, a malformed custom
//! pattern) are not surfaced through these types to callers of the formatter:
//! they are rendered into the label text instead, so a long batch keeps going.
//! `PatternError` still exists as a value so the text can name the offending token.

use thiserror::Error;

/// Failure while tokenizing a digital custom pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unknown field '{token}' at position {position}")]
    UnknownField { token: char, position: usize },

    #[error("field '{token}' at position {position} is {width} wide, at most {max} allowed")]
    FieldTooWide {
        token: String,
        position: usize,
        width: usize,
        max: usize,
    },

    #[error("unterminated quote starting at position {position}")]
    UnterminatedQuote { position: usize },
}

/// Form fields that hold numbers typed by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Start,
    Interval,
    DecimalPlaces,
    FirstFrame,
    LastFrame,
    FrameStep,
    X,
    Y,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Start => "start",
            Field::Interval => "interval",
            Field::DecimalPlaces => "decimal places",
            Field::FirstFrame => "first frame",
            Field::LastFrame => "last frame",
            Field::FrameStep => "every n-th",
            Field::X => "x",
            Field::Y => "y",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A numeric field whose text does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: cannot parse {value:?} as a number")]
pub struct ParseError {
    pub field: Field,
    pub value: String,
}

/// Errors raised by the sequence controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    #[error("run blocked by unparsable field: {0}")]
    Blocked(#[from] ParseError),

    #[error("invalid frame range {first}..={last}")]
    InvalidRange { first: i64, last: i64 },
}
