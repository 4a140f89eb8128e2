//! Duration patterns for the digital clock label, e.g. `HH:mm:ss.SSS`.
//!
//! Grammar:
//! - `H` hours, `m` minutes, `s` seconds, `S` milliseconds. A run of the same
//!   letter is one field; the run length is the zero-padded width.
//! - Any other ASCII letter is an error. Letters can be written literally by
//!   quoting them: `'h'`. Two single quotes (`''`) give a literal quote.
//! - Every other character is copied as is.
//!
//! The most significant field in the pattern carries the whole magnitude
//! (`mm:ss` of 2 h reads `120:00`); every other field wraps at its natural
//! range and may be at most its natural width.

use crate::error::PatternError;
use chrono::TimeDelta;

/// Clock fields ordered by significance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClockField {
    Millis,
    Seconds,
    Minutes,
    Hours,
}

impl ClockField {
    fn from_symbol(c: char) -> Option<Self> {
        match c {
            'H' => Some(ClockField::Hours),
            'm' => Some(ClockField::Minutes),
            's' => Some(ClockField::Seconds),
            'S' => Some(ClockField::Millis),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            ClockField::Hours => 'H',
            ClockField::Minutes => 'm',
            ClockField::Seconds => 's',
            ClockField::Millis => 'S',
        }
    }

    /// Digits needed for the largest wrapped value.
    pub fn natural_width(self) -> usize {
        match self {
            ClockField::Millis => 3,
            _ => 2,
        }
    }

    fn unit_millis(self) -> u64 {
        match self {
            ClockField::Millis => 1,
            ClockField::Seconds => 1_000,
            ClockField::Minutes => 60_000,
            ClockField::Hours => 3_600_000,
        }
    }

    fn range(self) -> u64 {
        match self {
            ClockField::Millis => 1_000,
            ClockField::Seconds | ClockField::Minutes => 60,
            ClockField::Hours => 24,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Field { field: ClockField, width: usize },
}

/// A parsed duration pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationPattern {
    tokens: Vec<Token>,
    top: Option<ClockField>,
}

impl DurationPattern {
    pub const DEFAULT: &'static str = "HH:mm:ss.SSS";

    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut tokens: Vec<Token> = Vec::new();
        // (field, width, position) kept until the top field is known
        let mut fields: Vec<(ClockField, usize, usize)> = Vec::new();
        let mut literal = String::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c == '\'' {
                if chars.get(i + 1) == Some(&'\'') {
                    literal.push('\'');
                    i += 2;
                    continue;
                }
                let open = i;
                i += 1;
                loop {
                    match chars.get(i) {
                        None => return Err(PatternError::UnterminatedQuote { position: open }),
                        Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                            literal.push('\'');
                            i += 2;
                        }
                        Some('\'') => {
                            i += 1;
                            break;
                        }
                        Some(&ch) => {
                            literal.push(ch);
                            i += 1;
                        }
                    }
                }
            } else if c.is_ascii_alphabetic() {
                let field = ClockField::from_symbol(c).ok_or(PatternError::UnknownField {
                    token: c,
                    position: i,
                })?;
                let position = i;
                while chars.get(i) == Some(&c) {
                    i += 1;
                }
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                let width = i - position;
                fields.push((field, width, position));
                tokens.push(Token::Field { field, width });
            } else {
                literal.push(c);
                i += 1;
            }
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        let top = fields.iter().map(|(f, _, _)| *f).max();
        for &(field, width, position) in &fields {
            if Some(field) != top && width > field.natural_width() {
                return Err(PatternError::FieldTooWide {
                    token: field.symbol().to_string().repeat(width),
                    position,
                    width,
                    max: field.natural_width(),
                });
            }
        }

        Ok(Self { tokens, top })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Most significant field present, if any.
    pub fn top_field(&self) -> Option<ClockField> {
        self.top
    }

    /// Render a duration. Negative durations get a leading `-`.
    pub fn render(&self, duration: TimeDelta) -> String {
        let ms = duration.num_milliseconds();
        let total = ms.unsigned_abs();
        let mut out = String::new();
        if ms < 0 {
            out.push('-');
        }
        for token in &self.tokens {
            match token {
                Token::Literal(s) => out.push_str(s),
                Token::Field { field, width } => {
                    let mut value = total / field.unit_millis();
                    if Some(*field) != self.top {
                        value %= field.range();
                    }
                    out.push_str(&format!("{value:0width$}", width = *width));
                }
            }
        }
        out
    }
}

impl Default for DurationPattern {
    fn default() -> Self {
        // The default pattern is a constant known to parse.
        Self {
            tokens: vec![
                Token::Field {
                    field: ClockField::Hours,
                    width: 2,
                },
                Token::Literal(":".into()),
                Token::Field {
                    field: ClockField::Minutes,
                    width: 2,
                },
                Token::Literal(":".into()),
                Token::Field {
                    field: ClockField::Seconds,
                    width: 2,
                },
                Token::Literal(".".into()),
                Token::Field {
                    field: ClockField::Millis,
                    width: 3,
                },
            ],
            top: Some(ClockField::Hours),
        }
    }
}
