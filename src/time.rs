//! Frame index to elapsed value.

use crate::models::SequenceConfig;

/// Linear map from a 1-based frame number to its elapsed time or depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeModel {
    pub start: f64,
    pub interval: f64,
    pub last_frame: i64,
}

impl TimeModel {
    pub fn new(start: f64, interval: f64, last_frame: i64) -> Self {
        Self {
            start,
            interval,
            last_frame,
        }
    }

    /// `start + interval * (frame - 1)`.
    pub fn elapsed_at(&self, frame: i64) -> f64 {
        self.start + self.interval * (frame - 1) as f64
    }

    /// Elapsed value of the last visible frame, the assumed widest label.
    pub fn last_elapsed(&self) -> f64 {
        self.elapsed_at(self.last_frame)
    }

    /// A zero interval means the label does not count.
    pub fn is_static(&self) -> bool {
        self.interval == 0.0
    }
}

impl From<&SequenceConfig> for TimeModel {
    fn from(cfg: &SequenceConfig) -> Self {
        Self::new(cfg.start, cfg.interval, cfg.last_frame)
    }
}
