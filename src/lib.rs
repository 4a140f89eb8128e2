//! stack_labeler
//!
//! Time and position labels for image stacks (z-stacks or time series).
//! Pairs with the `stack-labeler` CLI.
//!
//! ### Features
//! - Elapsed value per frame from a start offset and interval
//! - Decimal (`7.250 s`), digital clock (`00:01:05.000`, custom patterns) and custom-suffix labels
//! - Label rectangle and background box that stay inside the image for the whole run
//! - Preview of the widest label, every-n-th frame labeling, visible frame range
//! - Label plans as CSV or JSON, overlays as SVG
//!
//! ### Example
//! ```
//! use stack_labeler::{ImageSize, SequenceController};
//!
//! let mut ctl = SequenceController::with_heuristic(ImageSize::new(200, 100), 10, None);
//! let preview = ctl.begin_preview()?;
//! assert_eq!(preview.text, "10.000 s");
//! let labels: Vec<_> = ctl.run_all()?.into_iter().filter_map(|o| o.label).collect();
//! assert_eq!(labels.len(), 10);
//! # Ok::<(), stack_labeler::SessionError>(())
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod format;
pub mod models;
pub mod placement;
pub mod render;
pub mod storage;
pub mod time;

pub use controller::{FrameOutcome, Phase, SequenceController};
pub use error::{ParseError, PatternError, SessionError};
pub use format::{Capabilities, FormatKind, LabelFormatter, available_units_for, capabilities_of};
pub use models::{
    FontSpec, FormatState, FrameLabel, ImageSize, LabelSettings, LocationPreset,
    PlacementConfig, Rect, SequenceConfig,
};
pub use time::TimeModel;
