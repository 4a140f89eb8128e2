//! Per-frame driver: configuration, preview and the labeling run.
//!
//! ```text
//! Idle -> Configuring <-> Previewing -> Running -> Done
//!              \______________/
//!                     `-> Cancelled
//! ```
//!
//! The host calls [`SequenceController::advance_frame`] once per image while
//! running. Frames outside the visible range, off the every-n-th mask, or
//! after a cancel get no label; their images pass through untouched.

use crate::error::SessionError;
use crate::form::SettingsForm;
use crate::format::{Capabilities, FormatKind, LabelFormatter};
use crate::models::{
    FormatState, FrameLabel, ImageSize, LabelSettings, LocationPreset, PlacementConfig, Rect,
    SequenceConfig,
};
use crate::placement::{self, HeuristicMeasure, TextMeasure};
use crate::time::TimeModel;
use log::{debug, info};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Configuring,
    Previewing,
    Running,
    Done,
    Cancelled,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Configuring => "configuring",
            Phase::Previewing => "previewing",
            Phase::Running => "running",
            Phase::Done => "done",
            Phase::Cancelled => "cancelled",
        }
    }

    fn is_editable(self) -> bool {
        matches!(self, Phase::Idle | Phase::Configuring | Phase::Previewing)
    }
}

/// One processed image of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOutcome {
    pub frame: i64,
    pub label: Option<FrameLabel>,
}

pub struct SequenceController<M: TextMeasure = HeuristicMeasure> {
    image: ImageSize,
    roi: Option<Rect>,
    stack_size: i64,
    settings: LabelSettings,
    measure: M,
    phase: Phase,
    frame: i64,
    cancelled: bool,
    pending: Option<SessionError>,
}

impl SequenceController<HeuristicMeasure> {
    /// Controller using the character-count width estimate.
    pub fn with_heuristic(image: ImageSize, stack_size: i64, roi: Option<Rect>) -> Self {
        Self::new(image, stack_size, roi, HeuristicMeasure)
    }
}

impl<M: TextMeasure> SequenceController<M> {
    /// Start idle with defaults derived from the stack and region of interest.
    pub fn new(image: ImageSize, stack_size: i64, roi: Option<Rect>, measure: M) -> Self {
        Self {
            image,
            roi,
            stack_size: stack_size.max(0),
            settings: LabelSettings::for_stack(stack_size, image, roi),
            measure,
            phase: Phase::Idle,
            frame: 0,
            cancelled: false,
            pending: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &LabelSettings {
        &self.settings
    }

    /// Frame most recently handled (0 before the first).
    pub fn current_frame(&self) -> i64 {
        self.frame
    }

    /// Form error holding back the run, if any: an unparsable field or a bad
    /// frame range.
    pub fn pending_error(&self) -> Option<&SessionError> {
        self.pending.as_ref()
    }

    /// Units to offer for the active format.
    pub fn available_units(&self) -> &'static [&'static str] {
        self.settings.kind.allowed_units()
    }

    /// Which inputs matter for the active format.
    pub fn capabilities(&self) -> Capabilities {
        self.settings.kind.capabilities()
    }

    pub fn configure(
        &mut self,
        sequence: SequenceConfig,
        format: FormatState,
        placement: PlacementConfig,
        kind: FormatKind,
    ) -> Result<(), SessionError> {
        self.configure_settings(LabelSettings {
            sequence,
            kind,
            format,
            placement,
        })
    }

    /// Replace the whole configuration. Corner presets get their coordinates
    /// recomputed for this image.
    pub fn configure_settings(&mut self, mut settings: LabelSettings) -> Result<(), SessionError> {
        self.ensure_editable("configure")?;
        settings.sequence.validate()?;
        if settings.placement.preset != LocationPreset::Custom {
            self.resolve_preset(&mut settings);
        }
        self.settings = settings;
        self.pending = None;
        if self.phase != Phase::Previewing {
            self.enter(Phase::Configuring);
        }
        Ok(())
    }

    /// The single "parameters changed" message from the host's form.
    ///
    /// While previewing, the preview is refreshed and returned. An unparsable
    /// field or an invalid frame range leaves the last good settings in place
    /// and blocks the run until a later edit is accepted.
    pub fn parameters_changed(
        &mut self,
        form: &SettingsForm,
    ) -> Result<Option<FrameLabel>, SessionError> {
        self.ensure_editable("change parameters")?;
        let was_previewing = self.phase == Phase::Previewing;
        self.enter(Phase::Configuring);

        let mut settings = match form.parse(&self.settings) {
            Ok(s) => s,
            Err(e) => return Err(self.block(SessionError::Blocked(e))),
        };
        if let Err(e) = settings.sequence.validate() {
            return Err(self.block(e));
        }
        if settings.placement.preset != self.settings.placement.preset {
            self.resolve_preset(&mut settings);
        }
        self.settings = settings;
        self.pending = None;

        if was_previewing {
            return self.begin_preview().map(Some);
        }
        Ok(None)
    }

    /// Show the last visible frame's label so the widest text can be checked.
    /// Range and every-n-th filtering do not apply to the preview.
    pub fn begin_preview(&mut self) -> Result<FrameLabel, SessionError> {
        self.ensure_editable("preview")?;
        self.enter(Phase::Previewing);
        self.frame = self.settings.sequence.last_frame;
        Ok(self.label_at(self.frame))
    }

    pub fn end_preview(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::Previewing {
            return Err(self.invalid("end preview"));
        }
        self.enter(Phase::Configuring);
        Ok(())
    }

    /// Start labeling from the first image of the stack.
    pub fn begin_run(&mut self) -> Result<(), SessionError> {
        self.ensure_editable("start a run")?;
        if let Some(e) = &self.pending {
            return Err(e.clone());
        }
        self.settings.sequence.validate()?;
        self.frame = 0;
        self.cancelled = false;
        self.enter(Phase::Running);
        Ok(())
    }

    /// Before a run this ends the session. During a run the remaining frames
    /// are left unlabeled; labels already drawn stay.
    pub fn cancel(&mut self) {
        match self.phase {
            Phase::Running => {
                info!("run cancelled at frame {}", self.frame);
                self.cancelled = true;
            }
            Phase::Done | Phase::Cancelled => {}
            _ => self.enter(Phase::Cancelled),
        }
    }

    /// Move to the next image. Returns its label, or `None` when the frame is
    /// skipped or no run is active.
    pub fn advance_frame(&mut self) -> Option<FrameLabel> {
        if self.phase != Phase::Running {
            return None;
        }
        self.frame += 1;
        let frame = self.frame;
        let label = (!self.cancelled && self.settings.sequence.is_labeled(frame))
            .then(|| self.label_at(frame));
        if frame >= self.settings.sequence.last_frame {
            self.enter(Phase::Done);
        }
        label
    }

    /// The host ran out of images.
    pub fn finish(&mut self) {
        if self.phase == Phase::Running {
            self.enter(Phase::Done);
        }
    }

    /// Run over every image of the stack.
    pub fn run_all(&mut self) -> Result<Vec<FrameOutcome>, SessionError> {
        if self.phase != Phase::Running {
            self.begin_run()?;
        }
        let mut out = Vec::with_capacity(self.stack_size as usize);
        for frame in 1..=self.stack_size {
            let label = self.advance_frame();
            out.push(FrameOutcome { frame, label });
        }
        self.finish();
        Ok(out)
    }

    /// Label for any frame under the current settings, ignoring range and mask.
    pub fn label_at(&self, frame: i64) -> FrameLabel {
        let s = &self.settings;
        let formatter = LabelFormatter::new(s.kind, TimeModel::from(&s.sequence), &s.format);
        let text = formatter.label_for_frame(frame);
        let worst = formatter.last_label();
        let placed =
            placement::compute_bounds(self.image, self.roi, &s.placement, &worst, &self.measure);
        FrameLabel {
            frame,
            text,
            origin: placed.origin(),
            bounds: placed.label,
            background: placed.background,
        }
    }

    fn resolve_preset(&self, settings: &mut LabelSettings) {
        let worst = LabelFormatter::new(
            settings.kind,
            TimeModel::from(&settings.sequence),
            &settings.format,
        )
        .last_label();
        let preset = settings.placement.preset;
        placement::apply_preset(
            &mut settings.placement,
            preset,
            self.image,
            &worst,
            &self.measure,
        );
    }

    fn enter(&mut self, phase: Phase) {
        if phase != self.phase {
            debug!("{} -> {}", self.phase.name(), phase.name());
            self.phase = phase;
        }
    }

    fn block(&mut self, e: SessionError) -> SessionError {
        debug!("run blocked: {e}");
        self.pending = Some(e.clone());
        e
    }

    fn ensure_editable(&self, action: &'static str) -> Result<(), SessionError> {
        if self.phase.is_editable() {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            phase: self.phase.name(),
        }
    }
}
