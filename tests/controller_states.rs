use stack_labeler::error::Field;
use stack_labeler::form::SettingsForm;
use stack_labeler::{
    FormatKind, FormatState, ImageSize, LocationPreset, Phase, PlacementConfig, Rect,
    SequenceConfig, SequenceController, SessionError,
};

fn controller(frames: i64) -> SequenceController {
    SequenceController::with_heuristic(ImageSize::new(200, 100), frames, None)
}

fn seconds(places: u32) -> FormatState {
    FormatState {
        unit: "s".into(),
        decimal_places: places,
        ..FormatState::default()
    }
}

fn labeled_frames(ctl: &mut SequenceController) -> Vec<i64> {
    ctl.run_all()
        .unwrap()
        .into_iter()
        .filter_map(|o| o.label.map(|l| l.frame))
        .collect()
}

#[test]
fn every_third_frame_is_labeled() {
    let mut ctl = controller(10);
    let seq = SequenceConfig {
        frame_step: 3,
        ..SequenceConfig::for_stack(10)
    };
    ctl.configure(seq, seconds(0), PlacementConfig::default(), FormatKind::Decimal)
        .unwrap();
    assert_eq!(labeled_frames(&mut ctl), vec![3, 6, 9]);
    assert_eq!(ctl.phase(), Phase::Done);
}

#[test]
fn visible_range_limits_labels() {
    let mut ctl = controller(10);
    let seq = SequenceConfig {
        first_frame: 4,
        last_frame: 7,
        ..SequenceConfig::for_stack(10)
    };
    ctl.configure(seq, seconds(0), PlacementConfig::default(), FormatKind::Decimal)
        .unwrap();
    let outcomes = ctl.run_all().unwrap();
    assert_eq!(outcomes.len(), 10);
    let frames: Vec<i64> = outcomes.iter().filter_map(|o| o.label.as_ref().map(|l| l.frame)).collect();
    assert_eq!(frames, vec![4, 5, 6, 7]);
    assert_eq!(outcomes[4].label.as_ref().unwrap().text, "5 s");
}

#[test]
fn preview_shows_last_frame_and_run_starts_at_one() {
    let mut ctl = controller(20);
    let seq = SequenceConfig {
        first_frame: 2,
        last_frame: 12,
        frame_step: 5,
        ..SequenceConfig::for_stack(20)
    };
    ctl.configure(seq, seconds(0), PlacementConfig::default(), FormatKind::Decimal)
        .unwrap();
    assert_eq!(ctl.phase(), Phase::Configuring);

    // 12 is off the every-5th mask, the preview shows it anyway
    let preview = ctl.begin_preview().unwrap();
    assert_eq!(ctl.phase(), Phase::Previewing);
    assert_eq!(preview.frame, 12);
    assert_eq!(preview.text, "12 s");

    ctl.begin_run().unwrap();
    assert_eq!(ctl.advance_frame(), None);
    assert_eq!(ctl.current_frame(), 1);
}

#[test]
fn labels_share_the_worst_case_box() {
    let mut ctl = controller(100);
    let placement = PlacementConfig {
        background: true,
        ..PlacementConfig::default()
    };
    ctl.configure(SequenceConfig::for_stack(100), seconds(0), placement, FormatKind::Decimal)
        .unwrap();
    let labels: Vec<_> = ctl.run_all().unwrap().into_iter().filter_map(|o| o.label).collect();
    assert_eq!(labels.len(), 100);
    let first = &labels[0];
    assert_eq!(first.text, "1 s");
    assert!(labels.iter().all(|l| l.bounds == first.bounds));
    assert!(labels.iter().all(|l| l.background == Some(first.bounds)));
    assert_eq!(first.origin, (first.bounds.x, first.bounds.bottom()));
}

#[test]
fn cancel_before_run_ends_session() {
    let mut ctl = controller(5);
    ctl.begin_preview().unwrap();
    ctl.cancel();
    assert_eq!(ctl.phase(), Phase::Cancelled);
    assert!(matches!(
        ctl.begin_run(),
        Err(SessionError::InvalidTransition { .. })
    ));
    assert_eq!(ctl.advance_frame(), None);
}

#[test]
fn cancel_during_run_skips_remaining_labels() {
    let mut ctl = controller(6);
    ctl.begin_run().unwrap();
    assert!(ctl.advance_frame().is_some());
    assert!(ctl.advance_frame().is_some());
    ctl.cancel();
    assert_eq!(ctl.phase(), Phase::Running);
    for _ in 3..=6 {
        assert_eq!(ctl.advance_frame(), None);
    }
    assert_eq!(ctl.phase(), Phase::Done);
}

#[test]
fn run_is_blocked_by_unparsable_field() {
    let mut ctl = controller(5);
    let mut form = SettingsForm::from_settings(ctl.settings());
    form.start = "one".into();
    let err = ctl.parameters_changed(&form).unwrap_err();
    assert!(matches!(&err, SessionError::Blocked(e) if e.field == Field::Start));
    assert_eq!(ctl.pending_error(), Some(&err));
    assert!(matches!(ctl.begin_run(), Err(SessionError::Blocked(_))));

    form.start = "0".into();
    assert_eq!(ctl.parameters_changed(&form).unwrap(), None);
    assert!(ctl.pending_error().is_none());
    ctl.begin_run().unwrap();
    assert_eq!(ctl.advance_frame().unwrap().text, "0.000 s");
}

#[test]
fn run_is_blocked_by_inverted_range_edit() {
    let mut ctl = controller(10);
    let mut form = SettingsForm::from_settings(ctl.settings());
    form.first_frame = "8".into();
    form.last_frame = "3".into();
    form.start = "100".into();
    let err = ctl.parameters_changed(&form).unwrap_err();
    assert_eq!(err, SessionError::InvalidRange { first: 8, last: 3 });
    assert_eq!(ctl.pending_error(), Some(&err));
    assert_eq!(ctl.begin_run(), Err(err));
    assert_eq!(ctl.phase(), Phase::Configuring);
    assert_eq!(ctl.settings().sequence.start, 1.0);

    form.first_frame = "2".into();
    ctl.parameters_changed(&form).unwrap();
    assert!(ctl.pending_error().is_none());
    let texts: Vec<String> = ctl
        .run_all()
        .unwrap()
        .into_iter()
        .filter_map(|o| o.label.map(|l| l.text))
        .collect();
    assert_eq!(texts, vec!["101.000 s", "102.000 s"]);
}

#[test]
fn edits_refresh_an_active_preview() {
    let mut ctl = controller(10);
    ctl.begin_preview().unwrap();
    let mut form = SettingsForm::from_settings(ctl.settings());
    form.kind = FormatKind::Digital;
    let label = ctl.parameters_changed(&form).unwrap().unwrap();
    assert_eq!(ctl.phase(), Phase::Previewing);
    assert_eq!(ctl.settings().format.unit, "s");
    assert_eq!(label.text, "00:00:10.000");
    assert_eq!(ctl.available_units(), &["min", "s", "ms"]);
    assert!(ctl.capabilities().custom_pattern);

    ctl.end_preview().unwrap();
    assert_eq!(ctl.phase(), Phase::Configuring);
    assert!(ctl.end_preview().is_err());
}

#[test]
fn preset_and_manual_coordinates() {
    let mut ctl = controller(10);
    let mut form = SettingsForm::from_settings(ctl.settings());
    form.preset = LocationPreset::LowerLeft;
    ctl.parameters_changed(&form).unwrap();
    let p = &ctl.settings().placement;
    assert_eq!((p.x, p.y, p.preset), (0, 88, LocationPreset::LowerLeft));

    let mut form = SettingsForm::from_settings(ctl.settings());
    form.x = "15".into();
    ctl.parameters_changed(&form).unwrap();
    let p = &ctl.settings().placement;
    assert_eq!((p.x, p.y, p.preset), (15, 88, LocationPreset::Custom));
}

#[test]
fn invalid_range_is_rejected() {
    let mut ctl = controller(10);
    let seq = SequenceConfig {
        first_frame: 8,
        last_frame: 3,
        ..SequenceConfig::for_stack(10)
    };
    let err = ctl
        .configure(seq, seconds(0), PlacementConfig::default(), FormatKind::Decimal)
        .unwrap_err();
    assert_eq!(err, SessionError::InvalidRange { first: 8, last: 3 });
}

#[test]
fn no_edits_while_running() {
    let mut ctl = controller(3);
    ctl.begin_run().unwrap();
    let form = SettingsForm::from_settings(ctl.settings());
    assert!(matches!(
        ctl.parameters_changed(&form),
        Err(SessionError::InvalidTransition { .. })
    ));
    assert!(ctl.begin_preview().is_err());
    ctl.finish();
    assert_eq!(ctl.phase(), Phase::Done);
}

#[test]
fn custom_roi_sets_defaults() {
    let roi = Rect::new(30, 40, 60, 20);
    let ctl = SequenceController::with_heuristic(ImageSize::new(200, 100), 4, Some(roi));
    let p = &ctl.settings().placement;
    assert_eq!((p.x, p.y, p.preset), (30, 40, LocationPreset::Custom));
    assert_eq!(p.font.size_px, 20);
    let label = ctl.label_at(4);
    assert_eq!((label.bounds.x, label.bounds.y, label.bounds.height), (30, 40, 20));
}

#[test]
fn huge_typed_coordinates_stay_on_image() {
    let mut ctl = controller(2);
    let mut form = SettingsForm::from_settings(ctl.settings());
    form.x = i32::MIN.to_string();
    form.y = i32::MAX.to_string();
    ctl.parameters_changed(&form).unwrap();
    ctl.begin_run().unwrap();
    let label = ctl.advance_frame().unwrap();
    assert_eq!((label.bounds.x, label.bounds.y), (0, 88));
    assert_eq!(label.origin, (0, 100));
}
