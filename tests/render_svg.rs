use stack_labeler::render::{LabelColors, write_overlay_svg};
use stack_labeler::{FontSpec, FrameLabel, ImageSize, Rect};
use tempfile::tempdir;

fn label(background: bool) -> FrameLabel {
    let rect = Rect::new(4, 10, 48, 12);
    FrameLabel {
        frame: 12,
        text: "12 s".into(),
        origin: (rect.x, rect.bottom()),
        bounds: rect,
        background: background.then_some(rect),
    }
}

#[test]
fn overlay_contains_text_and_box() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("frame.svg");
    write_overlay_svg(
        &label(true),
        ImageSize::new(120, 80),
        &FontSpec::default(),
        LabelColors::default(),
        &path,
    )
    .unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("12 s"));
    assert!(svg.contains("<rect"));
}

#[test]
fn overlay_without_background_has_no_box() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("frame.svg");
    write_overlay_svg(
        &label(false),
        ImageSize::new(120, 80),
        &FontSpec::default(),
        LabelColors::default(),
        &path,
    )
    .unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("12 s"));
    assert!(!svg.contains("<rect"));
}
