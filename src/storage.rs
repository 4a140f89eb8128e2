use crate::models::FrameLabel;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save a label plan as CSV with header, one row per labeled frame.
pub fn save_csv<P: AsRef<Path>>(labels: &[FrameLabel], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("frame", "text", "x", "y", "width", "height", "background"))?;
    for l in labels {
        wtr.serialize((
            l.frame,
            &l.text,
            l.bounds.x,
            l.bounds.y,
            l.bounds.width,
            l.bounds.height,
            l.background.is_some(),
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a label plan as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(labels: &[FrameLabel], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(labels)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
