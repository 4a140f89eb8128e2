//! Label settings files (pretty JSON).

use crate::models::LabelSettings;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Read settings; fields missing from the file keep their defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<LabelSettings> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let settings = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing settings in {}", path.display()))?;
    Ok(settings)
}

pub fn save_settings<P: AsRef<Path>>(settings: &LabelSettings, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let s = serde_json::to_string_pretty(settings)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatKind;
    use tempfile::tempdir;

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("s.json");
        std::fs::write(&p, r#"{"kind":"Digital","format":{"unit":"min"}}"#).unwrap();
        let s = load_settings(&p).unwrap();
        assert_eq!(s.kind, FormatKind::Digital);
        assert_eq!(s.format.unit, "min");
        assert_eq!(s.format.decimal_places, 3);
        assert_eq!(s.sequence.start, 1.0);
        assert_eq!(s.placement.x, 2);
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("s.json");
        let mut s = LabelSettings::default();
        s.kind = FormatKind::CustomSuffix;
        s.format.custom_suffix = "slices".into();
        s.sequence.frame_step = 4;
        s.placement.background = true;
        save_settings(&s, &p).unwrap();
        assert_eq!(load_settings(&p).unwrap(), s);
    }
}
