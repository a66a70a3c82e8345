use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

/// Writes the staged JSON artifacts of one pipeline run, each named
/// `<basename>_<stage>.json` after the source file.
#[derive(Debug, Clone)]
pub struct StageWriter {
    out_dir: PathBuf,
    base: String,
}

impl StageWriter {
    pub fn new(out_dir: PathBuf, source: &Path) -> Self {
        let base = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "label".to_string());
        Self { out_dir, base }
    }

    pub fn write_stage<T: Serialize>(&self, stage: &str, value: &T) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;
        let path = self.out_dir.join(format!("{}_{stage}.json", self.base));
        let data = serde_json::to_string_pretty(value)?;
        fs::write(&path, data)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_output_dir(prefix: &str) -> PathBuf {
        let mut out = std::env::temp_dir();
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis();
        let pid = std::process::id();
        out.push(format!("{prefix}-{pid}-{now}"));
        out
    }

    #[test]
    fn writes_stage_named_after_source() -> Result<()> {
        let out = temp_output_dir("labelstruct-export");
        let writer = StageWriter::new(out.clone(), Path::new("shots/biscuits.jpg"));
        let path = writer.write_stage("primary_staging", &serde_json::json!({"ok": true}))?;

        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("biscuits_primary_staging.json")
        );
        let contents = fs::read_to_string(&path)?;
        assert!(contents.contains("ok"));

        let _ = fs::remove_dir_all(&out);
        Ok(())
    }
}
