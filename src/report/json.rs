use super::types::TestResults;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const FILE_NAME: &str = "results.json";

/// Write `results.json` into `output_dir`
pub fn write_report(results: &TestResults, output_dir: &Path) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(results)?;
    let path = output_dir.join(FILE_NAME);
    std::fs::write(&path, json)?;
    Ok(path)
}
