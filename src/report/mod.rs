pub mod json;
pub mod junit;
pub mod types;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Write every report format into `output_dir`, creating it if needed
pub fn write_reports(results: &types::TestResults, output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create report directory: {}",
            output_dir.display()
        )
    })?;

    Ok(vec![
        json::write_report(results, output_dir)?,
        junit::write_report(results, output_dir)?,
    ])
}
