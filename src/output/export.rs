use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::path::Path;

use crate::config::ensure_parent_dir;
use crate::outranking::ElectreReport;

/// Serialize every matrix of a run as pretty-printed JSON.
pub fn report_to_json(report: &ElectreReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}

/// Save a report as JSON atomically
///
/// Uses atomic-write-file so a reader never sees a half-written report.
/// Creates the parent directory if it doesn't exist.
pub fn write_report(path: &Path, report: &ElectreReport) -> Result<()> {
    ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, report).context("Failed to serialize report")?;

    file.commit()
        .with_context(|| format!("Failed to save report to {}", path.display()))?;

    Ok(())
}
