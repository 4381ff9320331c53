use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use synopsis_model::RunReport;

/// Write the run report as pretty-printed JSON.
pub fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, &json)
        .with_context(|| format!("Failed to write run report {}", path.display()))?;
    tracing::info!(path = %path.display(), failures = report.failures.len(), "Wrote run report");
    Ok(())
}
