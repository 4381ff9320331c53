use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

use synopsis_acquire::SynopsisSource;
use synopsis_model::{IdMapping, RunReport, SynopsisRecord};

pub mod links;
pub mod report;
pub mod writer;

use writer::SynopsisWriter;

/// Inputs for one enrichment run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Links table mapping movie ids to external ids.
    pub input: PathBuf,
    /// Synopsis CSV to create (truncated if it exists).
    pub output: PathBuf,
    /// Only process the first N links.
    pub limit: Option<usize>,
}

/// Read the links table, look up every synopsis, and write the synopsis CSV.
///
/// The output file is only created once the links table has been read, so a
/// missing or malformed input leaves any previous output untouched.
pub async fn run<S: SynopsisSource>(options: &RunOptions, source: &S) -> Result<RunReport> {
    let mut mapping = links::read_mapping(&options.input)?;
    let duplicates = mapping.duplicates();

    if let Some(limit) = options.limit {
        if limit < mapping.len() {
            tracing::info!(limit, links = mapping.len(), "Limiting run to the first links");
            mapping.truncate(limit);
        }
    }

    let mut report = RunReport::new(
        options.input.display().to_string(),
        options.output.display().to_string(),
        source.origin(),
    );
    report.duplicates = duplicates;

    let mut writer = SynopsisWriter::create(&options.output)?;
    create_synopsis(&mapping, source, &mut writer, &mut report).await?;
    report.finish();

    tracing::info!(
        path = %options.output.display(),
        rows = writer.rows(),
        found = report.found,
        missing = report.missing,
        failed = report.failed,
        "Wrote synopsis CSV"
    );
    Ok(report)
}

/// Fetch and write one row per link, in mapping order.
///
/// A lookup that fails yields an empty synopsis and the loop moves on; only
/// errors writing the output stop the run.
pub async fn create_synopsis<S, W>(
    mapping: &IdMapping,
    source: &S,
    writer: &mut SynopsisWriter<W>,
    report: &mut RunReport,
) -> Result<()>
where
    S: SynopsisSource,
    W: Write,
{
    for link in mapping {
        tracing::info!(
            movie_id = %link.movie_id,
            external_id = %link.external_id,
            "Writing synopsis for movie id"
        );

        let outcome = source.fetch(&link.external_id).await;
        report.record(&link.movie_id, &link.external_id, &outcome);

        let record = SynopsisRecord::new(link.movie_id.as_str(), outcome.into_synopsis());
        writer.write_record(&record)?;
    }

    Ok(())
}
