use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use synopsis_model::IdMapping;

/// Read a links table (e.g., MovieLens `links.csv`) into an ordered id mapping.
///
/// The first row is a header and is skipped. Each following row contributes
/// its first column as the movie id and its second as the external id; any
/// further columns are ignored. Rows with fewer than two columns, or with an
/// empty id, are skipped with a warning. A repeated movie id replaces the
/// earlier external id.
pub fn read_mapping(path: &Path) -> Result<IdMapping> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open links file {}", path.display()))?;
    let mapping = read_mapping_from_reader(file)
        .with_context(|| format!("Failed to read links file {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        links = mapping.len(),
        duplicates = mapping.duplicates(),
        "Read id mapping"
    );
    Ok(mapping)
}

/// Same as [`read_mapping`], over any reader.
pub fn read_mapping_from_reader<R: Read>(reader: R) -> Result<IdMapping> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut mapping = IdMapping::new();

    for result in csv_reader.records() {
        let record = result.context("Malformed CSV row")?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let (Some(movie_id), Some(external_id)) = (record.get(0), record.get(1)) else {
            tracing::warn!(line, fields = record.len(), "Skipping row with fewer than two columns");
            continue;
        };
        if movie_id.is_empty() || external_id.is_empty() {
            tracing::warn!(line, "Skipping row with an empty id");
            continue;
        }

        if let Some(previous) = mapping.insert(movie_id, external_id) {
            tracing::warn!(
                line,
                movie_id = %movie_id,
                previous = %previous,
                external_id = %external_id,
                "Duplicate movie id, keeping the later external id"
            );
        }
    }

    Ok(mapping)
}
