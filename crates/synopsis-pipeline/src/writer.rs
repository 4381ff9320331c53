use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use synopsis_model::SynopsisRecord;

pub const HEADER: [&str; 2] = ["movieId", "synopsis"];

/// CSV writer for synopsis rows.
///
/// The header is written up front so an empty run still yields a valid file,
/// and every row is flushed as soon as it is written.
pub struct SynopsisWriter<W: Write> {
    inner: csv::Writer<W>,
    rows: usize,
}

impl SynopsisWriter<File> {
    /// Create (or truncate) the output file and write the header.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        Self::from_writer(file)
    }
}

impl<W: Write> SynopsisWriter<W> {
    pub fn from_writer(writer: W) -> Result<Self> {
        let mut inner = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        inner.write_record(HEADER).context("Failed to write CSV header")?;
        inner.flush()?;
        Ok(Self { inner, rows: 0 })
    }

    pub fn write_record(&mut self, record: &SynopsisRecord) -> Result<()> {
        self.inner
            .serialize(record)
            .with_context(|| format!("Failed to write row for movie id {}", record.movie_id))?;
        self.inner.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(records: &[SynopsisRecord]) -> String {
        let mut writer = SynopsisWriter::from_writer(Vec::new()).unwrap();
        for record in records {
            writer.write_record(record).unwrap();
        }
        assert_eq!(writer.rows(), records.len());
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_header_only() {
        assert_eq!(written(&[]), "movieId,synopsis\n");
    }

    #[test]
    fn test_rows_in_order() {
        let out = written(&[
            SynopsisRecord::new("1", "A cowboy doll..."),
            SynopsisRecord::new("2", ""),
        ]);
        assert_eq!(out, "movieId,synopsis\n1,A cowboy doll...\n2,\n");
    }

    #[test]
    fn test_quotes_when_needed() {
        let out = written(&[SynopsisRecord::new(
            "3",
            "John, an \"ordinary\" man, wakes up.",
        )]);
        assert_eq!(
            out,
            "movieId,synopsis\n3,\"John, an \"\"ordinary\"\" man, wakes up.\"\n"
        );
    }

    #[test]
    fn test_create_truncates() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("synopsis.csv");
        std::fs::write(&path, "stale contents from a previous run\n").unwrap();

        let mut writer = SynopsisWriter::create(&path).unwrap();
        writer.write_record(&SynopsisRecord::new("1", "x")).unwrap();

        // Rows are flushed as they are written
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "movieId,synopsis\n1,x\n"
        );
    }
}
