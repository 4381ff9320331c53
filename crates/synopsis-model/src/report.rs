use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::synopsis::SynopsisOutcome;

/// Summary of one enrichment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub input: String,
    pub output: String,
    /// Where synopses were fetched from (base URL for the web source).
    pub source: String,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    pub total: usize,
    pub found: usize,
    pub missing: usize,
    pub failed: usize,
    /// Input rows whose movie id overwrote an earlier row.
    pub duplicates: usize,
    pub failures: Vec<FailureEntry>,
}

/// A movie whose synopsis came out empty, and why.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailureEntry {
    pub movie_id: String,
    pub external_id: String,
    pub reason: String,
}

impl RunReport {
    pub fn new(
        input: impl Into<String>,
        output: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            source: source.into(),
            started_at: Utc::now(),
            finished_at: None,
            total: 0,
            found: 0,
            missing: 0,
            failed: 0,
            duplicates: 0,
            failures: Vec::new(),
        }
    }

    /// Tally one outcome.
    pub fn record(&mut self, movie_id: &str, external_id: &str, outcome: &SynopsisOutcome) {
        self.total += 1;
        match outcome {
            SynopsisOutcome::Found(_) => self.found += 1,
            SynopsisOutcome::Missing => self.missing += 1,
            SynopsisOutcome::Failed(_) => self.failed += 1,
        }
        if let Some(reason) = outcome.reason() {
            self.failures.push(FailureEntry {
                movie_id: movie_id.to_string(),
                external_id: external_id.to_string(),
                reason,
            });
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synopsis::FetchFailure;

    #[test]
    fn test_record_counts() {
        let mut report = RunReport::new("links.csv", "synopsis.csv", "https://example.test/tt");
        report.record("1", "0114709", &SynopsisOutcome::Found("A cowboy doll...".into()));
        report.record("2", "0113497", &SynopsisOutcome::Missing);
        report.record(
            "3",
            "0113228",
            &SynopsisOutcome::Failed(FetchFailure::Transport("timed out".into())),
        );

        assert_eq!(report.total, 3);
        assert_eq!(report.found, 1);
        assert_eq!(report.missing, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].movie_id, "2");
        assert_eq!(report.failures[1].reason, "transport error: timed out");
    }

    #[test]
    fn test_json_roundtrip() {
        let mut report = RunReport::new("links.csv", "synopsis.csv", "https://example.test/tt");
        report.record("1", "0114709", &SynopsisOutcome::Missing);
        report.finish();

        let json = serde_json::to_string_pretty(&report).unwrap();
        let parsed: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total, 1);
        assert_eq!(parsed.failures, report.failures);
        assert!(parsed.finished_at.is_some());
    }
}
