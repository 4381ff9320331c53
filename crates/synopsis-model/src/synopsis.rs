use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One output row: a movie id and its synopsis.
///
/// The synopsis is empty whenever no text could be obtained, whatever the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynopsisRecord {
    #[serde(rename = "movieId")]
    pub movie_id: String,
    pub synopsis: String,
}

impl SynopsisRecord {
    pub fn new(movie_id: impl Into<String>, synopsis: impl Into<String>) -> Self {
        Self {
            movie_id: movie_id.into(),
            synopsis: synopsis.into(),
        }
    }
}

/// Why a synopsis fetch failed before any HTML could be examined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Result of looking up one synopsis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynopsisOutcome {
    /// The page held a synopsis (already trimmed and normalized).
    Found(String),
    /// The page was retrieved but had no synopsis region, or it was empty.
    Missing,
    /// The page could not be retrieved.
    Failed(FetchFailure),
}

impl SynopsisOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SynopsisOutcome::Found(_))
    }

    /// Collapse to the text written to the output file.
    pub fn into_synopsis(self) -> String {
        match self {
            SynopsisOutcome::Found(text) => text,
            SynopsisOutcome::Missing | SynopsisOutcome::Failed(_) => String::new(),
        }
    }

    /// Human-readable reason for a non-`Found` outcome.
    pub fn reason(&self) -> Option<String> {
        match self {
            SynopsisOutcome::Found(_) => None,
            SynopsisOutcome::Missing => Some("no synopsis found on page".to_string()),
            SynopsisOutcome::Failed(failure) => Some(failure.to_string()),
        }
    }
}
