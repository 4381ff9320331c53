use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.imdb.com/title/tt";
pub const DEFAULT_SUMMARY_SELECTOR: &str = "div.summary_text";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str =
    concat!("movie-synopsis/", env!("CARGO_PKG_VERSION"), " (synopsis enrichment tool)");

/// Settings for fetching synopsis pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Prefix the external id is appended to (e.g., "https://www.imdb.com/title/tt").
    pub base_url: String,
    /// CSS selector for the element whose leading text is the synopsis.
    pub summary_selector: String,
    /// Upper bound on a whole request, including reading the body.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
    /// Where to keep a copy of every fetched page, if anywhere.
    pub cache_dir: Option<PathBuf>,
    /// NFC-normalize synopses and fold whitespace runs into single spaces.
    /// Off by default: synopses are only trimmed.
    pub normalize: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            summary_selector: DEFAULT_SUMMARY_SELECTOR.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache_dir: None,
            normalize: false,
        }
    }
}

impl FetchConfig {
    /// Build the page URL for an external id.
    pub fn url_for(&self, external_id: &str) -> String {
        build_url(&self.base_url, external_id)
    }
}

/// Plain concatenation: the base URL already ends with whatever precedes the id.
pub fn build_url(base_url: &str, external_id: &str) -> String {
    format!("{base_url}{external_id}")
}
