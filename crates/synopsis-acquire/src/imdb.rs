use crate::cache;
use crate::config::FetchConfig;
use crate::normalize;
use crate::SynopsisSource;
use anyhow::{Context, Result};
use scraper::{Html, Node, Selector};
use std::ops::Deref;
use synopsis_model::{FetchFailure, SynopsisOutcome};

/// Synopsis source backed by IMDb-style title pages.
///
/// Each lookup is a single GET to `{base_url}{external_id}`; there is no retry.
/// The synopsis is the leading text of the first element matching the
/// configured selector (`div.summary_text` by default).
#[derive(Debug, Clone)]
pub struct ImdbClient {
    config: FetchConfig,
    client: reqwest::Client,
    selector: Selector,
}

impl ImdbClient {
    /// Build a client. Fails if the HTTP client cannot be constructed or the
    /// selector does not parse.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let selector = parse_selector(&config.summary_selector)?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            config,
            client,
            selector,
        })
    }

    async fn fetch_page(&self, url: &str) -> Result<String, FetchFailure> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(error_chain(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::HttpStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchFailure::Body(error_chain(&e)))
    }
}

impl SynopsisSource for ImdbClient {
    async fn fetch(&self, external_id: &str) -> SynopsisOutcome {
        let url = self.config.url_for(external_id);
        tracing::debug!(url = %url, "Fetching title page");

        let html = match self.fetch_page(&url).await {
            Ok(html) => html,
            Err(failure) => {
                tracing::warn!(url = %url, error = %failure, "Failed to retrieve page contents");
                return SynopsisOutcome::Failed(failure);
            }
        };
        tracing::debug!(bytes = html.len(), "Received HTML");

        if let Some(dir) = &self.config.cache_dir {
            if let Err(e) = cache::cache_html(dir, external_id, &html) {
                tracing::warn!(error = %format!("{e:#}"), "Could not cache raw HTML");
            }
        }

        match extract_synopsis(&html, &self.selector) {
            Some(synopsis) if self.config.normalize => {
                SynopsisOutcome::Found(normalize::normalize_synopsis(&synopsis))
            }
            Some(synopsis) => SynopsisOutcome::Found(synopsis),
            None => {
                tracing::warn!(
                    external_id = %external_id,
                    selector = %self.config.summary_selector,
                    "Failed to extract synopsis"
                );
                SynopsisOutcome::Missing
            }
        }
    }

    fn origin(&self) -> String {
        self.config.base_url.clone()
    }
}

/// Parse a CSS selector, turning scraper's borrowed error into an owned one.
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| anyhow::anyhow!("Invalid summary selector '{selector}': {e:?}"))
}

/// Extract the synopsis from a title page.
///
/// Takes the first element matching `selector` and returns its first child
/// if that child is a text node, trimmed of surrounding whitespace. The text
/// inside is left as the page has it. Returns `None` when there is no
/// matching element, the element starts with markup instead of text, or the
/// text is blank.
pub fn extract_synopsis(html: &str, selector: &Selector) -> Option<String> {
    let document = Html::parse_document(html);
    let region = document.select(selector).next()?;

    let text = leading_text(*region)?;
    let synopsis = text.trim();
    if synopsis.is_empty() {
        return None;
    }
    Some(synopsis.to_string())
}

fn leading_text(node: ego_tree::NodeRef<'_, Node>) -> Option<String> {
    match node.first_child()?.value() {
        Node::Text(text) => Some(text.deref().to_string()),
        _ => None,
    }
}

/// Render an error with its source chain, e.g. "error sending request: connection refused".
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
