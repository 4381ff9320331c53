use synopsis_model::SynopsisOutcome;

pub mod cache;
pub mod config;
pub mod imdb;
pub mod normalize;

pub use config::FetchConfig;
pub use imdb::ImdbClient;

/// Something that can look up the synopsis for an external movie id.
///
/// Failures are reported through the outcome, never as an error: a lookup
/// that goes wrong must not stop the caller from moving on to the next id.
#[allow(async_fn_in_trait)]
pub trait SynopsisSource {
    async fn fetch(&self, external_id: &str) -> SynopsisOutcome;

    /// Short description of where synopses come from, for logs and reports.
    fn origin(&self) -> String {
        "custom".to_string()
    }
}
