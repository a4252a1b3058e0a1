use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("collector rejected {count} entries for group with status {status}")]
    Rejected { status: u16, count: usize },

    #[error("fire-and-forget delivery requires a running tokio runtime")]
    NoRuntime,
}
