use crate::plexpy::Command;

/// Everything that can end a collection job. Only
/// [`CollectError::UpstreamUnavailable`] is an expected outcome, every other
/// variant is an unexpected failure; none of them are retried.
#[derive(thiserror::Error, Debug)]
pub enum CollectError {
    #[error("failed to query PlexPy ({command}), please verify your settings")]
    UpstreamUnavailable { command: Command },
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("InfluxDB rejected the request with status {status}: {body}")]
    Sink { status: u16, body: String },
    #[error("invalid InfluxDB endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("collection task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

// Request URLs carry the PlexPy API key and the InfluxDB credentials.
impl From<reqwest::Error> for CollectError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl CollectError {
    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable { .. })
    }
}
