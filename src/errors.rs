use thiserror::Error;

/// Failures talking to the remote inventory API.
///
/// Every variant is recoverable: callers surface a notification, keep form
/// state intact, and return the UI to an interactive state.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("invalid API base url: {0}")]
    BaseUrl(#[from] url::ParseError),
}
