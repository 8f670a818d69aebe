/// Errors talking to the dashboard backend
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The configured base URL does not parse.
    #[error("invalid API base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// No response, or a response body that could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
