use thiserror::Error;

/// Errors returned by the Apify REST client.
#[derive(Debug, Error)]
pub enum ApifyError {
    /// Transport-level failure (connect, TLS, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("Apify API error {status}: {message}")]
    Api { status: u16, message: String },

    /// A run was accepted but the response carried no run id
    #[error("Apify response did not include a run id")]
    MissingRunId,
}

pub type Result<T> = std::result::Result<T, ApifyError>;
