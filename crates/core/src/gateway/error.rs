//! Gateway error taxonomy.

use thiserror::Error;

/// Failures surfaced by a generation backend.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No credential was supplied. Checked before any network attempt.
    #[error("API Key is missing.")]
    MissingCredential,

    /// The provider answered 2xx but produced no text, typically a safety
    /// filter or an empty candidate list.
    #[error("No text generated. Possible safety filter trigger or empty response.")]
    EmptyGeneration,

    /// The HTTP request itself failed (connect, timeout, decode).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider returned a non-success status.
    #[error("provider error (status {status}): {message}")]
    Provider { status: u16, message: String },

    /// The request was malformed before it ever left the process.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
