//! Narration generation errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NarrationError {
    #[error("Narration generator not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),
}
