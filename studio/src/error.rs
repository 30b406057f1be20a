//! Error types for the studio library.
//!
//! Service failures from the generation call never show up here: the
//! [`crate::GenerationClient`] turns them into displayable text. What remains
//! are the failures that stop an action or the process outright.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StudioError {
    /// `GEMINI_API_KEY` is absent; the service cannot start.
    #[error("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The uploaded bytes could not be read as a PDF.
    #[error("Failed to extract text from PDF: {0}")]
    Extraction(String),

    /// An action other than `continue` arrived before the splash screen was dismissed.
    #[error("Press continue on the splash screen first")]
    SplashActive,

    #[error("Session {0} not found")]
    SessionNotFound(Uuid),
}

pub type StudioResult<T> = std::result::Result<T, StudioError>;
