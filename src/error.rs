//! Error types for the form builder.
//!
//! This module defines all error types that can occur while loading a form
//! description, resolving themes and fonts, and rendering a form to PDF.

/// Result type alias for form builder operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or rendering a form.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document backend rejected an operation (unembeddable image,
    /// unencodable text, serialization failure, ...)
    #[error("{operation} failed: {reason}")]
    CapabilityFailure {
        /// Backend operation that failed (e.g. "embed image")
        operation: &'static str,
        /// Backend-provided description
        reason: String,
    },

    /// Render was requested for a form without elements
    #[error("Cannot render a form with no elements")]
    EmptyDocument,

    /// Unrecognized theme identifier
    #[error("Unknown theme: '{0}'")]
    InvalidThemeKind(String),

    /// Unrecognized font identifier
    #[error("Unknown font style: '{0}'")]
    InvalidFontKind(String),

    /// Unrecognized element type name
    #[error("Unknown element type: '{0}'")]
    InvalidElementKind(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON form description
    #[error("Invalid form description: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a [`Error::CapabilityFailure`] for the named backend operation.
    pub fn capability(operation: &'static str, reason: impl std::fmt::Display) -> Self {
        Error::CapabilityFailure {
            operation,
            reason: reason.to_string(),
        }
    }

    /// Whether this error originated in the document backend.
    pub fn is_capability_failure(&self) -> bool {
        matches!(self, Error::CapabilityFailure { .. })
    }

    /// The error's own description, without the operation prefix for
    /// backend failures. Empty when the backend gave no reason.
    pub fn detail(&self) -> String {
        match self {
            Error::CapabilityFailure { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

/// Convert a render failure into the message shown to the operator.
///
/// Failures that carry a description are quoted; failures without one get a
/// generic message.
pub fn generation_failure_message(err: &Error) -> String {
    let detail = err.detail();
    if detail.trim().is_empty() {
        "An unknown error occurred while generating the PDF.".to_string()
    } else {
        format!("An error occurred while generating the PDF: {}", detail)
    }
}

/// Convert a failure of the save step into the message shown to the operator.
pub fn download_failure_message(err: &Error) -> String {
    let detail = err.detail();
    if detail.trim().is_empty() {
        "An unknown error occurred while downloading the PDF. Please try again.".to_string()
    } else {
        format!("An error occurred while downloading the PDF: {}. Please try again.", detail)
    }
}
