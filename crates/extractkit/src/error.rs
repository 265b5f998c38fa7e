//! Error types for ExtractKit

use crate::types::FileKind;
use thiserror::Error;

/// Errors that can occur while extracting and combining input text
///
/// `Display` output is safe to show to end users. Technical detail for
/// fetch and parse failures is kept out of the message and exposed through
/// [`ExtractError::detail`] for logging only.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// None of text, URL or file was supplied
    #[error("No input provided: supply text, a URL, or a file")]
    NoInputProvided,

    /// URL could not be fetched (invalid, blocked, unreachable, non-2xx, timeout)
    #[error("Could not retrieve content from the provided URL.")]
    Fetch { detail: String },

    /// Declared file content type is not one of the supported formats
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Document bytes could not be parsed or decoded
    #[error("Failed to parse {kind} content")]
    Parse { kind: FileKind, detail: String },

    /// Every supplied source produced blank text
    #[error("No text could be extracted from the provided input")]
    EmptyExtraction,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// Failed to stage an upload on disk
    #[error("Failed to stage uploaded file")]
    Staging(#[source] std::io::Error),

    /// Blocking parse task panicked or was cancelled
    #[error("Extraction task failed")]
    Task(#[source] tokio::task::JoinError),
}

impl ExtractError {
    /// Create a fetch error with internal detail
    pub fn fetch(detail: impl Into<String>) -> Self {
        ExtractError::Fetch {
            detail: detail.into(),
        }
    }

    /// Create a parse error for the given format
    pub fn parse(kind: FileKind, detail: impl Into<String>) -> Self {
        ExtractError::Parse {
            kind,
            detail: detail.into(),
        }
    }

    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExtractError::fetch(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            ExtractError::fetch(format!("Failed to connect to server: {}", err))
        } else {
            ExtractError::fetch(format!("Request failed: {}", err))
        }
    }

    /// Internal failure detail, for logs only
    pub fn detail(&self) -> Option<&str> {
        match self {
            ExtractError::Fetch { detail } | ExtractError::Parse { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// True when the caller supplied bad or missing input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ExtractError::NoInputProvided
                | ExtractError::UnsupportedFileType(_)
                | ExtractError::EmptyExtraction
        )
    }

    /// HTTP status an API handler should answer with
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ExtractError::NoInputProvided.to_string(),
            "No input provided: supply text, a URL, or a file"
        );
        assert_eq!(
            ExtractError::UnsupportedFileType("image/png".to_string()).to_string(),
            "Unsupported file type: image/png"
        );
        assert_eq!(
            ExtractError::parse(FileKind::Pdf, "bad xref").to_string(),
            "Failed to parse PDF content"
        );
        assert_eq!(
            ExtractError::EmptyExtraction.to_string(),
            "No text could be extracted from the provided input"
        );
    }

    #[test]
    fn test_fetch_message_hides_detail() {
        let err = ExtractError::fetch("Failed to fetch URL: Not Found");
        assert_eq!(
            err.to_string(),
            "Could not retrieve content from the provided URL."
        );
        assert_eq!(err.detail(), Some("Failed to fetch URL: Not Found"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ExtractError::NoInputProvided.status_code(), 400);
        assert_eq!(
            ExtractError::UnsupportedFileType("image/png".to_string()).status_code(),
            400
        );
        assert_eq!(ExtractError::EmptyExtraction.status_code(), 400);
        assert_eq!(ExtractError::fetch("timeout").status_code(), 500);
        assert_eq!(
            ExtractError::parse(FileKind::PlainText, "invalid utf-8").status_code(),
            500
        );
    }
}
