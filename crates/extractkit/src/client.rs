//! Entry points for ExtractKit
//!
//! This module provides the main entry points for extracting and combining
//! input text. The per-source logic lives in the [`extractors`](crate::extractors)
//! module and the ordering/truncation policy in [`combine`](crate::combine).

use crate::combine;
use crate::error::ExtractError;
use crate::types::{ExtractRequest, ExtractResponse};
use std::path::PathBuf;
use std::time::Duration;

/// Default ceiling on combined output, in characters
pub const DEFAULT_MAX_CHARS: usize = 15_000;

/// Default timeout for the URL fetch (connect + full body)
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default cap on fetched response bodies
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Extraction options that can be configured via tool builder
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Allow list of URL prefixes
    pub allow_prefixes: Vec<String>,
    /// Block list of URL prefixes
    pub block_prefixes: Vec<String>,
    /// Ceiling on combined output in characters; `None` disables truncation
    pub max_chars: Option<usize>,
    /// Timeout for the URL fetch
    pub fetch_timeout: Duration,
    /// Maximum fetched body size in bytes
    pub max_body_bytes: usize,
    /// Uploads larger than this many bytes are staged on disk before parsing
    pub stage_threshold: Option<usize>,
    /// Directory for staged uploads (system temp dir if unset)
    pub stage_dir: Option<PathBuf>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            allow_prefixes: Vec::new(),
            block_prefixes: Vec::new(),
            max_chars: Some(DEFAULT_MAX_CHARS),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            stage_threshold: None,
            stage_dir: None,
        }
    }
}

/// Extract and combine all sources of a request
///
/// Uses default options: 15,000 character ceiling, 10 second fetch timeout.
/// For custom options, use [`extract_with_options`].
pub async fn extract(req: ExtractRequest) -> Result<ExtractResponse, ExtractError> {
    extract_with_options(req, ExtractOptions::default()).await
}

/// Extract and combine all sources of a request with custom options
pub async fn extract_with_options(
    req: ExtractRequest,
    options: ExtractOptions,
) -> Result<ExtractResponse, ExtractError> {
    // Validate early
    if req.is_empty() {
        return Err(ExtractError::NoInputProvided);
    }

    let pieces = combine::extract_sources(&req, &options).await?;
    combine::combine_texts(&pieces, options.max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileBlob;

    #[tokio::test]
    async fn test_extract_no_input() {
        let result = extract(ExtractRequest::new()).await;
        assert!(matches!(result, Err(ExtractError::NoInputProvided)));
    }

    #[tokio::test]
    async fn test_extract_blank_input() {
        let req = ExtractRequest::new().text("  \n ").url("   ");
        let result = extract(req).await;
        assert!(matches!(result, Err(ExtractError::NoInputProvided)));
    }

    #[tokio::test]
    async fn test_extract_text_and_file() {
        let req = ExtractRequest::new()
            .text("Pasted text")
            .file(FileBlob::new("File text", "text/plain").filename("notes.txt"));
        let resp = extract(req).await.unwrap();
        assert_eq!(resp.text, "Pasted text\n\nFile text");
        assert_eq!(resp.char_count, resp.text.chars().count());
        assert!(resp.truncated.is_none());
    }

    #[tokio::test]
    async fn test_extract_invalid_url_scheme() {
        let req = ExtractRequest::new().text("ok").url("ftp://example.com/file.txt");
        let result = extract(req).await;
        match result {
            Err(err @ ExtractError::Fetch { .. }) => {
                assert!(err.detail().unwrap().contains("http:// or https://"));
            }
            other => panic!("expected fetch error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_options_default() {
        let options = ExtractOptions::default();
        assert!(options.user_agent.is_none());
        assert!(options.allow_prefixes.is_empty());
        assert!(options.block_prefixes.is_empty());
        assert_eq!(options.max_chars, Some(15_000));
        assert_eq!(options.fetch_timeout, Duration::from_secs(10));
        assert!(options.stage_threshold.is_none());
    }
}
