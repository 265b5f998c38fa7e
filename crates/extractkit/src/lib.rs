//! ExtractKit - text extraction pipeline for LLM summarization
//!
//! This crate turns user input into one plain-text string ready for a
//! summarization prompt. Input can be raw text, a web page URL, an uploaded
//! document, or any combination of the three.
//!
//! ## Pipeline
//!
//! - URL: fetched over HTTP(S), reduced to main-content text by [`html_to_text`]
//! - File: dispatched on [`FileKind`] to the PDF, DOCX or plain text parser
//! - Combine: pieces joined in the order text → URL → file, then cut to the
//!   character ceiling (15,000 by default)
//!
//! Failure of any source fails the whole request.

pub mod client;
pub mod combine;
mod error;
pub mod extractors;
mod html;
mod staging;
mod tool;
mod types;

pub use client::{
    extract, extract_with_options, ExtractOptions, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_MAX_CHARS,
};
pub use combine::{combine_texts, truncate_chars};
pub use error::ExtractError;
pub use extractors::{extract_from_file, extract_from_url};
pub use html::{collapse_whitespace, html_to_text};
pub use staging::StagedFile;
pub use tool::{Tool, ToolBuilder, ToolStatus};
pub use types::{ExtractRequest, ExtractResponse, FileBlob, FileKind, SourceKind};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "Everruns ExtractKit/1.0";

/// Tool description for LLM consumption
pub const TOOL_DESCRIPTION: &str = r#"Extracts plain text from pasted text, a web page URL, or an uploaded document.

- Web pages: main content only, navigation and scripts removed
- Documents: PDF, DOCX and UTF-8 plain text
- Combined output is truncated to a character ceiling"#;

/// Extended documentation for LLM consumption (llmtxt)
pub const TOOL_LLMTXT: &str = r#"# ExtractKit Tool

Extracts plain text from one or more input sources and combines it into a
single string for summarization.

## Capabilities
- Fetch a web page and keep only its main content
- Extract text from PDF documents, page by page
- Extract raw text from DOCX documents
- Decode UTF-8 plain text uploads
- Combine sources in a fixed order with a character ceiling

## Input Parameters
- `text` (optional): Raw text, included as-is
- `url` (optional): Web page to fetch (must be http:// or https://)
- `file` (optional): Uploaded document
  - `bytes`: File content
  - `content_type`: `application/pdf`,
    `application/vnd.openxmlformats-officedocument.wordprocessingml.document`
    or `text/plain`
  - `filename` (optional): Original filename, informational only

At least one of `text`, `url` or `file` is required.

## Output Fields
- `text`: Combined text (text, then URL content, then file content,
  separated by blank lines)
- `sources`: Sources that contributed text, in order
- `char_count`: Length of `text` in characters
- `truncated`: True if the ceiling cut the text

## Examples

### Summarize a web page
```json
{"url": "https://example.com/article"}
```

### Pasted text plus a page
```json
{"text": "My notes on the topic", "url": "https://example.com/article"}
```

## Error Handling
- No input: request is rejected
- Unsupported file type: request is rejected with the offending type
- Unreachable URL or non-success status: generic retrieval error
- Malformed PDF/DOCX or invalid UTF-8: generic parse error
- A failure in any source fails the whole request
"#;
