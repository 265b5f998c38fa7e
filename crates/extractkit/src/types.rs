//! Core types for ExtractKit

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input source, in the fixed order sources are combined
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Raw text pasted by the user
    Text,
    /// Text extracted from a fetched web page
    Url,
    /// Text extracted from an uploaded document
    File,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Text => write!(f, "text"),
            SourceKind::Url => write!(f, "url"),
            SourceKind::File => write!(f, "file"),
        }
    }
}

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Portable Document Format
    Pdf,
    /// Office Open XML wordprocessing document
    Docx,
    /// UTF-8 plain text
    PlainText,
}

impl FileKind {
    pub const PDF_CONTENT_TYPE: &'static str = "application/pdf";
    pub const DOCX_CONTENT_TYPE: &'static str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
    pub const PLAIN_TEXT_CONTENT_TYPE: &'static str = "text/plain";

    /// Resolve a declared content type
    ///
    /// Only the MIME essence is compared, so `text/plain; charset=utf-8`
    /// resolves to [`FileKind::PlainText`]. Returns `None` for anything
    /// outside the supported set.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            Self::PDF_CONTENT_TYPE => Some(FileKind::Pdf),
            Self::DOCX_CONTENT_TYPE => Some(FileKind::Docx),
            Self::PLAIN_TEXT_CONTENT_TYPE => Some(FileKind::PlainText),
            _ => None,
        }
    }

    /// Guess the kind from a file extension (without the dot)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "docx" => Some(FileKind::Docx),
            "txt" | "text" => Some(FileKind::PlainText),
            _ => None,
        }
    }

    /// Canonical content type for this kind
    pub fn content_type(&self) -> &'static str {
        match self {
            FileKind::Pdf => Self::PDF_CONTENT_TYPE,
            FileKind::Docx => Self::DOCX_CONTENT_TYPE,
            FileKind::PlainText => Self::PLAIN_TEXT_CONTENT_TYPE,
        }
    }

    /// File suffix used when staging uploads on disk
    pub fn suffix(&self) -> &'static str {
        match self {
            FileKind::Pdf => ".pdf",
            FileKind::Docx => ".docx",
            FileKind::PlainText => ".txt",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Pdf => write!(f, "PDF"),
            FileKind::Docx => write!(f, "DOCX"),
            FileKind::PlainText => write!(f, "plain text"),
        }
    }
}

/// Uploaded document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileBlob {
    /// Raw file bytes
    pub bytes: Vec<u8>,

    /// Declared content type (e.g. "application/pdf")
    pub content_type: String,

    /// Original filename, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl FileBlob {
    /// Create a blob with bytes and declared content type
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
            filename: None,
        }
    }

    /// Set the original filename
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Request to extract and combine input text
///
/// Any combination of the three sources may be supplied. Blank `text`
/// and `url` values count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExtractRequest {
    /// Raw text to include as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Web page to fetch (must be http:// or https://)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Uploaded document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileBlob>,
}

impl ExtractRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Set raw text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set uploaded file
    pub fn file(mut self, file: FileBlob) -> Self {
        self.file = Some(file);
        self
    }

    /// Raw text, if present and not blank
    pub fn effective_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// URL trimmed, if present and not blank
    pub fn effective_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    /// True when no source is supplied
    pub fn is_empty(&self) -> bool {
        self.effective_text().is_none() && self.effective_url().is_none() && self.file.is_none()
    }
}

/// Combined text handed to the summarization stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractResponse {
    /// Combined, possibly truncated text (never empty)
    pub text: String,

    /// Sources that contributed text, in combination order
    pub sources: Vec<SourceKind>,

    /// Length of `text` in characters
    pub char_count: usize,

    /// True if the ceiling cut the combined text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
}
