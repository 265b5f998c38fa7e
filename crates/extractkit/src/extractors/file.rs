//! File content extractor
//!
//! Dispatches an upload on its declared content type. The supported set is
//! closed: see [`FileKind`].

use super::{docx, pdf};
use crate::client::ExtractOptions;
use crate::error::ExtractError;
use crate::staging::StagedFile;
use crate::types::{FileBlob, FileKind};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Extract plain text from an uploaded file
///
/// Parsing runs on the blocking thread pool. Uploads larger than
/// `options.stage_threshold` are written to a temporary file first and
/// parsed from disk; the file is removed before this returns.
pub async fn extract_from_file(
    blob: &FileBlob,
    options: &ExtractOptions,
) -> Result<String, ExtractError> {
    let Some(kind) = FileKind::from_content_type(&blob.content_type) else {
        warn!(
            content_type = %blob.content_type,
            filename = blob.filename.as_deref().unwrap_or_default(),
            "Unsupported file type"
        );
        return Err(ExtractError::UnsupportedFileType(blob.content_type.clone()));
    };

    let staged = options
        .stage_threshold
        .is_some_and(|threshold| blob.bytes.len() > threshold);
    debug!(
        kind = %kind,
        size = blob.bytes.len(),
        staged,
        filename = blob.filename.as_deref().unwrap_or_default(),
        "Extracting file content"
    );

    let bytes = blob.bytes.clone();
    let stage_dir = options.stage_dir.clone();
    let result = tokio::task::spawn_blocking(move || {
        if staged {
            parse_staged(kind, &bytes, stage_dir)
        } else {
            parse_bytes(kind, &bytes)
        }
    })
    .await
    .map_err(ExtractError::Task)?;

    if let Err(ref err) = result {
        error!(
            kind = %kind,
            error = %err,
            detail = err.detail().unwrap_or_default(),
            "Error parsing file"
        );
    }
    result
}

/// Parse in-memory bytes of a known kind
pub fn parse_bytes(kind: FileKind, bytes: &[u8]) -> Result<String, ExtractError> {
    match kind {
        FileKind::Pdf => pdf::extract_text(bytes),
        FileKind::Docx => docx::extract_text(bytes),
        FileKind::PlainText => decode_utf8(bytes),
    }
}

fn parse_staged(
    kind: FileKind,
    bytes: &[u8],
    dir: Option<PathBuf>,
) -> Result<String, ExtractError> {
    let staged = StagedFile::write(bytes, kind.suffix(), dir.as_deref())
        .map_err(ExtractError::Staging)?;
    parse_path(kind, staged.path())
}

fn parse_path(kind: FileKind, path: &Path) -> Result<String, ExtractError> {
    match kind {
        FileKind::Pdf => {
            if std::fs::metadata(path).map_err(ExtractError::Staging)?.len() == 0 {
                return Ok(String::new());
            }
            pdf::extract_text_from_path(path)
        }
        FileKind::Docx | FileKind::PlainText => {
            let bytes = std::fs::read(path).map_err(ExtractError::Staging)?;
            parse_bytes(kind, &bytes)
        }
    }
}

/// Strict UTF-8 decode; invalid sequences are an error, not replaced
fn decode_utf8(bytes: &[u8]) -> Result<String, ExtractError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| ExtractError::parse(FileKind::PlainText, format!("Invalid UTF-8: {}", e)))
}
