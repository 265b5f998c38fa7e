//! PDF text extraction
//!
//! Pages are read in page order 1..N. Within a page the text runs are
//! joined by single spaces; pages are joined by newlines. No layout
//! reconstruction is attempted.

use crate::error::ExtractError;
use crate::types::FileKind;
use lopdf::content::Content;
use lopdf::{Document, Encoding, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Text-showing operators: `Tj`, `TJ`, `'` and `"`
const SHOW_TEXT_OPERATORS: &[&str] = &["Tj", "TJ", "'", "\""];

/// Extract text from PDF bytes held in memory
///
/// Empty input yields an empty string.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    if bytes.is_empty() {
        return Ok(String::new());
    }

    let document = Document::load_mem(bytes)
        .map_err(|e| ExtractError::parse(FileKind::Pdf, format!("Failed to load PDF: {}", e)))?;
    document_text(&document)
}

/// Extract text from a PDF on disk
pub fn extract_text_from_path(path: &Path) -> Result<String, ExtractError> {
    let document = Document::load(path)
        .map_err(|e| ExtractError::parse(FileKind::Pdf, format!("Failed to load PDF: {}", e)))?;
    document_text(&document)
}

/// Text of every page, in page order
///
/// A page that cannot be read contributes empty text. A document where no
/// page can be read is a parse error.
fn document_text(document: &Document) -> Result<String, ExtractError> {
    // BTreeMap keyed by page number, so iteration is in page order
    let pages = document.get_pages();
    debug!(pages = pages.len(), "Extracting PDF text");

    let mut page_texts = Vec::with_capacity(pages.len());
    let mut last_error = None;
    let mut failed = 0;
    for (page_number, page_id) in &pages {
        match page_text(document, *page_id) {
            Ok(text) => page_texts.push(text),
            Err(e) => {
                warn!(page = *page_number, error = %e, "Could not extract text from PDF page");
                failed += 1;
                last_error = Some(e);
                page_texts.push(String::new());
            }
        }
    }

    if let Some(e) = last_error {
        if failed == pages.len() {
            return Err(ExtractError::parse(
                FileKind::Pdf,
                format!("No readable pages: {}", e),
            ));
        }
    }

    Ok(page_texts.join("\n"))
}

/// Text runs of one page, each decoded with its font encoding and joined
/// by single spaces
fn page_text(document: &Document, page_id: ObjectId) -> lopdf::Result<String> {
    let encodings = document
        .get_page_fonts(page_id)?
        .into_iter()
        .map(|(name, font)| font.get_font_encoding(document).map(|encoding| (name, encoding)))
        .collect::<lopdf::Result<BTreeMap<Vec<u8>, Encoding>>>()?;

    let data = document.get_page_content(page_id)?;
    let content = Content::decode(&data)?;
    if content.operations.is_empty() && !data.iter().all(u8::is_ascii_whitespace) {
        return Err(lopdf::Error::ContentDecode);
    }

    let mut runs = Vec::new();
    let mut encoding = None;
    for operation in &content.operations {
        let operator = operation.operator.as_str();
        if operator == "Tf" {
            encoding = operation
                .operands
                .first()
                .and_then(|font| font.as_name().ok())
                .and_then(|font| encodings.get(font));
            continue;
        }
        if !SHOW_TEXT_OPERATORS.contains(&operator) {
            continue;
        }
        let Some(encoding) = encoding else {
            debug!(operator, "Skipping text run without a font");
            continue;
        };

        // `"` carries word and character spacing ahead of the string
        let operands = if operator == "\"" {
            operation.operands.get(2..).unwrap_or_default()
        } else {
            &operation.operands[..]
        };
        let mut run = String::new();
        collect_run(&mut run, encoding, operands)?;
        runs.push(run);
    }

    Ok(join_text_runs(&runs.join(" ")))
}

/// Decode the strings of one text-showing operation
///
/// Large negative kerning inside a `TJ` array marks a word gap.
fn collect_run(run: &mut String, encoding: &Encoding, operands: &[Object]) -> lopdf::Result<()> {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => run.push_str(&Document::decode_text(encoding, bytes)?),
            Object::Array(items) => collect_run(run, encoding, items)?,
            Object::Integer(gap) if *gap < -100 => run.push(' '),
            Object::Real(gap) if *gap < -100.0 => run.push(' '),
            _ => {}
        }
    }
    Ok(())
}

/// Normalize joined runs to single spaces
fn join_text_runs(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
