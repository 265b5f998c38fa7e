//! Per-source text extractors
//!
//! Design: one extractor per input source. Web pages go through
//! [`extract_from_url`]; uploads go through [`extract_from_file`], which
//! dispatches on [`FileKind`](crate::types::FileKind) to the PDF, DOCX or
//! plain text parser. Raw text needs no extraction.

pub mod docx;
mod file;
pub mod pdf;
mod url;

pub use file::{extract_from_file, parse_bytes};
pub use self::url::extract_from_url;
