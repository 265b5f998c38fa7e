//! Input combiner and truncator
//!
//! Runs the extractor for every supplied source, joins the results in the
//! fixed order text → URL → file, and applies the character ceiling.

use crate::client::ExtractOptions;
use crate::error::ExtractError;
use crate::extractors::{extract_from_file, extract_from_url};
use crate::types::{ExtractRequest, ExtractResponse, SourceKind};
use tracing::debug;

/// Separator placed between pieces from different sources
pub const SEPARATOR: &str = "\n\n";

/// Extract text from every supplied source
///
/// The URL fetch and file parse run concurrently; pieces are returned in
/// source order regardless of completion order. Any failure aborts the
/// whole request, and when several sources fail the earliest one in
/// source order is reported.
pub async fn extract_sources(
    request: &ExtractRequest,
    options: &ExtractOptions,
) -> Result<Vec<(SourceKind, String)>, ExtractError> {
    if request.is_empty() {
        return Err(ExtractError::NoInputProvided);
    }

    let url_task = async {
        match request.effective_url() {
            Some(url) => extract_from_url(url, options).await.map(Some),
            None => Ok(None),
        }
    };
    let file_task = async {
        match &request.file {
            Some(file) => extract_from_file(file, options).await.map(Some),
            None => Ok(None),
        }
    };
    let (url_text, file_text) = tokio::join!(url_task, file_task);
    let url_text = url_text?;
    let file_text = file_text?;

    let mut pieces = Vec::with_capacity(3);
    if let Some(text) = request.effective_text() {
        pieces.push((SourceKind::Text, text.to_string()));
    }
    if let Some(text) = url_text {
        pieces.push((SourceKind::Url, text));
    }
    if let Some(text) = file_text {
        pieces.push((SourceKind::File, text));
    }
    Ok(pieces)
}

/// Join extracted pieces and apply the ceiling
///
/// Blank pieces are dropped, the rest are joined with a blank line and the
/// result is trimmed. A result longer than `max_chars` characters is cut to
/// exactly `max_chars`; `None` means no ceiling.
pub fn combine_texts(
    pieces: &[(SourceKind, String)],
    max_chars: Option<usize>,
) -> Result<ExtractResponse, ExtractError> {
    let mut sources = Vec::with_capacity(pieces.len());
    let mut combined = String::new();

    for (source, text) in pieces {
        if text.trim().is_empty() {
            debug!(source = %source, "Source produced no text");
            continue;
        }
        if !combined.is_empty() {
            combined.push_str(SEPARATOR);
        }
        combined.push_str(text);
        sources.push(*source);
    }

    let combined = combined.trim();
    if combined.is_empty() {
        return Err(ExtractError::EmptyExtraction);
    }

    let (text, truncated) = match max_chars {
        Some(limit) => {
            let cut = truncate_chars(combined, limit);
            (cut, cut.len() < combined.len())
        }
        None => (combined, false),
    };

    let char_count = text.chars().count();
    if truncated {
        debug!(
            from = combined.chars().count(),
            to = char_count,
            "Truncated combined input"
        );
    }

    Ok(ExtractResponse {
        text: text.to_string(),
        sources,
        char_count,
        truncated: if truncated { Some(true) } else { None },
    })
}

/// First `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileBlob;

    fn pieces(items: &[(SourceKind, &str)]) -> Vec<(SourceKind, String)> {
        items
            .iter()
            .map(|(source, text)| (*source, text.to_string()))
            .collect()
    }

    #[test]
    fn test_truncate_chars_law() {
        let text = "abcdefghij";
        for limit in 0..15 {
            let cut = truncate_chars(text, limit);
            if text.len() > limit {
                assert_eq!(cut.chars().count(), limit);
            } else {
                assert_eq!(cut, text);
            }
        }
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        let text = "héllo wörld";
        assert_eq!(truncate_chars(text, 2), "hé");
        assert_eq!(truncate_chars(text, 8), "héllo wö");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
    }

    #[test]
    fn test_combine_order_and_separator() {
        let resp = combine_texts(
            &pieces(&[
                (SourceKind::Text, "raw"),
                (SourceKind::Url, "page"),
                (SourceKind::File, "doc"),
            ]),
            None,
        )
        .unwrap();
        assert_eq!(resp.text, "raw\n\npage\n\ndoc");
        assert_eq!(
            resp.sources,
            vec![SourceKind::Text, SourceKind::Url, SourceKind::File]
        );
        assert_eq!(resp.char_count, 14);
        assert!(resp.truncated.is_none());
    }

    #[test]
    fn test_combine_trims_and_skips_blank_pieces() {
        let resp = combine_texts(
            &pieces(&[
                (SourceKind::Text, "  raw  "),
                (SourceKind::Url, "   "),
                (SourceKind::File, "doc\n"),
            ]),
            None,
        )
        .unwrap();
        assert_eq!(resp.text, "raw  \n\ndoc");
        assert_eq!(resp.sources, vec![SourceKind::Text, SourceKind::File]);
    }

    #[test]
    fn test_combine_all_blank_is_empty_extraction() {
        let result = combine_texts(
            &pieces(&[(SourceKind::Url, " \n "), (SourceKind::File, "")]),
            Some(100),
        );
        assert!(matches!(result, Err(ExtractError::EmptyExtraction)));
        assert!(matches!(
            combine_texts(&[], None),
            Err(ExtractError::EmptyExtraction)
        ));
    }

    #[test]
    fn test_combine_truncates_to_exact_ceiling() {
        let long = "x".repeat(20_000);
        let items = pieces(&[(SourceKind::Text, long.as_str())]);
        let resp = combine_texts(&items, Some(15_000)).unwrap();
        assert_eq!(resp.text.chars().count(), 15_000);
        assert_eq!(resp.char_count, 15_000);
        assert_eq!(resp.truncated, Some(true));
    }

    #[test]
    fn test_combine_below_ceiling_unchanged() {
        let items = pieces(&[(SourceKind::Text, "short"), (SourceKind::File, "text")]);
        let limited = combine_texts(&items, Some(13)).unwrap();
        let unlimited = combine_texts(&items, None).unwrap();
        assert_eq!(limited, unlimited);
        assert_eq!(limited.text, "short\n\ntext");
        assert!(limited.truncated.is_none());
    }

    #[test]
    fn test_combine_cut_can_split_separator() {
        let items = pieces(&[(SourceKind::Text, "abc"), (SourceKind::File, "def")]);
        let resp = combine_texts(&items, Some(4)).unwrap();
        assert_eq!(resp.text, "abc\n");
        assert_eq!(resp.char_count, 4);
    }

    #[tokio::test]
    async fn test_extract_sources_requires_input() {
        let result = extract_sources(&ExtractRequest::new(), &ExtractOptions::default()).await;
        assert!(matches!(result, Err(ExtractError::NoInputProvided)));
    }

    #[tokio::test]
    async fn test_extract_sources_all_or_nothing() {
        let req = ExtractRequest::new()
            .text("fine")
            .file(FileBlob::new(vec![1, 2, 3], "image/png"));
        let result = extract_sources(&req, &ExtractOptions::default()).await;
        assert!(matches!(result, Err(ExtractError::UnsupportedFileType(_))));
    }

    #[tokio::test]
    async fn test_extract_sources_earliest_error_wins() {
        let req = ExtractRequest::new()
            .url("ftp://example.com")
            .file(FileBlob::new(vec![1, 2, 3], "image/png"));
        let result = extract_sources(&req, &ExtractOptions::default()).await;
        assert!(matches!(result, Err(ExtractError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_extract_sources_deterministic() {
        let req = ExtractRequest::new()
            .text("Intro")
            .file(FileBlob::new("Body of the file", "text/plain"));
        let options = ExtractOptions::default();

        let first = combine_texts(&extract_sources(&req, &options).await.unwrap(), Some(15_000));
        let second = combine_texts(&extract_sources(&req, &options).await.unwrap(), Some(15_000));
        assert_eq!(first.unwrap(), second.unwrap());
    }
}
