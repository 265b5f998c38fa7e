//! URL content extractor
//!
//! Fetches a page over HTTP(S) and reduces it to visible main-content text.

use crate::client::ExtractOptions;
use crate::error::ExtractError;
use crate::html::html_to_text;
use crate::DEFAULT_USER_AGENT;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use tracing::{debug, error};
use url::Url;

/// Accept header sent with page fetches
const ACCEPT_HTML: &str = "text/html, application/xhtml+xml, text/plain;q=0.9, */*;q=0.8";

/// Fetch a URL and return its cleaned visible text
///
/// Every failure surfaces as [`ExtractError::Fetch`]; the underlying
/// cause is logged here and kept out of the user-facing message.
pub async fn extract_from_url(url: &str, options: &ExtractOptions) -> Result<String, ExtractError> {
    match fetch_html(url, options).await {
        Ok(html) => {
            let text = html_to_text(&html);
            debug!(url = %url, chars = text.chars().count(), "Extracted URL content");
            Ok(text)
        }
        Err(err) => {
            error!(
                url = %url,
                error = %err,
                detail = err.detail().unwrap_or_default(),
                "Error fetching or parsing URL"
            );
            Err(err)
        }
    }
}

async fn fetch_html(url: &str, options: &ExtractOptions) -> Result<String, ExtractError> {
    validate_url(url, options)?;

    // Build headers
    let mut headers = HeaderMap::new();
    let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
    );
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

    // Build client
    let client = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(options.fetch_timeout)
        .timeout(options.fetch_timeout)
        .build()
        .map_err(ExtractError::ClientBuild)?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(ExtractError::from_reqwest)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ExtractError::fetch(format!(
            "Failed to fetch URL: {}",
            status.canonical_reason().unwrap_or(status.as_str())
        )));
    }

    let body = read_body_capped(response, options.max_body_bytes).await?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Check scheme and allow/block prefix lists before any network access
fn validate_url(url: &str, options: &ExtractOptions) -> Result<Url, ExtractError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ExtractError::fetch(
            "Invalid URL: must start with http:// or https://",
        ));
    }

    let parsed = Url::parse(url).map_err(|e| ExtractError::fetch(format!("Invalid URL: {}", e)))?;

    if !options.allow_prefixes.is_empty()
        && !options
            .allow_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix))
    {
        return Err(ExtractError::fetch("Blocked URL: prefix not allowed"));
    }

    if options
        .block_prefixes
        .iter()
        .any(|prefix| url.starts_with(prefix))
    {
        return Err(ExtractError::fetch("Blocked URL: prefix not allowed"));
    }

    Ok(parsed)
}

/// Read the response body, failing once it grows past `max_bytes`
async fn read_body_capped(
    response: reqwest::Response,
    max_bytes: usize,
) -> Result<Bytes, ExtractError> {
    if let Some(len) = response.content_length() {
        if len > max_bytes as u64 {
            return Err(ExtractError::fetch(format!(
                "Response body of {} bytes exceeds limit of {} bytes",
                len, max_bytes
            )));
        }
    }

    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ExtractError::from_reqwest)?;
        if body.len() + chunk.len() > max_bytes {
            return Err(ExtractError::fetch(format!(
                "Response body exceeds limit of {} bytes",
                max_bytes
            )));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(Bytes::from(body))
}
