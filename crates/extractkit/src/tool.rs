//! Tool builder and contract for ExtractKit

use crate::client::{extract_with_options, ExtractOptions};
use crate::combine::{combine_texts, extract_sources};
use crate::error::ExtractError;
use crate::types::{ExtractRequest, ExtractResponse};
use crate::{TOOL_DESCRIPTION, TOOL_LLMTXT};
use schemars::schema_for;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Status update during tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolStatus {
    /// Current phase ("validate", "extract", "combine", "complete")
    pub phase: String,
    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Estimated completion percentage (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_complete: Option<f32>,
}

impl ToolStatus {
    /// Create a new status with phase
    pub fn new(phase: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            message: None,
            percent_complete: None,
        }
    }

    /// Set message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set completion percentage
    pub fn with_percent(mut self, percent: f32) -> Self {
        self.percent_complete = Some(percent);
        self
    }
}

/// Builder for configuring the ExtractKit tool
#[derive(Debug, Clone, Default)]
pub struct ToolBuilder {
    options: ExtractOptions,
}

impl ToolBuilder {
    /// Create a new tool builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ceiling on combined output, in characters
    pub fn max_chars(mut self, max_chars: usize) -> Self {
        self.options.max_chars = Some(max_chars);
        self
    }

    /// Disable truncation of combined output
    pub fn unlimited(mut self) -> Self {
        self.options.max_chars = None;
        self
    }

    /// Set the URL fetch timeout
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.options.fetch_timeout = timeout;
        self
    }

    /// Set the maximum fetched body size
    pub fn max_body_bytes(mut self, max_bytes: usize) -> Self {
        self.options.max_body_bytes = max_bytes;
        self
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.options.user_agent = Some(ua.into());
        self
    }

    /// Add URL prefix to allow list
    pub fn allow_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.allow_prefixes.push(prefix.into());
        self
    }

    /// Add URL prefix to block list
    pub fn block_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.block_prefixes.push(prefix.into());
        self
    }

    /// Stage uploads larger than `bytes` on disk before parsing
    pub fn stage_threshold(mut self, bytes: usize) -> Self {
        self.options.stage_threshold = Some(bytes);
        self
    }

    /// Directory for staged uploads
    pub fn stage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.stage_dir = Some(dir.into());
        self
    }

    /// Build the tool
    pub fn build(self) -> Tool {
        Tool {
            options: self.options,
        }
    }
}

/// Configured ExtractKit tool
#[derive(Debug, Clone, Default)]
pub struct Tool {
    options: ExtractOptions,
}

impl Tool {
    /// Create a new tool builder
    pub fn builder() -> ToolBuilder {
        ToolBuilder::new()
    }

    /// Options this tool runs with
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Get tool description
    pub fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }

    /// Get full documentation (llmtxt)
    pub fn llmtxt(&self) -> &'static str {
        TOOL_LLMTXT
    }

    /// Get input schema as JSON
    pub fn input_schema(&self) -> serde_json::Value {
        let schema = schema_for!(ExtractRequest);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Get output schema as JSON
    pub fn output_schema(&self) -> serde_json::Value {
        let schema = schema_for!(ExtractResponse);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Execute the tool with the given request
    pub async fn execute(&self, req: ExtractRequest) -> Result<ExtractResponse, ExtractError> {
        extract_with_options(req, self.options.clone()).await
    }

    /// Execute the tool with status updates
    pub async fn execute_with_status<F>(
        &self,
        req: ExtractRequest,
        mut status_callback: F,
    ) -> Result<ExtractResponse, ExtractError>
    where
        F: FnMut(ToolStatus),
    {
        status_callback(ToolStatus::new("validate").with_percent(0.0));

        if req.is_empty() {
            return Err(ExtractError::NoInputProvided);
        }

        status_callback(ToolStatus::new("extract").with_percent(10.0));

        let pieces = extract_sources(&req, &self.options).await?;

        let sources = pieces
            .iter()
            .map(|(source, _)| source.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        status_callback(
            ToolStatus::new("combine")
                .with_message(format!("Combining {}", sources))
                .with_percent(90.0),
        );

        let result = combine_texts(&pieces, self.options.max_chars);

        status_callback(ToolStatus::new("complete").with_percent(100.0));

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileBlob;

    #[test]
    fn test_tool_builder() {
        let tool = Tool::builder()
            .max_chars(500)
            .fetch_timeout(Duration::from_secs(3))
            .user_agent("TestAgent/1.0")
            .allow_prefix("https://allowed.com")
            .block_prefix("https://blocked.com")
            .stage_threshold(1024)
            .build();

        let options = tool.options();
        assert_eq!(options.max_chars, Some(500));
        assert_eq!(options.fetch_timeout, Duration::from_secs(3));
        assert_eq!(options.user_agent, Some("TestAgent/1.0".to_string()));
        assert_eq!(options.allow_prefixes, vec!["https://allowed.com"]);
        assert_eq!(options.block_prefixes, vec!["https://blocked.com"]);
        assert_eq!(options.stage_threshold, Some(1024));
    }

    #[test]
    fn test_tool_unlimited() {
        let tool = Tool::builder().max_chars(10).unlimited().build();
        assert_eq!(tool.options().max_chars, None);

        let tool = Tool::default();
        assert_eq!(tool.options().max_chars, Some(crate::DEFAULT_MAX_CHARS));
    }

    #[test]
    fn test_tool_description() {
        let tool = Tool::default();
        assert!(!tool.description().is_empty());
        assert!(!tool.llmtxt().is_empty());
    }

    #[test]
    fn test_tool_schemas() {
        let tool = Tool::default();
        let input_schema = tool.input_schema();
        let output_schema = tool.output_schema();

        assert!(input_schema["properties"]["text"].is_object());
        assert!(input_schema["properties"]["url"].is_object());
        assert!(input_schema["properties"]["file"].is_object());

        assert!(output_schema["properties"]["text"].is_object());
        assert!(output_schema["properties"]["sources"].is_object());
    }

    #[tokio::test]
    async fn test_execute_with_status_phases() {
        let tool = Tool::default();
        let req = ExtractRequest::new()
            .text("Pasted")
            .file(FileBlob::new("Uploaded", "text/plain"));

        let mut phases = Vec::new();
        let resp = tool
            .execute_with_status(req, |status| phases.push(status))
            .await
            .unwrap();

        assert_eq!(resp.text, "Pasted\n\nUploaded");
        let names: Vec<&str> = phases.iter().map(|s| s.phase.as_str()).collect();
        assert_eq!(names, vec!["validate", "extract", "combine", "complete"]);
        assert_eq!(phases[2].message.as_deref(), Some("Combining text, file"));
    }

    #[tokio::test]
    async fn test_execute_with_status_no_input() {
        let tool = Tool::default();
        let mut phases = Vec::new();
        let result = tool
            .execute_with_status(ExtractRequest::new(), |status| phases.push(status.phase))
            .await;

        assert!(matches!(result, Err(ExtractError::NoInputProvided)));
        assert_eq!(phases, vec!["validate"]);
    }

    #[test]
    fn test_tool_status() {
        let status = ToolStatus::new("extract")
            .with_message("Fetching URL")
            .with_percent(50.0);

        assert_eq!(status.phase, "extract");
        assert_eq!(status.message, Some("Fetching URL".to_string()));
        assert_eq!(status.percent_complete, Some(50.0));
    }
}
