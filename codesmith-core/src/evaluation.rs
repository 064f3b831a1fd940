//! Evaluation verdicts - the model's critique of a candidate solution

use crate::error::{self, Result};
use crate::extract::extract_json;
use serde::{Deserialize, Serialize};

/// The model's verdict on a candidate solution and its output.
///
/// `success: true` terminates the iteration loop; otherwise the feedback is
/// carried into the next attempt's reasoning prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub success: bool,
    pub feedback: Feedback,
}

/// Technical feedback attached to a verdict
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(default)]
    pub technical_analysis: String,
    #[serde(default)]
    pub failure_points: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub performance_notes: String,
    #[serde(default)]
    pub edge_cases: Vec<String>,
}

impl Evaluation {
    /// Parse a verdict from model output (handles markdown fences)
    pub fn parse(content: &str) -> Result<Self> {
        let json = extract_json(content);
        serde_json::from_str(json).map_err(|e| {
            error::parse_error(format!("invalid evaluation verdict: {}", e))
                .with_operation("evaluation::parse")
                .with_context("content_len", json.len().to_string())
        })
    }

    /// Parse a verdict, degrading to a failed-attempt fallback when the
    /// model's output is not valid JSON.
    pub fn parse_or_fallback(content: &str) -> Self {
        Self::parse(content).unwrap_or_else(|_| Self::unparsable())
    }

    /// The synthetic verdict used when the model's response cannot be parsed
    pub fn unparsable() -> Self {
        Self {
            success: false,
            feedback: Feedback {
                technical_analysis: "Failed to parse evaluation response".into(),
                failure_points: vec!["Evaluation response parsing error".into()],
                suggestions: vec!["Check the raw response format".into()],
                performance_notes: "N/A".into(),
                edge_cases: Vec::new(),
            },
        }
    }
}

impl Feedback {
    /// Serialized form carried into the next attempt's reasoning prompt
    pub fn to_context(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
