//! Scoring tools: raw similarity and thresholded grade.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{ToolCallResult, ToolDefinition};
use crate::scoring::Scorer;

/// Parameters for the `similarity` tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityParams {
    /// Target sentence.
    pub reference: String,
    /// Transcribed spoken attempt.
    pub candidate: String,
}

/// Parameters for the `grade` tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeParams {
    pub reference: String,
    pub candidate: String,
    /// Overrides the server's pass threshold for this call.
    #[serde(default)]
    pub threshold: Option<u8>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GradeReport {
    similarity: u8,
    is_correct: bool,
    threshold: u8,
    diff: String,
}

pub fn similarity_definition() -> ToolDefinition {
    ToolDefinition::new(
        "similarity",
        "Similarity percentage (0-100) between a reference sentence and a spoken \
         transcript. Case, punctuation and extra whitespace are ignored.",
        serde_json::json!({
            "type": "object",
            "properties": {
                "reference": {
                    "type": "string",
                    "description": "The correct sentence"
                },
                "candidate": {
                    "type": "string",
                    "description": "The transcribed attempt"
                }
            },
            "required": ["reference", "candidate"]
        }),
    )
}

pub fn grade_definition() -> ToolDefinition {
    ToolDefinition::new(
        "grade",
        "Grade a spoken transcript against a reference sentence. Returns the \
         similarity percentage, whether it reaches the pass threshold, and a word diff.",
        serde_json::json!({
            "type": "object",
            "properties": {
                "reference": {
                    "type": "string",
                    "description": "The correct sentence"
                },
                "candidate": {
                    "type": "string",
                    "description": "The transcribed attempt"
                },
                "threshold": {
                    "type": "integer",
                    "description": "Pass threshold in percent (default: server setting, 70)",
                    "minimum": 0,
                    "maximum": 100
                }
            },
            "required": ["reference", "candidate"]
        }),
    )
}

pub fn similarity(scorer: &Scorer, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: SimilarityParams =
        serde_json::from_value(arguments).context("invalid similarity parameters")?;
    let percent = scorer.similarity(&params.reference, &params.candidate);
    Ok(ToolCallResult::text(percent.to_string()))
}

pub fn grade(scorer: &Scorer, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: GradeParams =
        serde_json::from_value(arguments).context("invalid grade parameters")?;

    let scorer = match params.threshold {
        None => *scorer,
        Some(t) if t <= 100 => Scorer::new(t, scorer.max_chars()),
        Some(t) => {
            return Ok(ToolCallResult::error(format_args!(
                "threshold must be between 0 and 100, got {t}"
            )));
        }
    };
    let grade = scorer.grade(&params.reference, &params.candidate);

    let report = GradeReport {
        similarity: grade.similarity,
        is_correct: grade.is_correct,
        threshold: scorer.threshold(),
        diff: scorer.word_diff(&params.reference, &params.candidate),
    };
    let text = serde_json::to_string_pretty(&report).context("failed to serialize grade")?;
    Ok(ToolCallResult::text(text))
}
