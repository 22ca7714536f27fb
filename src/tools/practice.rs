//! Practice-session tools.
//!
//! The router holds at most one session. `practice_load` starts it; the other
//! tools act on it and report `no practice session loaded` until then.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ToolCallResult, ToolDefinition, ToolRouter};
use crate::error::PracticeError;
use crate::practice::{Advance, Deck, PracticeSession, Sentence};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadParams {
    pub sentences: Vec<Sentence>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerParams {
    /// Transcript produced by the speech recognizer.
    pub transcript: String,
}

/// What the learner currently sees.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView<'a> {
    seq: u32,
    korean: &'a str,
    position: usize,
    total: usize,
    saved_only: bool,
    saved_count: usize,
    is_last: bool,
}

impl<'a> SessionView<'a> {
    fn of(session: &'a PracticeSession) -> Self {
        let current = session.current();
        let (position, total) = session.progress();
        Self {
            seq: current.seq,
            korean: &current.korean,
            position,
            total,
            saved_only: session.is_saved_only(),
            saved_count: session.saved().len(),
            is_last: session.is_last(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnswerReport<'a> {
    you_said: &'a str,
    correct_is: &'a str,
    similarity: u8,
    is_correct: bool,
    diff: String,
}

fn object_schema(properties: &serde_json::Value, required: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn tool_definitions() -> Vec<ToolDefinition> {
    let no_args = object_schema(&serde_json::json!({}), &[]);
    vec![
        ToolDefinition::new(
            "practice_load",
            "Start a practice session over a deck of Korean/English sentence pairs. \
             Replaces any running session.",
            object_schema(
                &serde_json::json!({
                    "sentences": {
                        "type": "array",
                        "description": "Rows with seq, korean, english and optional memorizedOn",
                        "items": {
                            "type": "object",
                            "properties": {
                                "seq": { "type": "integer" },
                                "korean": { "type": "string" },
                                "english": { "type": "string" },
                                "memorizedOn": { "type": "string" }
                            },
                            "required": ["seq", "korean", "english"]
                        }
                    }
                }),
                &["sentences"],
            ),
        ),
        ToolDefinition::new(
            "practice_current",
            "Show the current Korean prompt and progress.",
            no_args.clone(),
        ),
        ToolDefinition::new(
            "practice_answer",
            "Grade a spoken transcript against the current sentence.",
            object_schema(
                &serde_json::json!({
                    "transcript": {
                        "type": "string",
                        "description": "What the learner said"
                    }
                }),
                &["transcript"],
            ),
        ),
        ToolDefinition::new(
            "practice_next",
            "Advance to the next sentence.",
            no_args.clone(),
        ),
        ToolDefinition::new(
            "practice_save",
            "Save the current sentence as an expression to review.",
            no_args.clone(),
        ),
        ToolDefinition::new(
            "practice_toggle_saved",
            "Switch between all sentences and saved expressions only.",
            no_args.clone(),
        ),
        ToolDefinition::new(
            "practice_restart",
            "Go back to the first sentence. Saved expressions are kept.",
            no_args,
        ),
    ]
}

fn view_result(session: &PracticeSession) -> Result<ToolCallResult> {
    let text = serde_json::to_string_pretty(&SessionView::of(session))
        .context("failed to serialize session view")?;
    Ok(ToolCallResult::text(text))
}

/// Run `f` against the loaded session, or report that none is loaded.
fn with_session(
    router: &ToolRouter,
    f: impl FnOnce(&mut PracticeSession) -> Result<ToolCallResult>,
) -> Result<ToolCallResult> {
    let mut guard = router.session();
    match guard.as_mut() {
        Some(session) => f(session),
        None => Ok(ToolCallResult::error(PracticeError::NoSession)),
    }
}

pub fn load(router: &ToolRouter, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: LoadParams =
        serde_json::from_value(arguments).context("invalid practice_load parameters")?;
    let deck = match Deck::new(params.sentences) {
        Ok(deck) => deck,
        Err(e) => return Ok(ToolCallResult::error(e)),
    };
    info!(sentences = deck.len(), "practice deck loaded via tool");
    router.start_session(deck);
    with_session(router, |session| view_result(session))
}

pub fn current(router: &ToolRouter) -> Result<ToolCallResult> {
    with_session(router, |session| view_result(session))
}

pub fn answer(router: &ToolRouter, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: AnswerParams =
        serde_json::from_value(arguments).context("invalid practice_answer parameters")?;
    let scorer = *router.scorer();

    with_session(router, |session| {
        let grade = session.submit(&params.transcript);
        let reference = &session.current().english;
        let report = AnswerReport {
            you_said: &params.transcript,
            correct_is: reference,
            similarity: grade.similarity,
            is_correct: grade.is_correct,
            diff: scorer.word_diff(reference, &params.transcript),
        };
        let text = serde_json::to_string_pretty(&report).context("failed to serialize answer")?;
        Ok(ToolCallResult::text(text))
    })
}

pub fn next(router: &ToolRouter) -> Result<ToolCallResult> {
    with_session(router, |session| match session.next() {
        Advance::Moved => view_result(session),
        Advance::Finished => Ok(ToolCallResult::text(
            "All sentences completed. Use practice_restart to practice again.",
        )),
    })
}

pub fn save(router: &ToolRouter) -> Result<ToolCallResult> {
    with_session(router, |session| {
        let seq = session.current().seq;
        let text = if session.save_current() {
            format!("Saved expression #{seq} ({} saved)", session.saved().len())
        } else {
            format!("Expression #{seq} is already saved")
        };
        Ok(ToolCallResult::text(text))
    })
}

pub fn toggle_saved(router: &ToolRouter) -> Result<ToolCallResult> {
    with_session(router, |session| match session.toggle_saved_view() {
        Ok(_) => view_result(session),
        Err(e) => Ok(ToolCallResult::error(e)),
    })
}

pub fn restart(router: &ToolRouter) -> Result<ToolCallResult> {
    with_session(router, |session| {
        session.restart();
        view_result(session)
    })
}
