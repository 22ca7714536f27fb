//! `youngs-catch` — spoken-sentence recall scoring.
//!
//! A learner reads a Korean prompt, says the English sentence aloud, and the
//! speech recognizer's transcript is scored against the reference sentence
//! with a normalized Levenshtein similarity (0-100). Scores of 70 and above
//! conventionally count as correct.
//!
//! # Modules
//!
//! - [`scoring`] — normalization, edit distance, similarity percentage, word diff
//! - [`practice`] — sentence decks and the practice session state machine
//! - [`server`] / [`tools`] — stdio JSON-RPC tool server exposing both
//!
//! # Architecture
//!
//! ```text
//! stdin (JSON-RPC) → server → ToolRouter → scoring / PracticeSession
//! stdout (JSON-RPC) ←──────────────────────────┘
//! ```

pub mod error;
pub mod practice;
pub mod scoring;
pub mod server;
pub mod tools;

pub use error::{PracticeError, PracticeResult};
pub use scoring::{CORRECT_THRESHOLD, Grade, Scorer, grade, similarity_percent};
pub use server::run_server;
