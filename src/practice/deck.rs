//! Sentence decks: the Korean/English pairs a learner practices.
//!
//! Decks arrive already parsed as JSON arrays. Field names follow the
//! practice sheet's columns (`순번`, `한글`, `영어`, `암기날짜`); the English
//! aliases `seq`, `korean`, `english` and `memorizedOn` are accepted too.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PracticeError, PracticeResult};

/// One practice row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    /// Row number from the source sheet; identifies saved expressions.
    #[serde(alias = "순번")]
    pub seq: u32,
    /// Prompt shown to the learner.
    #[serde(alias = "한글")]
    pub korean: String,
    /// Reference sentence the spoken answer is scored against.
    #[serde(alias = "영어")]
    pub english: String,
    #[serde(alias = "암기날짜", default)]
    pub memorized_on: String,
}

/// A non-empty, validated list of sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    sentences: Vec<Sentence>,
}

impl Deck {
    /// Build a deck, rejecting empty decks and rows with no English side.
    pub fn new(sentences: Vec<Sentence>) -> PracticeResult<Self> {
        if sentences.is_empty() {
            return Err(PracticeError::EmptyDeck);
        }
        if let Some(bad) = sentences.iter().find(|s| s.english.trim().is_empty()) {
            return Err(PracticeError::InvalidSentence {
                seq: bad.seq,
                reason: "empty English sentence".to_owned(),
            });
        }
        debug!(count = sentences.len(), "deck built");
        Ok(Self { sentences })
    }

    pub fn from_json_str(json: &str) -> PracticeResult<Self> {
        let sentences: Vec<Sentence> = serde_json::from_str(json)?;
        Self::new(sentences)
    }

    /// Read and parse a JSON deck file.
    pub fn from_json_file(path: &Path) -> PracticeResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| PracticeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let deck = Self::from_json_str(&raw)?;
        info!(path = %path.display(), count = deck.len(), "deck loaded");
        Ok(deck)
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Number of sentences; at least 1.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.sentences.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(seq: u32, english: &str) -> Sentence {
        Sentence {
            seq,
            korean: format!("문장 {seq}"),
            english: english.to_owned(),
            memorized_on: String::new(),
        }
    }

    #[test]
    fn test_korean_column_names() {
        let json = r#"[
            {"순번": 1, "한글": "나는 해변에 갔다", "영어": "I went to the beach", "암기날짜": "2024-03-01"},
            {"순번": 2, "한글": "좋은 아침", "영어": "Good morning"}
        ]"#;
        let deck = Deck::from_json_str(json).expect("should parse");
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.sentences()[0].english, "I went to the beach");
        assert_eq!(deck.sentences()[0].memorized_on, "2024-03-01");
        assert_eq!(deck.sentences()[1].memorized_on, "");
    }

    #[test]
    fn test_english_field_names() {
        let json = r#"[{"seq": 7, "korean": "안녕", "english": "Hello", "memorizedOn": "today"}]"#;
        let deck = Deck::from_json_str(json).expect("should parse");
        assert_eq!(deck.sentences()[0].seq, 7);
    }

    #[test]
    fn test_empty_deck_rejected() {
        assert!(matches!(Deck::new(Vec::new()), Err(PracticeError::EmptyDeck)));
        assert!(matches!(
            Deck::from_json_str("[]"),
            Err(PracticeError::EmptyDeck)
        ));
    }

    #[test]
    fn test_blank_english_rejected() {
        let err = Deck::new(vec![sentence(1, "ok"), sentence(2, "   ")]).expect_err("blank row");
        assert!(matches!(err, PracticeError::InvalidSentence { seq: 2, .. }));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Deck::from_json_str("{not json"),
            Err(PracticeError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Deck::from_json_file(Path::new("/nonexistent/youngs_catch_deck.json"))
            .expect_err("missing file");
        assert!(matches!(err, PracticeError::Io { .. }));
    }
}
