//! Practice session state machine.
//!
//! Holds a deck, a cursor into the active view (all sentences or saved
//! expressions only), the saved-expression list and the last graded attempt.

use serde::Serialize;
use tracing::{debug, info};

use super::deck::{Deck, Sentence};
use crate::error::{PracticeError, PracticeResult};
use crate::scoring::{Grade, Scorer};

/// Result of [`PracticeSession::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Cursor moved to the next sentence.
    Moved,
    /// Already at the last sentence of the active view; cursor unchanged.
    Finished,
}

/// Last attempt on the current sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub transcript: String,
    pub grade: Grade,
}

/// One learner's walk through a deck.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    deck: Deck,
    scorer: Scorer,
    saved: Vec<Sentence>,
    saved_only: bool,
    index: usize,
    attempt: Option<Attempt>,
}

impl PracticeSession {
    pub fn new(deck: Deck, scorer: Scorer) -> Self {
        info!(sentences = deck.len(), threshold = scorer.threshold(), "practice session started");
        Self {
            deck,
            scorer,
            saved: Vec::new(),
            saved_only: false,
            index: 0,
            attempt: None,
        }
    }

    fn view(&self) -> &[Sentence] {
        if self.saved_only {
            &self.saved
        } else {
            self.deck.sentences()
        }
    }

    /// Sentence under the cursor.
    ///
    /// The active view is never empty: the deck is validated non-empty and
    /// saved-only mode requires at least one saved expression.
    pub fn current(&self) -> &Sentence {
        let view = self.view();
        &view[self.index.min(view.len() - 1)]
    }

    /// `(position, total)` with a 1-based position.
    pub fn progress(&self) -> (usize, usize) {
        (self.index + 1, self.view().len())
    }

    pub const fn is_saved_only(&self) -> bool {
        self.saved_only
    }

    pub fn saved(&self) -> &[Sentence] {
        &self.saved
    }

    pub const fn attempt(&self) -> Option<&Attempt> {
        self.attempt.as_ref()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.view().len()
    }

    /// Grade `transcript` against the current sentence's English side.
    pub fn submit(&mut self, transcript: &str) -> Grade {
        let sentence = self.current();
        let grade = self.scorer.grade(&sentence.english, transcript);
        debug!(
            seq = sentence.seq,
            similarity = grade.similarity,
            correct = grade.is_correct,
            "attempt graded"
        );
        self.attempt = Some(Attempt {
            transcript: transcript.to_owned(),
            grade,
        });
        grade
    }

    /// Move to the next sentence, clearing the last attempt.
    pub fn next(&mut self) -> Advance {
        if self.is_last() {
            debug!("all sentences completed");
            return Advance::Finished;
        }
        self.index += 1;
        self.attempt = None;
        Advance::Moved
    }

    /// Save the current sentence. Returns `false` if it was already saved.
    pub fn save_current(&mut self) -> bool {
        let sentence = self.current();
        if self.saved.iter().any(|s| s.seq == sentence.seq) {
            return false;
        }
        let sentence = sentence.clone();
        debug!(seq = sentence.seq, "expression saved");
        self.saved.push(sentence);
        true
    }

    /// Switch between all sentences and saved expressions only.
    pub fn toggle_saved_view(&mut self) -> PracticeResult<bool> {
        if !self.saved_only && self.saved.is_empty() {
            return Err(PracticeError::NothingSaved);
        }
        self.saved_only = !self.saved_only;
        self.index = 0;
        self.attempt = None;
        debug!(saved_only = self.saved_only, "view toggled");
        Ok(self.saved_only)
    }

    /// Back to the first sentence of the active view. Saved expressions stay.
    pub fn restart(&mut self) {
        self.index = 0;
        self.attempt = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> PracticeSession {
        let deck = Deck::new(vec![
            Sentence {
                seq: 1,
                korean: "나는 해변에 갔다".to_owned(),
                english: "I went to the beach".to_owned(),
                memorized_on: String::new(),
            },
            Sentence {
                seq: 2,
                korean: "좋은 아침".to_owned(),
                english: "Good morning".to_owned(),
                memorized_on: String::new(),
            },
            Sentence {
                seq: 3,
                korean: "고마워".to_owned(),
                english: "Thank you".to_owned(),
                memorized_on: String::new(),
            },
        ])
        .expect("valid deck");
        PracticeSession::new(deck, Scorer::default())
    }

    #[test]
    fn test_submit_records_attempt() {
        let mut s = session();
        let grade = s.submit("i went to beach");
        assert_eq!(grade.similarity, 79);
        assert!(grade.is_correct);
        let attempt = s.attempt().expect("attempt recorded");
        assert_eq!(attempt.transcript, "i went to beach");

        let grade = s.submit("something else entirely");
        assert!(!grade.is_correct);
    }

    #[test]
    fn test_next_clears_and_stops_at_end() {
        let mut s = session();
        s.submit("I went to the beach");
        assert_eq!(s.next(), Advance::Moved);
        assert!(s.attempt().is_none());
        assert_eq!(s.current().seq, 2);
        assert_eq!(s.progress(), (2, 3));

        assert_eq!(s.next(), Advance::Moved);
        assert!(s.is_last());
        assert_eq!(s.next(), Advance::Finished);
        assert_eq!(s.current().seq, 3);
    }

    #[test]
    fn test_save_is_deduplicated() {
        let mut s = session();
        assert!(s.save_current());
        assert!(!s.save_current());
        assert_eq!(s.saved().len(), 1);
    }

    #[test]
    fn test_saved_view() {
        let mut s = session();
        assert!(matches!(s.toggle_saved_view(), Err(PracticeError::NothingSaved)));

        s.next();
        s.save_current();
        s.next();
        s.save_current();

        assert!(s.toggle_saved_view().expect("has saved"));
        assert_eq!(s.progress(), (1, 2));
        assert_eq!(s.current().seq, 2);
        assert_eq!(s.submit("good morning").similarity, 100);

        assert!(!s.toggle_saved_view().expect("back to all"));
        assert_eq!(s.progress(), (1, 3));
        assert!(s.attempt().is_none());
    }

    #[test]
    fn test_restart_keeps_saved() {
        let mut s = session();
        s.save_current();
        s.next();
        s.next();
        s.restart();
        assert_eq!(s.current().seq, 1);
        assert_eq!(s.saved().len(), 1);
    }
}
