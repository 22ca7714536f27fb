//! Sentence-recall practice: decks of Korean/English pairs and the session
//! that walks a learner through them, grading each spoken attempt.

pub mod deck;
pub mod session;

pub use deck::{Deck, Sentence};
pub use session::{Advance, Attempt, PracticeSession};
