//! Similarity scoring for spoken sentence recall.
//!
//! A transcript is compared against its reference sentence after both are
//! normalized (see [`normalize`]). The Levenshtein distance between the two
//! normalized strings is turned into a percentage:
//!
//! ```text
//! round((max_len - distance) / max_len * 100)      max_len > 0
//! 100                                               both normalize to ""
//! ```
//!
//! The result is always in `0..=100`: distance never exceeds `max_len`.
//! Rounding is half up and computed in integers, so `87.5` becomes `88`.
//!
//! Pass/fail is caller policy. [`grade`] applies the conventional
//! [`CORRECT_THRESHOLD`]; [`Scorer`] carries a configurable one.

mod diff;
pub mod levenshtein;
pub mod normalize;

use serde::Serialize;
use tracing::{debug, trace};

pub use normalize::normalize;

/// Conventional percentage at or above which an attempt counts as correct.
pub const CORRECT_THRESHOLD: u8 = 70;

/// Maximum normalized characters per side fed to the distance computation.
///
/// Longer inputs are truncated to this many characters. The cost of the
/// O(m*n) table stays bounded; the result is lossy but deterministic.
pub const MAX_SCORED_CHARS: usize = 4_000;

/// Outcome of scoring one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    /// Similarity percentage in `0..=100`.
    pub similarity: u8,
    /// Whether `similarity` reached the threshold in effect.
    pub is_correct: bool,
}

/// Scoring configuration: pass threshold and input cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scorer {
    threshold: u8,
    max_chars: usize,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            threshold: CORRECT_THRESHOLD,
            max_chars: MAX_SCORED_CHARS,
        }
    }
}

impl Scorer {
    /// Create a scorer with the given threshold (clamped to 100) and
    /// per-side character cap (at least 1).
    pub fn new(threshold: u8, max_chars: usize) -> Self {
        Self {
            threshold: threshold.min(100),
            max_chars: max_chars.max(1),
        }
    }

    pub const fn threshold(&self) -> u8 {
        self.threshold
    }

    pub const fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Similarity percentage between `reference` and `candidate`.
    pub fn similarity(&self, reference: &str, candidate: &str) -> u8 {
        let reference = self.prepare(reference);
        let candidate = self.prepare(candidate);

        let max_len = reference.chars().count().max(candidate.chars().count());
        if max_len == 0 {
            trace!("both inputs normalize to empty");
            return 100;
        }

        let distance = levenshtein::distance(&reference, &candidate);
        let percent = round_percent(max_len - distance.min(max_len), max_len);
        debug!(distance, max_len, percent, "scored attempt");
        percent
    }

    /// Score an attempt and apply this scorer's threshold.
    pub fn grade(&self, reference: &str, candidate: &str) -> Grade {
        let similarity = self.similarity(reference, candidate);
        Grade {
            similarity,
            is_correct: similarity >= self.threshold,
        }
    }

    /// Word diff of `candidate` against `reference`, over the same capped
    /// prefixes that [`Self::similarity`] compares.
    pub fn word_diff(&self, reference: &str, candidate: &str) -> String {
        diff::render(&self.prepare(reference), &self.prepare(candidate))
    }

    /// Normalize, then cut to `max_chars` characters. A cut that lands after
    /// a space drops the trailing space.
    fn prepare(&self, text: &str) -> String {
        let text = normalize(text);
        match text.char_indices().nth(self.max_chars) {
            Some((cut, _)) => {
                debug!(cap = self.max_chars, "truncating oversized input");
                text[..cut].trim_end().to_owned()
            }
            None => text,
        }
    }
}

/// `round(matched / total * 100)` with halves rounded up. `matched <= total`, `total > 0`.
fn round_percent(matched: usize, total: usize) -> u8 {
    let scaled = (matched * 200 + total) / (2 * total);
    u8::try_from(scaled.min(100)).unwrap_or(100)
}

/// Similarity percentage between `reference` and `candidate`, using the
/// default input cap.
pub fn similarity_percent(reference: &str, candidate: &str) -> u8 {
    Scorer::default().similarity(reference, candidate)
}

/// Word diff of `candidate` against `reference`, using the default input cap.
pub fn word_diff(reference: &str, candidate: &str) -> String {
    Scorer::default().word_diff(reference, candidate)
}

/// Score an attempt against [`CORRECT_THRESHOLD`].
pub fn grade(reference: &str, candidate: &str) -> Grade {
    Scorer::default().grade(reference, candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sentences() {
        assert_eq!(
            similarity_percent("I went to the beach", "I went to the beach"),
            100
        );
    }

    #[test]
    fn test_missing_word_exact_value() {
        // "i went to the beach" (19) vs "i went to beach" (15): distance 4, 15/19 = 78.9%.
        assert_eq!(similarity_percent("I went to the beach", "I went to beach"), 79);
    }

    #[test]
    fn test_both_empty() {
        assert_eq!(similarity_percent("", ""), 100);
        assert_eq!(similarity_percent("?!", "..."), 100);
    }

    #[test]
    fn test_one_empty() {
        assert_eq!(similarity_percent("", "hello"), 0);
        assert_eq!(similarity_percent("hello", ""), 0);
        assert_eq!(similarity_percent("!!!", "hello"), 0);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        assert_eq!(similarity_percent("Hello, World!", "hello world"), 100);
        assert_eq!(similarity_percent("a    b", "a b"), 100);
    }

    #[test]
    fn test_completely_different() {
        assert_eq!(similarity_percent("abc", "xyz"), 0);
    }

    #[test]
    fn test_rounds_half_up() {
        // 7/8 = 87.5%
        assert_eq!(similarity_percent("abcdefgh", "abcdefgx"), 88);
        // 1/8 = 12.5%
        assert_eq!(similarity_percent("abcdefgh", "axxxxxxx"), 13);
        // 2/3 = 66.67%
        assert_eq!(similarity_percent("abc", "abx"), 67);
    }

    #[test]
    fn test_round_percent_bounds() {
        assert_eq!(round_percent(0, 5), 0);
        assert_eq!(round_percent(5, 5), 100);
        assert_eq!(round_percent(1, 3), 33);
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let samples = [
            "",
            "hello",
            "Hello, World!",
            "I went to the beach",
            "i want to teach",
            "나는 학교에 갔다",
            "café au lait",
        ];
        for a in samples {
            for b in samples {
                let ab = similarity_percent(a, b);
                assert!(ab <= 100);
                assert_eq!(ab, similarity_percent(b, a), "{a:?} vs {b:?}");
            }
            assert_eq!(similarity_percent(a, a), 100);
        }
    }

    #[test]
    fn test_grade_threshold() {
        let g = grade("I went to the beach", "I went to beach");
        assert_eq!(g, Grade { similarity: 79, is_correct: true });

        let g = grade("I went to the beach", "hello");
        assert!(!g.is_correct);

        let strict = Scorer::new(80, MAX_SCORED_CHARS);
        assert!(!strict.grade("I went to the beach", "I went to beach").is_correct);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // "abcdefghij" vs "abcdefgxyz": 7/10 = 70%.
        let g = grade("abcdefghij", "abcdefgxyz");
        assert_eq!(g.similarity, 70);
        assert!(g.is_correct);
    }

    #[test]
    fn test_truncation_cap() {
        let scorer = Scorer::new(CORRECT_THRESHOLD, 5);
        // Only "hello" is compared on each side.
        assert_eq!(scorer.similarity("hello world", "hello there"), 100);
        assert_eq!(scorer.similarity("hellx world", "hello there"), 80);
    }

    #[test]
    fn test_truncation_drops_trailing_space() {
        let scorer = Scorer::new(CORRECT_THRESHOLD, 6);
        // "hello world" cuts to "hello ", compared as "hello".
        assert_eq!(scorer.similarity("hello world", "hello"), 100);
        assert_eq!(scorer.word_diff("hello world", "hello"), "hello");
    }

    #[test]
    fn test_word_diff_is_capped() {
        let scorer = Scorer::new(CORRECT_THRESHOLD, 11);
        assert_eq!(
            scorer.word_diff("hello world and more", "hello world or less"),
            "hello world"
        );
    }

    #[test]
    fn test_oversized_word_diff_uses_prefix_only() {
        let reference: Vec<String> = (0..40_000).map(|i| format!("a{i}")).collect();
        let candidate: Vec<String> = (0..40_000).map(|i| format!("b{i}")).collect();
        let diff = word_diff(&reference.join(" "), &candidate.join(" "));

        // Only words from the first MAX_SCORED_CHARS characters of each side appear.
        assert!(diff.starts_with("[-a0"), "{}", &diff[..40]);
        assert!(diff.contains("a500") && diff.contains("b500"));
        assert!(!diff.contains("a2000") && !diff.contains("b2000"));
        assert!(diff.len() < 5 * MAX_SCORED_CHARS);
    }

    #[test]
    fn test_scorer_clamps_config() {
        let scorer = Scorer::new(250, 0);
        assert_eq!(scorer.threshold(), 100);
        assert_eq!(scorer.max_chars(), 1);
    }

    #[test]
    fn test_long_inputs_are_bounded() {
        let a = "a".repeat(MAX_SCORED_CHARS * 3);
        let b = "a".repeat(MAX_SCORED_CHARS * 2);
        // Both truncate to the same prefix.
        assert_eq!(similarity_percent(&a, &b), 100);
    }
}
