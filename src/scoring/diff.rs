//! Word-level diff of a spoken attempt against its reference sentence.
//!
//! Entry points are [`super::Scorer::word_diff`] and [`super::word_diff`]:
//! both sides are normalized and capped first, so the diff only shows the
//! differences that actually cost points.

use similar::{Algorithm, ChangeTag, TextDiff};

/// Render `candidate` against `reference`, word by word. Inputs are already
/// normalized.
///
/// Reference words missing from the candidate are wrapped as `[-word-]`,
/// extra candidate words as `{+word+}`. Consecutive words with the same
/// change are grouped. Identical inputs render as the reference.
pub(crate) fn render(reference: &str, candidate: &str) -> String {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Patience)
        .diff_words(reference, candidate);

    let mut groups: Vec<(ChangeTag, Vec<&str>)> = Vec::new();
    for change in diff.iter_all_changes() {
        let word = change.value();
        if word.trim().is_empty() {
            continue;
        }
        match groups.last_mut() {
            Some((tag, words)) if *tag == change.tag() => words.push(word),
            _ => groups.push((change.tag(), vec![word])),
        }
    }

    groups
        .iter()
        .map(|(tag, words)| {
            let joined = words.join(" ");
            match tag {
                ChangeTag::Equal => joined,
                ChangeTag::Delete => format!("[-{joined}-]"),
                ChangeTag::Insert => format!("{{+{joined}+}}"),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
