//! Text normalization applied before comparing two sentences.
//!
//! Capitalization, punctuation and incidental whitespace must not affect the
//! score, so both sides are reduced to a canonical form first.

use std::sync::LazyLock;

use regex::Regex;

/// Anything that is neither a word character nor whitespace.
///
/// `\w` is Unicode-aware in the `regex` crate: letters of any script, marks,
/// digits and connector punctuation (`_`) are kept.
#[allow(clippy::unwrap_used)]
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

#[allow(clippy::unwrap_used)]
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize `text` into its comparable form.
///
/// Lower-cases, strips non-word characters, collapses whitespace runs to a
/// single space and trims. Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    collapsed.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_punctuation() {
        assert_eq!(normalize("Hello, World!"), "hello world");
        assert_eq!(normalize("It's 5 o'clock."), "its 5 oclock");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(normalize("a    b"), "a b");
        assert_eq!(normalize("  \t a \n\n b  "), "a b");
    }

    #[test]
    fn test_punctuation_only_is_empty() {
        assert_eq!(normalize("?!... ,;"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_keeps_underscore_and_digits() {
        assert_eq!(normalize("snake_case 42"), "snake_case 42");
    }

    #[test]
    fn test_unicode_letters_survive() {
        assert_eq!(normalize("Café, naïve!"), "café naïve");
        assert_eq!(normalize("나는 학교에 갔다."), "나는 학교에 갔다");
    }

    #[test]
    fn test_idempotent() {
        for s in [
            "Hello, World!",
            "  I   went to the BEACH...  ",
            "Ünïcödé — dash",
            "",
            "İstanbul",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }
}
