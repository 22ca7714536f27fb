//! Levenshtein edit distance over Unicode scalar values.

/// Compute the Levenshtein edit distance between two strings.
///
/// Returns the minimum number of single-character edits (insertions,
/// deletions, substitutions) required to transform `a` into `b`. Characters
/// are compared as `char`s, so a multi-byte letter counts as one edit.
///
/// Runs in O(m*n) time. Only two rows of the table are kept, sized by the
/// shorter input. Callers bound input length (see [`super::Scorer`]).
pub fn distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    // Inner loop runs over the shorter side.
    let (outer, inner) = if a_chars.len() >= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };
    let n = inner.len();

    if n == 0 {
        return outer.len();
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for (i, oc) in outer.iter().enumerate() {
        curr[0] = i + 1;
        for (j, ic) in inner.iter().enumerate() {
            curr[j + 1] = if oc == ic {
                prev[j]
            } else {
                1 + prev[j + 1] // deletion
                    .min(curr[j]) // insertion
                    .min(prev[j]) // substitution
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
