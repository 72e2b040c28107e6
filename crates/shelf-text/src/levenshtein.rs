#![forbid(unsafe_code)]

//! Levenshtein edit distance over Unicode scalar values.

use smallvec::SmallVec;

/// Rows up to this many entries live on the stack.
const INLINE_ROW: usize = 64;

type Row = SmallVec<[usize; INLINE_ROW]>;

/// Minimum number of single-character insertions, deletions, and
/// substitutions (unit cost) turning `a` into `b`.
///
/// Uses two rolling rows sized to the shorter input, so memory is
/// `O(min(|a|, |b|))`.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: SmallVec<[char; INLINE_ROW]> = a.chars().collect();
    let b: SmallVec<[char; INLINE_ROW]> = b.chars().collect();

    // Iterate over the longer string, keep rows for the shorter one.
    let (long, short) = if a.len() >= b.len() { (&a, &b) } else { (&b, &a) };
    if short.is_empty() {
        return long.len();
    }

    let mut prev: Row = (0..=short.len()).collect();
    let mut curr: Row = SmallVec::from_elem(0, short.len() + 1);

    for (i, &lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let substitution = prev[j] + usize::from(lc != sc);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_pairs() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("mars", "mary"), 1);
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(levenshtein("café", "cafe"), 1);
        assert_eq!(levenshtein("日本", "日本語"), 1);
    }

    #[test]
    fn long_inputs_spill_to_heap() {
        let a = "a".repeat(200);
        let b = format!("{}b", "a".repeat(199));
        assert_eq!(levenshtein(&a, &b), 1);
    }
}
