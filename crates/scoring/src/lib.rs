//! Lenient grading of single spoken words for the word quiz.
//!
//! Child speech through a recognizer is noisy; the classifier separates
//! "essentially correct" from "on the right track" from "not an attempt", so
//! the surrounding flow can pick between advancing, hinting, and retrying.

use serde::{Deserialize, Serialize};

/// Length of the shared prefix used as a cheap phonetic-similarity proxy.
const ONSET_LEN: usize = 2;

/// Minimum positional-overlap ratio for a `Close` verdict.
const OVERLAP_THRESHOLD: f32 = 0.6;

/// Three-way verdict for one spoken attempt at one target word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Closeness {
    Exact,
    Close,
    Wrong,
}

/// Grade a spoken utterance against a target word.
///
/// Both inputs are lowercased and stripped to `[a-z]` before comparison.
/// Unlike display formatting, apostrophes are stripped as well; this path
/// only compares, never displays. Empty
/// normalized input on either side is `Wrong`: naive substring semantics
/// would otherwise classify silence as `Exact`.
///
/// `Exact` covers equality and non-empty substring containment either way,
/// tolerating stray words the recognizer glues on. `Close` fires on a shared
/// two-character onset or a positional character overlap of at least 0.6
/// relative to the longer word.
pub fn classify(spoken: &str, target: &str) -> Closeness {
    let spoken = normalize(spoken);
    let target = normalize(target);

    if spoken.is_empty() || target.is_empty() {
        return Closeness::Wrong;
    }

    if spoken == target || spoken.contains(&target) || target.contains(&spoken) {
        return Closeness::Exact;
    }

    let verdict = if shares_onset(&spoken, &target)
        || positional_overlap(&spoken, &target) >= OVERLAP_THRESHOLD
    {
        Closeness::Close
    } else {
        Closeness::Wrong
    };

    tracing::debug!(spoken = %spoken, target = %target, ?verdict, "word_classified");
    verdict
}

/// Lowercase and strip everything outside `[a-z]`.
fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

fn shares_onset(a: &str, b: &str) -> bool {
    a.len() >= ONSET_LEN && b.len() >= ONSET_LEN && a.as_bytes()[..ONSET_LEN] == b.as_bytes()[..ONSET_LEN]
}

/// Fraction of position-by-position character matches relative to the longer
/// string. A crude overlap measure, deliberately not edit distance.
fn positional_overlap(a: &str, b: &str) -> f32 {
    let longer = a.len().max(b.len());
    if longer == 0 {
        return 0.0;
    }

    let matches = a
        .bytes()
        .zip(b.bytes())
        .filter(|(x, y)| x == y)
        .count();

    matches as f32 / longer as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(classify("cat", "cat"), Closeness::Exact);
        assert_eq!(classify("Cat!", "cat"), Closeness::Exact);
    }

    #[test]
    fn test_substring_counts_as_exact() {
        assert_eq!(classify("the cat", "cat"), Closeness::Exact);
        assert_eq!(classify("cat", "the cat"), Closeness::Exact);
    }

    #[test]
    fn test_shared_onset_is_close() {
        // "cap" and "cat" share the onset "ca".
        assert_eq!(classify("cap", "cat"), Closeness::Close);
    }

    #[test]
    fn test_overlap_ratio_is_close_without_onset() {
        // "kat" vs "cat": k/c, a=a, t=t -> 2/3 >= 0.6, onsets differ.
        assert_eq!(classify("kat", "cat"), Closeness::Close);
    }

    #[test]
    fn test_wrong_word() {
        assert_eq!(classify("dog", "cat"), Closeness::Wrong);
        assert_eq!(classify("bear", "cat"), Closeness::Wrong);
    }

    #[test]
    fn test_empty_input_is_wrong_not_exact() {
        assert_eq!(classify("", "cat"), Closeness::Wrong);
        assert_eq!(classify("cat", ""), Closeness::Wrong);
        assert_eq!(classify("", ""), Closeness::Wrong);
        // Punctuation-only input normalizes to empty.
        assert_eq!(classify("?!", "cat"), Closeness::Wrong);
    }

    #[test]
    fn test_apostrophes_are_stripped() {
        assert_eq!(classify("dont", "don't"), Closeness::Exact);
    }

    #[test]
    fn test_short_words_skip_onset_rule() {
        // "a" vs "at": too short for an onset; substring makes it exact.
        assert_eq!(classify("a", "at"), Closeness::Exact);
        // "i" vs "on": no onset, overlap 0/2.
        assert_eq!(classify("i", "on"), Closeness::Wrong);
    }
}
