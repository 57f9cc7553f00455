//! Hamming distance between equal-length fingerprints (C4).

use crate::model::PHash;

/// Sum of `popcount(a[w] ^ b[w])` over all words.
///
/// # Panics
/// Panics if `a` and `b` have different word counts — comparing fingerprints
/// of unequal length is a programmer error, never a recoverable one.
pub fn hamming(a: &PHash, b: &PHash) -> u32 {
    assert_eq!(
        a.word_count(),
        b.word_count(),
        "cannot compare fingerprints of different lengths ({} vs {} words)",
        a.word_count(),
        b.word_count()
    );

    a.words()
        .iter()
        .zip(b.words())
        .map(|(x, y)| (x ^ y).count_ones())
        .sum()
}

/// `true` iff `hamming(a, b) <= threshold`, exiting early once the running
/// sum passes the threshold so a mismatch in the first word needn't scan the
/// rest.
pub fn within(a: &PHash, b: &PHash, threshold: u32) -> bool {
    assert_eq!(
        a.word_count(),
        b.word_count(),
        "cannot compare fingerprints of different lengths ({} vs {} words)",
        a.word_count(),
        b.word_count()
    );

    let mut acc = 0u32;
    for (x, y) in a.words().iter().zip(b.words()) {
        acc += (x ^ y).count_ones();
        if acc > threshold {
            return false;
        }
    }
    true
}
