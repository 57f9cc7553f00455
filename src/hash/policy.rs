//! C3: the two coefficient-selection policies.

/// How low-frequency DCT coefficients are selected for thresholding.
///
/// The block policy is the only writer this crate produces; diagonal is
/// kept solely so a reader can decode hashes written by older tooling that
/// used it. Mixing policies across hashers writing to the same store
/// produces incomparable bits (spec.md §4.3/§9) — never do that.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashPolicy {
    /// Top-left `s x s` sub-block of the coefficient matrix, row-major.
    Block { s: usize },
    /// Anti-diagonal walk from `(0,0)` outward, legacy reads only.
    Diagonal,
}

impl HashPolicy {
    /// The default, preferred policy: an 8x8 block yielding 64 bits.
    pub fn default_block() -> Self {
        HashPolicy::Block { s: 8 }
    }

    /// How many coefficients this policy selects out of an `n x n` matrix
    /// for a requested bit budget `bits`.
    pub fn select(&self, n: usize, bits: usize) -> Vec<(usize, usize)> {
        match *self {
            HashPolicy::Block { s } => block_indices(n, s, bits),
            HashPolicy::Diagonal => diagonal_indices(n, bits),
        }
    }
}

fn block_indices(n: usize, s: usize, bits: usize) -> Vec<(usize, usize)> {
    assert!(s <= n, "block size {s} exceeds coefficient matrix size {n}");
    let mut out = Vec::with_capacity(bits.min(s * s));
    'outer: for r in 0..s {
        for c in 0..s {
            if out.len() == bits {
                break 'outer;
            }
            out.push((r, c));
        }
    }
    out
}

fn diagonal_indices(n: usize, bits: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::with_capacity(bits);
    'outer: for diag in 0..(2 * n - 1) {
        let row_start = diag.saturating_sub(n - 1);
        let row_end = diag.min(n - 1);
        for r in row_start..=row_end {
            let c = diag - r;
            out.push((r, c));
            if out.len() == bits {
                break 'outer;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_policy_is_row_major_top_left() {
        let idx = block_indices(32, 3, 9);
        assert_eq!(
            idx,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn block_policy_truncates_when_bits_less_than_s_squared() {
        let idx = block_indices(32, 3, 4);
        assert_eq!(idx, vec![(0, 0), (0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn diagonal_policy_walks_anti_diagonals_from_origin() {
        let idx = diagonal_indices(32, 6);
        assert_eq!(idx, vec![(0, 0), (0, 1), (1, 0), (0, 2), (1, 1), (2, 0)]);
    }
}
