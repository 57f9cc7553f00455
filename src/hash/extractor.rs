//! C3: threshold selected DCT coefficients against their median into a
//! packed fingerprint.

use crate::hash::dct::Coefficients;
use crate::hash::policy::HashPolicy;
use crate::model::PHash;

/// Select `bits` coefficients per `policy`, threshold each against the
/// median of the selection (strictly greater-than), and pack the result.
///
/// Median is computed the way the original does: for an even selection
/// `(sorted[B/2] + sorted[B/2-1]) / 2`, which also works for odd `B` since
/// both indices then straddle the true middle element closely enough for
/// this algorithm's purposes (matches spec.md §4.3 literally).
pub fn extract(coeffs: &Coefficients, bits: usize, policy: HashPolicy) -> PHash {
    let indices = policy.select(coeffs.n(), bits);
    assert_eq!(indices.len(), bits, "policy selected fewer coefficients than the requested bit budget");

    let values: Vec<f32> = indices.iter().map(|&(r, c)| coeffs.get(r, c)).collect();

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("DCT coefficients are never NaN"));
    let median = (sorted[bits / 2] + sorted[bits / 2 - 1]) / 2.0;

    let mut hash = PHash::zeroed(bits);
    for (i, &v) in values.iter().enumerate() {
        if v > median {
            hash.set_bit(i);
        }
    }

    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::dct::DctMatrix;
    use crate::hash::preprocess::preprocess_image;

    fn coeffs_for(pixels: &[u8], n: usize) -> Coefficients {
        let img = image::DynamicImage::ImageLuma8(
            image::GrayImage::from_raw(n as u32, n as u32, pixels.to_vec()).unwrap(),
        );
        let matrix = preprocess_image(&img, n).unwrap();
        DctMatrix::new(n).apply(&matrix)
    }

    #[test]
    fn produces_requested_bit_budget() {
        let pixels: Vec<u8> = (0..64).map(|i| (i * 4) as u8).collect();
        let coeffs = coeffs_for(&pixels, 8);
        let hash = extract(&coeffs, 64, HashPolicy::Block { s: 8 });
        assert_eq!(hash.word_count(), 1);
    }

    #[test]
    fn is_deterministic_for_the_same_image() {
        let pixels: Vec<u8> = (0..64).map(|i| ((i * 7) % 251) as u8).collect();
        let coeffs = coeffs_for(&pixels, 8);
        let a = extract(&coeffs, 64, HashPolicy::default_block());
        let b = extract(&coeffs, 64, HashPolicy::default_block());
        assert_eq!(a, b);
    }

    #[test]
    fn monotone_brightness_shift_preserves_hash() {
        let base: Vec<u8> = (0..64).map(|i| ((i * 3) % 200) as u8).collect();
        let shifted: Vec<u8> = base.iter().map(|&v| v.saturating_add(20)).collect();

        let coeffs_a = coeffs_for(&base, 8);
        let coeffs_b = coeffs_for(&shifted, 8);

        let hash_a = extract(&coeffs_a, 64, HashPolicy::default_block());
        let hash_b = extract(&coeffs_b, 64, HashPolicy::default_block());

        assert_eq!(hash_a, hash_b);
    }
}
