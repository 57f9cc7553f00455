//! The DCT perceptual hasher (C1–C3): decode → DCT → median-threshold.

pub mod dct;
pub mod extractor;
pub mod policy;
pub mod preprocess;

pub use policy::HashPolicy;

use crate::model::PHash;
use dct::DctMatrix;
use std::path::Path;

/// A hasher instance for a fixed `(n, bits, policy)` configuration. The DCT
/// basis is built once in [`Hasher::new`] and reused for every image, the
/// same one-time-construction, many-uses shape the teacher uses for its
/// rolling-hash and Bloom-filter builders.
pub struct Hasher {
    n: usize,
    bits: usize,
    policy: HashPolicy,
    dct: DctMatrix,
}

impl Hasher {
    /// `n` is the DCT grid size (the original used 32), `bits` the fingerprint
    /// bit budget (64 by default, paired with an 8x8 block policy).
    pub fn new(n: usize, bits: usize, policy: HashPolicy) -> Self {
        Self {
            n,
            bits,
            policy,
            dct: DctMatrix::new(n),
        }
    }

    /// The default configuration: 32x32 DCT grid, 64-bit block-policy hash.
    pub fn default_config() -> Self {
        Self::new(32, 64, HashPolicy::default_block())
    }

    /// Hash a file on disk. Decode failures are reported as `(false, empty
    /// hash)` rather than propagated, matching spec.md §4.1's recovered-
    /// locally policy — callers doing bulk hashing should log the warning
    /// and move on rather than aborting a batch.
    pub fn hash_file(&self, path: &Path) -> (bool, PHash) {
        match preprocess::preprocess_file(path, self.n) {
            Ok(pixels) => {
                let coeffs = self.dct.apply(&pixels);
                (true, extractor::extract(&coeffs, self.bits, self.policy))
            }
            Err(_) => (false, PHash::zeroed(self.bits)),
        }
    }

    /// Hash an already-decoded image.
    pub fn hash_image(&self, image: &image::DynamicImage) -> (bool, PHash) {
        match preprocess::preprocess_image(image, self.n) {
            Ok(pixels) => {
                let coeffs = self.dct.apply(&pixels);
                (true, extractor::extract(&coeffs, self.bits, self.policy))
            }
            Err(_) => (false, PHash::zeroed(self.bits)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    #[test]
    fn hashing_a_solid_color_image_succeeds() {
        let hasher = Hasher::default_config();
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, image::Rgb([128, 64, 200])));
        let (ok, hash) = hasher.hash_image(&img);
        assert!(ok);
        assert_eq!(hash.word_count(), 1);
    }

    #[test]
    fn hashing_a_missing_file_reports_failure_not_panic() {
        let hasher = Hasher::default_config();
        let (ok, _) = hasher.hash_file(Path::new("/nonexistent/path/does-not-exist.png"));
        assert!(!ok);
    }
}
