//! C1: decode an image, convert to grayscale, force-resize to N×N.

use crate::error::PreprocessError;
use image::imageops::FilterType;
use std::path::Path;

/// A row-major N×N matrix of luminance values in `[0, 255]`.
#[derive(Clone, Debug)]
pub struct PixelMatrix {
    pub n: usize,
    data: Vec<f32>,
}

impl PixelMatrix {
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.n + col]
    }

    pub fn rows(&self) -> usize {
        self.n
    }

    pub fn cols(&self) -> usize {
        self.n
    }
}

/// Decode `path`, convert to grayscale, and force-resize (ignoring aspect
/// ratio) to an `n x n` pixel matrix.
pub fn preprocess_file(path: &Path, n: usize) -> Result<PixelMatrix, PreprocessError> {
    let image = image::open(path)?;
    preprocess_image(&image, n)
}

/// Same as [`preprocess_file`] but starting from an already-decoded image,
/// for callers that decoded bytes themselves (e.g. from an archive).
pub fn preprocess_image(image: &image::DynamicImage, n: usize) -> Result<PixelMatrix, PreprocessError> {
    let resized = image
        .grayscale()
        .resize_exact(n as u32, n as u32, FilterType::Lanczos3);

    let gray = resized.to_luma8();
    if gray.width() as usize != n || gray.height() as usize != n {
        return Err(PreprocessError::EmptyBuffer);
    }

    let mut data = Vec::with_capacity(n * n);
    for pixel in gray.pixels() {
        data.push(pixel.0[0] as f32);
    }

    Ok(PixelMatrix { n, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    #[test]
    fn resizes_to_exact_n_by_n_ignoring_aspect_ratio() {
        let wide = DynamicImage::ImageRgb8(RgbImage::new(64, 16));
        let matrix = preprocess_image(&wide, 8).unwrap();
        assert_eq!(matrix.rows(), 8);
        assert_eq!(matrix.cols(), 8);
    }

    #[test]
    fn pixels_stay_in_range() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, image::Rgb([200, 10, 10])));
        let matrix = preprocess_image(&img, 8).unwrap();
        for r in 0..matrix.rows() {
            for c in 0..matrix.cols() {
                let v = matrix.get(r, c);
                assert!((0.0..=255.0).contains(&v));
            }
        }
    }
}
