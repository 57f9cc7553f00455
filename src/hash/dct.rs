//! C2: the N×N Type-II DCT basis, built once per hasher instance.

use crate::hash::preprocess::PixelMatrix;
use std::f32::consts::PI;

/// A dense N×N matrix of `f32`, row-major. 32-bit floating point is
/// sufficient precision for this transform (spec.md §4.2).
#[derive(Clone, Debug)]
struct Matrix {
    n: usize,
    data: Vec<f32>,
}

impl Matrix {
    fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    fn get(&self, r: usize, c: usize) -> f32 {
        self.data[r * self.n + c]
    }

    fn set(&mut self, r: usize, c: usize, v: f32) {
        self.data[r * self.n + c] = v;
    }

    fn transpose(&self) -> Self {
        let mut out = Matrix::zeros(self.n);
        for r in 0..self.n {
            for c in 0..self.n {
                out.set(c, r, self.get(r, c));
            }
        }
        out
    }
}

/// The cached DCT-II basis and its transpose, built once per `DctMatrix::new`
/// call (mirrors the one-time construction cost the teacher pays once per
/// hasher instance rather than per image).
pub struct DctMatrix {
    n: usize,
    d: Matrix,
    dt: Matrix,
}

impl DctMatrix {
    pub fn new(n: usize) -> Self {
        let d = Self::build_basis(n);
        let dt = d.transpose();
        Self { n, d, dt }
    }

    fn build_basis(n: usize) -> Matrix {
        let mut d = Matrix::zeros(n);
        let nf = n as f32;

        let row0 = (1.0 / nf).sqrt();
        for i in 0..n {
            d.set(0, i, row0);
        }

        let c = (2.0 / nf).sqrt();
        for k in 1..n {
            for i in 0..n {
                let angle = (PI / (2.0 * nf)) * k as f32 * (2 * i + 1) as f32;
                d.set(k, i, c * angle.cos());
            }
        }

        d
    }

    /// `C = D . P . D^T`
    pub fn apply(&self, pixels: &PixelMatrix) -> Coefficients {
        assert_eq!(pixels.rows(), self.n, "pixel matrix must be N x N");

        let dp = Self::multiply_with_pixels(&self.d, pixels);
        let c = Self::multiply(&dp, &self.dt);

        Coefficients { n: self.n, data: c.data }
    }

    fn multiply_with_pixels(d: &Matrix, p: &PixelMatrix) -> Matrix {
        let n = d.n;
        let mut out = Matrix::zeros(n);
        for r in 0..n {
            for c in 0..n {
                let mut sum = 0.0f32;
                for k in 0..n {
                    sum += d.get(r, k) * p.get(k, c);
                }
                out.set(r, c, sum);
            }
        }
        out
    }

    fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
        let n = a.n;
        let mut out = Matrix::zeros(n);
        for r in 0..n {
            for c in 0..n {
                let mut sum = 0.0f32;
                for k in 0..n {
                    sum += a.get(r, k) * b.get(k, c);
                }
                out.set(r, c, sum);
            }
        }
        out
    }
}

/// The N×N DCT coefficient matrix produced by [`DctMatrix::apply`].
pub struct Coefficients {
    n: usize,
    data: Vec<f32>,
}

impl Coefficients {
    pub fn get(&self, r: usize, c: usize) -> f32 {
        self.data[r * self.n + c]
    }

    pub fn n(&self) -> usize {
        self.n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_pixels(n: usize, value: f32) -> PixelMatrix {
        let mut data = Vec::with_capacity(n * n);
        for _ in 0..(n * n) {
            data.push(value);
        }
        // PixelMatrix's fields are private outside the module; build via preprocess.
        crate::hash::preprocess::preprocess_image(
            &image::DynamicImage::ImageLuma8(
                image::GrayImage::from_raw(n as u32, n as u32, data.iter().map(|&v| v as u8).collect()).unwrap(),
            ),
            n,
        )
        .unwrap()
    }

    #[test]
    fn flat_image_has_energy_only_in_dc_term() {
        let n = 8;
        let pixels = flat_pixels(n, 100.0);
        let dct = DctMatrix::new(n);
        let coeffs = dct.apply(&pixels);

        let dc = coeffs.get(0, 0);
        assert!(dc.abs() > 1.0);

        for r in 0..n {
            for c in 0..n {
                if (r, c) != (0, 0) {
                    assert!(coeffs.get(r, c).abs() < 1e-2, "expected ~0 at ({r},{c}), got {}", coeffs.get(r, c));
                }
            }
        }
    }

    #[test]
    fn basis_is_built_once_and_reusable() {
        let dct = DctMatrix::new(8);
        let flat = flat_pixels(8, 50.0);
        let a = dct.apply(&flat);
        let b = dct.apply(&flat);
        assert_eq!(a.get(0, 0), b.get(0, 0));
    }
}
