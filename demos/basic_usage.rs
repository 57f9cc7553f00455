//! Basic usage example for imgdupl
//!
//! Hashes three in-memory images and checks whether they'd land in the
//! same cluster at a given Hamming threshold, without touching SQLite or
//! spawning the worker pool.

use image::{DynamicImage, RgbImage};
use imgdupl::distance;
use imgdupl::hash::Hasher;

fn main() {
    let hasher = Hasher::default_config();

    let a = DynamicImage::ImageRgb8(RgbImage::from_pixel(256, 256, image::Rgb([40, 40, 40])));
    let b = DynamicImage::ImageRgb8(RgbImage::from_pixel(256, 256, image::Rgb([60, 60, 60])));
    let c = DynamicImage::ImageRgb8(RgbImage::from_fn(256, 256, |x, y| {
        image::Rgb([((x + y) % 256) as u8, 0, 0])
    }));

    let (ok_a, hash_a) = hasher.hash_image(&a);
    let (ok_b, hash_b) = hasher.hash_image(&b);
    let (ok_c, hash_c) = hasher.hash_image(&c);
    assert!(ok_a && ok_b && ok_c);

    println!("a: {hash_a}");
    println!("b: {hash_b}");
    println!("c: {hash_c}");

    let threshold = 10;
    println!(
        "hamming(a, b) = {} ({})",
        distance::hamming(&hash_a, &hash_b),
        if distance::within(&hash_a, &hash_b, threshold) {
            "same cluster"
        } else {
            "different clusters"
        }
    );
    println!(
        "hamming(a, c) = {} ({})",
        distance::hamming(&hash_a, &hash_c),
        if distance::within(&hash_a, &hash_c, threshold) {
            "same cluster"
        } else {
            "different clusters"
        }
    );
}
