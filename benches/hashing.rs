use criterion::{black_box, criterion_group, criterion_main, Criterion};
use imgdupl::distance;
use imgdupl::hash::Hasher;
use image::{DynamicImage, RgbImage};
use smallvec::SmallVec;

fn sample_image(seed: u8) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(256, 256, |x, y| {
        image::Rgb([
            ((x as u32 + seed as u32) % 256) as u8,
            ((y as u32 + seed as u32) % 256) as u8,
            seed,
        ])
    }))
}

fn bench_hash_image(c: &mut Criterion) {
    let hasher = Hasher::default_config();
    let image = sample_image(42);

    c.bench_function("hash_image_256x256", |b| {
        b.iter(|| black_box(hasher.hash_image(black_box(&image))))
    });
}

fn bench_hamming(c: &mut Criterion) {
    let a = imgdupl::model::PHash::from_words(SmallVec::from_slice(&[0xDEAD_BEEF_u64, 0x1234_5678]));
    let b = imgdupl::model::PHash::from_words(SmallVec::from_slice(&[0xBEEF_DEAD_u64, 0x8765_4321]));

    c.bench_function("hamming_2_words", |bencher| {
        bencher.iter(|| black_box(distance::hamming(black_box(&a), black_box(&b))))
    });
}

criterion_group!(benches, bench_hash_image, bench_hamming);
criterion_main!(benches);
