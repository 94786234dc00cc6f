// Host-side tests for the background pixel pipeline.

use glass_core::background::{blur_and_dim, fallback_background, procedural_gradient};
use glass_core::constants::BACKGROUND_SIZE;

#[test]
fn gradient_is_deterministic_and_opaque() {
    let a = procedural_gradient(64);
    let b = procedural_gradient(64);
    assert_eq!(a, b);
    assert_eq!(a.len(), 64 * 64 * 4);
    for px in a.chunks_exact(4) {
        assert_eq!(px[3], 255);
    }
}

#[test]
fn blur_of_uniform_image_is_the_dimmed_value() {
    let size = 16;
    let mut pixels = vec![0u8; size * size * 4];
    for px in pixels.chunks_exact_mut(4) {
        px.copy_from_slice(&[200, 100, 50, 255]);
    }
    let out = blur_and_dim(&pixels, size);
    // A uniform image is a fixed point of the normalized convolution, so
    // only the 0.85 dim should show up (within rounding).
    for px in out.chunks_exact(4) {
        assert!((px[0] as i32 - 170).abs() <= 1, "r={}", px[0]);
        assert!((px[1] as i32 - 85).abs() <= 1, "g={}", px[1]);
        assert!((px[2] as i32 - 43).abs() <= 1, "b={}", px[2]);
        assert_eq!(px[3], 255);
    }
}

#[test]
fn blur_smooths_a_hard_edge() {
    let size = 8;
    let mut pixels = vec![0u8; size * size * 4];
    for y in 0..size {
        for x in 0..size {
            let i = (y * size + x) * 4;
            let v = if x < size / 2 { 255 } else { 0 };
            pixels[i] = v;
            pixels[i + 3] = 255;
        }
    }
    let out = blur_and_dim(&pixels, size);
    // Columns adjacent to the edge pick up contribution from both sides.
    let left_of_edge = out[(3 * size + 3) * 4];
    let right_of_edge = out[(3 * size + 4) * 4];
    assert!(left_of_edge < 217, "edge not smoothed on the bright side");
    assert!(right_of_edge > 0, "edge not smoothed on the dark side");
}

#[test]
fn gradient_handles_degenerate_sizes() {
    assert!(procedural_gradient(0).is_empty());

    let single = procedural_gradient(1);
    assert_eq!(single.len(), 4);
    assert_eq!(single[3], 255);
}

#[test]
fn fallback_background_has_the_fixed_size_and_is_reproducible() {
    let a = fallback_background(BACKGROUND_SIZE);
    let b = fallback_background(BACKGROUND_SIZE);
    assert_eq!(a.len(), BACKGROUND_SIZE * BACKGROUND_SIZE * 4);
    assert_eq!(a, b);
}
