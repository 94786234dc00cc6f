//! Pixel half of the background preprocessor.
//!
//! The expensive part of compositing a background is the blur. It runs once
//! here at setup time over a fixed-size RGBA buffer; per-frame cost is then
//! a plain texture sample. The web layer supplies decoded image pixels, or
//! falls back to the procedural gradient when the asset cannot be loaded.

use crate::constants::BACKGROUND_DIM;

/// Deterministic fallback texture: a soft gradient from sine functions of
/// the normalized coordinates. Same `size` always yields identical bytes.
pub fn procedural_gradient(size: usize) -> Vec<u8> {
    let mut data = vec![0u8; size * size * 4];
    let denom = size.saturating_sub(1).max(1) as f32;
    for y in 0..size {
        let v = y as f32 / denom;
        for x in 0..size {
            let u = x as f32 / denom;
            let r = 0.5 + 0.5 * (u * std::f32::consts::TAU).sin() * (v * std::f32::consts::PI).cos();
            let g = 0.5 + 0.5 * ((u + v) * std::f32::consts::PI).sin();
            let b = 0.6 + 0.4 * (v * std::f32::consts::TAU).cos();
            let i = (y * size + x) * 4;
            data[i] = to_byte(r);
            data[i + 1] = to_byte(g);
            data[i + 2] = to_byte(b);
            data[i + 3] = 255;
        }
    }
    data
}

/// One 3x3 convolution pass with inverse-square-distance weights,
/// normalized by the total weight, edges clamped. Color channels are dimmed
/// afterwards; alpha stays opaque.
pub fn blur_and_dim(pixels: &[u8], size: usize) -> Vec<u8> {
    debug_assert_eq!(pixels.len(), size * size * 4);
    let mut out = vec![0u8; pixels.len()];
    let last = size as i32 - 1;
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let mut acc = [0.0f32; 3];
            let mut total_weight = 0.0f32;
            for dy in -1..=1i32 {
                for dx in -1..=1i32 {
                    let weight = 1.0 / (1.0 + (dx * dx + dy * dy) as f32);
                    let sx = (x + dx).clamp(0, last) as usize;
                    let sy = (y + dy).clamp(0, last) as usize;
                    let s = (sy * size + sx) * 4;
                    for c in 0..3 {
                        acc[c] += weight * pixels[s + c] as f32;
                    }
                    total_weight += weight;
                }
            }
            let d = (y as usize * size + x as usize) * 4;
            for c in 0..3 {
                out[d + c] = ((acc[c] / total_weight) * BACKGROUND_DIM).round() as u8;
            }
            out[d + 3] = 255;
        }
    }
    out
}

/// Fallback path end to end: gradient plus the one-time blur pass. Used when
/// no image bytes could be obtained.
pub fn fallback_background(size: usize) -> Vec<u8> {
    blur_and_dim(&procedural_gradient(size), size)
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
