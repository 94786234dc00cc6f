use smallvec::SmallVec;

use crate::constants::LOOKUP_WIDTH;

/// Ordered column boundaries over [0, 1]. Always starts at exactly 0.0 and
/// ends at exactly 1.0, with `columns - 1` interior boundaries in between.
pub type BoundaryArray = SmallVec<[f64; 16]>;

const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;
const WEIGHT_FLOOR: f64 = 0.1;

#[inline]
fn lcg_next(state: u32) -> u32 {
    state.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT)
}

/// Partition [0, 1] into `count` columns of pseudo-random widths.
///
/// The same `(count, variation, seed)` triple always yields a bit-identical
/// array: the lookup texture bake and tests both rely on that. `variation`
/// spreads the column weights around 1.0; the floor keeps every column from
/// degenerating to zero or negative width.
pub fn generate_column_boundaries(count: u32, variation: f64, seed: u32) -> BoundaryArray {
    let mut state = seed;
    let mut weights: SmallVec<[f64; 16]> = SmallVec::new();
    let mut total_weight = 0.0f64;
    for _ in 0..count {
        state = lcg_next(state);
        let random = state as f64 / 4_294_967_296.0;
        let weight = (1.0 + (random - 0.5) * variation).max(WEIGHT_FLOOR);
        total_weight += weight;
        weights.push(weight);
    }

    let mut boundaries = BoundaryArray::new();
    boundaries.push(0.0);
    let mut pos = 0.0f64;
    for weight in weights.iter().take(weights.len().saturating_sub(1)) {
        pos += weight / total_weight;
        boundaries.push(pos);
    }
    boundaries.push(1.0);
    boundaries
}

/// Bake boundaries into a single-row RGBA lookup table of `width` texels.
///
/// The red channel of texel `i` holds the index of the column owning the
/// horizontal position `i / (width - 1)`; alpha is fully opaque. Boundaries
/// are sorted ascending, so one monotone cursor suffices for the whole row.
pub fn build_lookup_table(boundaries: &[f64], width: usize) -> Vec<u8> {
    let mut data = vec![0u8; width * 4];
    let last_step = boundaries.len().saturating_sub(2);
    let mut column = 0usize;
    for i in 0..width {
        let u = i as f64 / (width - 1) as f64;
        while column < last_step && u >= boundaries[column + 1] {
            column += 1;
        }
        data[i * 4] = column as u8;
        data[i * 4 + 3] = 255;
    }
    data
}

/// Column index stored at texel `i` of a baked lookup table.
#[inline]
pub fn lookup_index_at(table: &[u8], i: usize) -> u8 {
    table[i * 4]
}

/// Convenience wrapper used by instance setup: generate and bake in one go.
pub fn bake_column_lookup(count: u32, variation: f64, seed: u32) -> Vec<u8> {
    let boundaries = generate_column_boundaries(count, variation, seed);
    build_lookup_table(&boundaries, LOOKUP_WIDTH)
}
