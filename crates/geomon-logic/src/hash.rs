//! Deterministic cell hash, the engine's only source of randomness.
//!
//! Every spawn decision reduces to `cell_hash(a, b, timeShift)`: two integer
//! grid coordinates and a time-bucket seed folded into one 32-bit seed with
//! large prime multipliers, then mixed once with a mulberry32-style scramble
//! and normalized to [0,1). The prime fold decorrelates neighboring cells.
//!
//! All arithmetic up to the final normalization is 32-bit wrapping integer
//! math, so identical inputs give identical outputs on every platform.

/// Prime multipliers for the seed fold. Widely used for 2D/3D spatial
/// hashing; the third decorrelates the time bucket from the grid axes.
const PRIME_X: i32 = 73_856_093;
const PRIME_Y: i32 = 19_349_663;
const PRIME_T: i32 = 83_492_791;

/// One sample of a mulberry32 generator seeded with `seed`.
///
/// Returns a value in [0,1) with 32 bits of state mixed through two
/// multiply/xor-shift rounds.
fn mulberry32(seed: u32) -> f64 {
    let mut t = seed.wrapping_add(0x6D2B_79F5);
    t = (t ^ (t >> 15)).wrapping_mul(t | 1);
    t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
    ((t ^ (t >> 14)) as f64) / 4_294_967_296.0
}

/// Hash an integer grid cell plus a time-bucket seed to a value in [0,1).
///
/// Deterministic: the same `(grid_x, grid_y, time_shift)` always produces
/// the same value. `time_shift` is typically the current hour bucket, plus
/// a salt to separate independent draw families (see [`crate::config`]).
pub fn cell_hash(grid_x: i32, grid_y: i32, time_shift: i32) -> f64 {
    let seed = grid_x.wrapping_mul(PRIME_X)
        ^ grid_y.wrapping_mul(PRIME_Y)
        ^ time_shift.wrapping_mul(PRIME_T);
    mulberry32(seed as u32)
}

/// Hash raw degree coordinates at the given cell resolution.
///
/// Floors `deg / cell_size_deg` on each axis, so every point inside one
/// cell hashes identically. The biome noise layers call this with
/// pre-scaled coordinates to sample at coarser resolutions.
pub fn coord_hash(lat: f64, lng: f64, time_shift: i32, cell_size_deg: f64) -> f64 {
    let grid_x = (lat / cell_size_deg).floor() as i32;
    let grid_y = (lng / cell_size_deg).floor() as i32;
    cell_hash(grid_x, grid_y, time_shift)
}
