//! Random grid-map generation for tests and benchmarks.

use rand::Rng;

use crate::core::GridCoord;

use super::map::{DenseGrid, OBSTACLE};

/// Generate a random 2D maze-like map.
///
/// Borders are always untraversable. Interior cells become obstacles
/// with a probability coupled to their already-decided left, upper,
/// and upper-left neighbors, which grows obstacles into wall-like
/// clusters instead of salt-and-pepper noise.
///
/// # Panics
/// Panics if `width` or `height` is below 3 (no interior).
pub fn random_maze_2d<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> DenseGrid {
    assert!(width >= 3 && height >= 3, "maze needs an interior");

    let mut grid = DenseGrid::new(&[width, height]);

    for x in 0..width as i32 {
        for y in 0..height as i32 {
            let coord = GridCoord::xy(x, y);

            if x == 0 || x == width as i32 - 1 || y == 0 || y == height as i32 - 1 {
                grid.set(&coord, OBSTACLE);
                continue;
            }

            let left = grid.get(&GridCoord::xy(x - 1, y)).unwrap_or(0) != 0;
            let up = grid.get(&GridCoord::xy(x, y - 1)).unwrap_or(0) != 0;
            let corner = grid.get(&GridCoord::xy(x - 1, y - 1)).unwrap_or(0) != 0;

            let probability = match (left, up, corner) {
                (true, true, true) => 0.6,
                (true, true, false) => 0.4,
                (true, false, true) => 0.3,
                (true, false, false) => 0.2,
                (false, true, true) => 0.3,
                (false, true, false) => 0.2,
                (false, false, true) => 0.0,
                (false, false, false) => 0.1,
            };

            if rng.gen_bool(probability) {
                grid.set(&coord, OBSTACLE);
            }
        }
    }

    grid
}
