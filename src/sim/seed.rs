//! Initial grid seeding
//!
//! The starting configuration sets `round((w*h)^0.9)` cells alive at
//! positions drawn uniformly at random *with replacement*. A position can
//! be drawn more than once, so the live count after seeding is at most
//! the target and is itself random. That undercount is part of the
//! contract: larger grids deliberately start proportionally sparser, and
//! sampling without replacement would change the documented behavior.

use rand::Rng;

/// Nominal number of live cells for a `width x height` grid.
///
/// Sub-linear in the cell count: `round((w*h)^0.9)`.
pub fn live_cell_target(width: u32, height: u32) -> usize {
    let cells = (width as f64) * (height as f64);
    cells.powf(0.9).round() as usize
}

/// Produces the initial cell grid, one byte per cell in {0, 1}.
pub fn seed(width: u32, height: u32) -> Vec<u8> {
    let cell_count = (width * height) as usize;
    let mut cells = vec![0u8; cell_count];

    let mut rng = rand::rng();
    for _ in 0..live_cell_target(width, height) {
        let position = rng.random_range(0..cell_count);
        cells[position] = 1;
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_length_and_values() {
        let cells = seed(32, 16);
        assert_eq!(cells.len(), 32 * 16);
        assert!(cells.iter().all(|&cell| cell == 0 || cell == 1));
    }

    #[test]
    fn test_live_count_bounded_by_target() {
        let cells = seed(64, 64);
        let live = cells.iter().filter(|&&cell| cell == 1).count();
        assert!(live > 0);
        assert!(live <= live_cell_target(64, 64));
    }

    #[test]
    fn test_single_cell_grid_seeds_alive() {
        // 1^0.9 == 1, so the smallest grid always starts alive.
        assert_eq!(seed(1, 1), vec![1]);
    }

    #[test]
    fn test_target_is_sublinear() {
        assert_eq!(live_cell_target(4, 4), 12);
        // 1024x1024: 2^20 cells but only ~2^18 live targets.
        let target = live_cell_target(1024, 1024);
        assert!(target < 1024 * 1024 / 2);
        assert_eq!(target, (1048576f64.powf(0.9)).round() as usize);
    }
}
