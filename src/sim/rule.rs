//! CPU reference of the transition rule
//!
//! Mirrors the WGSL kernel in `life.wgsl` exactly: standard Conway rules
//! over the 8-neighborhood with toroidal wrapping. The engine never runs
//! this on the hot path; it exists so the scheduling machinery can be
//! verified against known generations without GPU hardware.

/// Computes one generation. `cells` is row-major, one byte per cell in
/// {0, 1}; the result has the same layout.
pub fn next_generation(cells: &[u8], width: u32, height: u32) -> Vec<u8> {
    assert_eq!(cells.len(), (width * height) as usize);

    let (w, h) = (width as i64, height as i64);
    let mut next = vec![0u8; cells.len()];

    for y in 0..h {
        for x in 0..w {
            let mut neighbors = 0u32;
            for dy in -1..=1i64 {
                for dx in -1..=1i64 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = (x + dx).rem_euclid(w);
                    let ny = (y + dy).rem_euclid(h);
                    neighbors += cells[(ny * w + nx) as usize] as u32;
                }
            }

            let alive = cells[(y * w + x) as usize] == 1;
            let survives = alive && (neighbors == 2 || neighbors == 3);
            let born = !alive && neighbors == 3;
            next[(y * w + x) as usize] = (survives || born) as u8;
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_live(width: u32, height: u32, live: &[(u32, u32)]) -> Vec<u8> {
        let mut cells = vec![0u8; (width * height) as usize];
        for &(x, y) in live {
            cells[(y * width + x) as usize] = 1;
        }
        cells
    }

    #[test]
    fn test_empty_grid_stays_empty() {
        // No spontaneous life: a dead cell with zero neighbors stays dead.
        let cells = vec![0u8; 16];
        assert_eq!(next_generation(&cells, 4, 4), cells);
    }

    #[test]
    fn test_isolated_cells_die() {
        // Canonical 4x4 fixture: (0,0) and (2,2) are not neighbors, even
        // across the wrapped edges, so both die of isolation and nothing
        // has the three neighbors needed for a birth.
        let cells = grid_with_live(4, 4, &[(0, 0), (2, 2)]);
        assert_eq!(next_generation(&cells, 4, 4), vec![0u8; 16]);
    }

    #[test]
    fn test_diagonal_line_collapses_to_center() {
        // The diagonal (0,0),(1,1),(2,2): the endpoints each see one live
        // neighbor and die; the center sees two and survives alone.
        let cells = grid_with_live(4, 4, &[(0, 0), (1, 1), (2, 2)]);
        let expected = grid_with_live(4, 4, &[(1, 1)]);
        assert_eq!(next_generation(&cells, 4, 4), expected);
    }

    #[test]
    fn test_block_is_still_life() {
        let block = grid_with_live(6, 6, &[(2, 2), (3, 2), (2, 3), (3, 3)]);
        assert_eq!(next_generation(&block, 6, 6), block);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = grid_with_live(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        let vertical = grid_with_live(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        assert_eq!(next_generation(&horizontal, 5, 5), vertical);
        assert_eq!(next_generation(&vertical, 5, 5), horizontal);
    }
}
