//! Tests for strict and relaxed fit checks and the whole-grid scan

#[cfg(test)]
mod tests {
    use looptile::algorithm::verification::{
        all_fit, find_misfit, fits_current_state, fits_solved_neighbours,
    };
    use looptile::io::puzzle::parse_puzzle;
    use looptile::spatial::grid::Position;

    // Tests matching connectors fit and connectors facing the edge don't
    // Verified by treating the boundary as connectible
    #[test]
    fn test_fits_current_state() {
        let joined = parse_puzzle("28").unwrap();
        assert!(fits_current_state(&joined, Position::new(0, 0)));
        assert!(fits_current_state(&joined, Position::new(1, 0)));

        let off_edge = parse_puzzle("12").unwrap();
        assert!(!fits_current_state(&off_edge, Position::new(0, 0)));
        assert!(!fits_current_state(&off_edge, Position::new(1, 0)));
    }

    // Tests fit is symmetric between neighbours
    // Verified by comparing the tile's side with the neighbour's same side
    #[test]
    fn test_fit_is_symmetric() {
        let grid = parse_puzzle("6c\n39").unwrap();
        for position in grid.positions() {
            assert!(fits_current_state(&grid, position), "{position}");
        }

        let broken = parse_puzzle("6c\n38").unwrap();
        assert!(!fits_current_state(&broken, Position::new(1, 0)));
        assert!(!fits_current_state(&broken, Position::new(1, 1)));
    }

    // Tests the relaxed check skips unsolved neighbours but not solved ones
    // Verified by checking every neighbour in the relaxed check
    #[test]
    fn test_fits_solved_neighbours() {
        let mut grid = parse_puzzle("20").unwrap();
        let left = Position::new(0, 0);
        assert!(!fits_current_state(&grid, left));
        assert!(fits_solved_neighbours(&grid, left));

        if let Some(tile) = grid.tile_mut(1, 0) {
            tile.set_solved(true);
        }
        assert!(!fits_solved_neighbours(&grid, left));
    }

    // Tests the relaxed check still rejects connectors facing the edge
    // Verified by skipping the boundary in the relaxed check
    #[test]
    fn test_relaxed_check_keeps_boundary() {
        let grid = parse_puzzle("10").unwrap();
        assert!(!fits_solved_neighbours(&grid, Position::new(0, 0)));
    }

    // Tests the grid scan reports the first misfit in row-major order
    // Verified by scanning backwards
    #[test]
    fn test_find_misfit_scans_row_major() {
        let grid = parse_puzzle("1001").unwrap();
        assert_eq!(find_misfit(&grid), Some(Position::new(0, 0)));
        assert!(!all_fit(&grid));

        let blank = parse_puzzle("0000").unwrap();
        assert_eq!(find_misfit(&blank), None);
        assert!(all_fit(&blank));
    }
}
