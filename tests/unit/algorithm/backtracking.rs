//! Tests for the residual rotation search against a minimal host

#[cfg(test)]
mod tests {
    use looptile::algorithm::backtracking::{Backtracker, SearchHost};
    use looptile::algorithm::verification::all_fit;
    use looptile::io::puzzle::parse_puzzle;
    use looptile::spatial::grid::Grid;
    use looptile::spatial::tiles::Tile;

    struct TestHost {
        grid: Grid,
        verifications: usize,
        visited: Vec<usize>,
    }

    impl TestHost {
        fn new(text: &str) -> Self {
            Self {
                grid: parse_puzzle(text).unwrap(),
                verifications: 0,
                visited: Vec::new(),
            }
        }

        fn masks(&self) -> Vec<u8> {
            self.grid.tiles().map(Tile::mask).collect()
        }
    }

    impl SearchHost for TestHost {
        fn grid(&self) -> &Grid {
            &self.grid
        }

        fn rotate_clockwise(&mut self, index: usize) {
            if let Some(tile) = self.grid.tile_at_mut(index) {
                tile.rotate_clockwise();
            }
        }

        fn restore(&mut self, index: usize, tile: Tile) {
            self.grid.set_tile_at(index, tile);
        }

        fn verify(&mut self) -> bool {
            self.verifications += 1;
            if !all_fit(&self.grid) {
                return false;
            }
            for tile in self.grid.tiles_mut() {
                tile.set_solved(true);
            }
            true
        }

        fn visit(&mut self, index: usize) {
            self.visited.push(index);
        }
    }

    // Tests the search finds rotations for a puzzle propagation can't settle
    // Verified by returning after the first orientation of each tile
    #[test]
    fn test_search_solves_open_puzzle() {
        let mut host = TestHost::new("000\n448\n212");
        let residual: Vec<usize> = (0..host.grid.total()).collect();
        let mut search = Backtracker::new(residual, None);

        assert!(search.search(&mut host));
        assert!(all_fit(&host.grid));
        assert!(host.grid.is_solved());
        assert!(!search.is_exhausted());
        assert!(search.nodes() > 1);
        assert_eq!(host.visited.first(), Some(&0));
    }

    // Tests an unsolvable search restores every tile
    // Verified by skipping the restore after the last orientation
    #[test]
    fn test_failed_search_restores_tiles() {
        let mut host = TestHost::new("15");
        let before = host.masks();
        let mut search = Backtracker::new(vec![0, 1], None);

        assert!(!search.search(&mut host));
        assert_eq!(host.masks(), before);
        assert!(host.grid.tiles().all(|tile| !tile.is_solved()));
    }

    // Tests an empty residual defers straight to the verifier
    // Verified by returning false for an empty residual
    #[test]
    fn test_empty_residual_verifies() {
        let mut host = TestHost::new("28");
        let mut search = Backtracker::new(Vec::new(), None);

        assert!(search.search(&mut host));
        assert_eq!(host.verifications, 1);
        assert_eq!(search.nodes(), 1);
        assert!(search.residual().is_empty());
    }

    // Tests the node budget stops the search and reports exhaustion
    // Verified by ignoring the budget
    #[test]
    fn test_node_budget() {
        let mut host = TestHost::new("000\n448\n212");
        let before = host.masks();
        let residual: Vec<usize> = (0..host.grid.total()).collect();
        let mut search = Backtracker::new(residual, Some(1));

        assert!(!search.search(&mut host));
        assert!(search.is_exhausted());
        assert_eq!(search.nodes(), 2);
        assert_eq!(host.masks(), before);
    }

    // Tests solved tiles in the residual are passed over
    // Verified by rotating solved tiles
    #[test]
    fn test_solved_tiles_are_skipped() {
        let mut host = TestHost::new("28");
        if let Some(tile) = host.grid.tile_at_mut(0) {
            tile.set_solved(true);
        }
        let mut search = Backtracker::new(vec![0, 1], None);

        assert!(search.search(&mut host));
        assert_eq!(host.masks(), vec![0b0010, 0b1000]);
        assert!(!host.visited.contains(&0));
    }

    struct DeepHost {
        grid: Grid,
        verifications: usize,
        accept_after: usize,
    }

    impl SearchHost for DeepHost {
        fn grid(&self) -> &Grid {
            &self.grid
        }

        fn rotate_clockwise(&mut self, index: usize) {
            if let Some(tile) = self.grid.tile_at_mut(index) {
                tile.rotate_clockwise();
            }
        }

        fn restore(&mut self, index: usize, tile: Tile) {
            self.grid.set_tile_at(index, tile);
        }

        fn verify(&mut self) -> bool {
            self.verifications += 1;
            self.verifications > self.accept_after
        }
    }

    // Tests a residual set far deeper than the call stack allows is searched to the end
    // Verified by recursing once per residual tile
    #[test]
    fn test_deep_residual_does_not_recurse() {
        let grid = Grid::new(1_000, 200).unwrap();
        let depth = grid.total();
        let mut host = DeepHost {
            grid,
            verifications: 0,
            accept_after: depth,
        };
        let mut search = Backtracker::new((0..depth).collect(), None);

        assert!(search.search(&mut host));
        assert_eq!(search.nodes(), depth + 1);
        assert_eq!(host.verifications, depth + 1);
    }
}
