use super::*;

/// Fills the grid left to right, top to bottom, giving each cell a pumpkin with odds
/// `remaining_mines / remaining_cells`.
///
/// The odds become certain once the remaining mines match the remaining cells and drop to zero once every mine is
/// placed, so the placed count always equals the requested one.
#[derive(Clone, Debug, PartialEq)]
pub struct RunningOddsGenerator {
    seed: u64,
}

impl RunningOddsGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RunningOddsGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use ndarray::Array2;
        use rand::prelude::*;

        let total_cells = config.total_cells();
        let requested = config.mines.min(total_cells);
        if requested < config.mines {
            log::warn!(
                "Grid too small, requested {} mines but only fits {}",
                config.mines,
                total_cells
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_mask: Array2<bool> = Array2::default(config.dim().to_nd_index());
        let mut placed: CellCount = 0;

        // logical iteration order is row-major
        for (visited, slot) in mine_mask.iter_mut().enumerate() {
            let remaining_mines = requested - placed;
            if remaining_mines == 0 {
                break;
            }
            let remaining_cells = u32::from(total_cells) - visited as u32;
            if rng.random_ratio(remaining_mines.into(), remaining_cells) {
                *slot = true;
                placed += 1;
            }
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        if layout.mine_count() != requested {
            log::warn!(
                "Generated grid count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                requested
            );
        }
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mines() {
        for seed in 0..64 {
            for (size, mines) in [(10, 10), (8, 1), (2, 3), (16, 40), (5, 24)] {
                let config = GameConfig::new(size, mines);
                let layout = RunningOddsGenerator::new(seed).generate(config);
                assert_eq!(layout.mine_count(), config.mines, "seed {seed}");
                assert_eq!(layout.size(), (config.size, config.size));
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::default();
        let a = RunningOddsGenerator::new(42).generate(config);
        let b = RunningOddsGenerator::new(42).generate(config);
        assert_eq!(a, b);
    }

    #[test]
    fn full_grid_request_is_capped() {
        let config = GameConfig::new_unchecked(3, 20);
        let layout = RunningOddsGenerator::new(7).generate(config);
        assert_eq!(layout.mine_count(), 9);
    }

    #[test]
    fn mines_are_spread_across_the_grid() {
        let config = GameConfig::new(10, 50);
        let mut last_row_hits = 0;
        for seed in 0..32 {
            let layout = RunningOddsGenerator::new(seed).generate(config);
            last_row_hits += (0..10).filter(|&col| layout[(9, col)]).count();
        }
        // the last row should get roughly half of its cells, never none
        assert!(last_row_hits > 0);
    }
}
