use alloc::vec::Vec;

use super::*;

/// Uniform placement that never puts a mine on the excluded cell.
///
/// Samples without replacement with a partial Fisher-Yates shuffle over the free cells, so the cost is bounded by the
/// board size no matter how dense the minefield is.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinePlacer {
    seed: u64,
}

impl RandomMinePlacer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place_mines(self, board: &mut Board, exclude: Coord2, mine_count: CellCount) -> CellCount {
        use rand::prelude::*;

        let mut candidates: Vec<Coord2> = board
            .positions()
            .filter(|&pos| pos != exclude && !board[pos].is_mine)
            .collect();

        let wanted = usize::from(mine_count);
        if wanted > candidates.len() {
            log::warn!(
                "Minefield already full, requested {} mines but only {} cells are free",
                mine_count,
                candidates.len()
            );
        }
        let count = wanted.min(candidates.len());

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in 0..count {
            let pick = rng.random_range(i..candidates.len());
            candidates.swap(i, pick);
            board[candidates[i]].is_mine = true;
        }

        log::debug!("Placed {} mines avoiding {:?}", count, exclude);
        count as CellCount
    }
}
