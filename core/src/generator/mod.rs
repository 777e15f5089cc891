use crate::*;
pub use random::*;

mod random;

/// Strategy for laying mines on a board once the first reveal target is known.
pub trait MinePlacer {
    /// Places up to `mine_count` mines anywhere except `exclude`, returning how many were placed.
    fn place_mines(self, board: &mut Board, exclude: Coord2, mine_count: CellCount) -> CellCount;
}
