use alloc::collections::BTreeSet;
use alloc::vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Board where every cell is hidden, unflagged and mine-free.
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    /// Builds a board with mines at the given positions and neighbor counts already computed.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size);
        for &coords in mine_coords {
            board.validate_coords(coords)?;
            board[coords].is_mine = true;
        }
        board.compute_neighbor_counts();
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // boards are only ever built from a `Coord2`
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.contains(coords).then(|| self[coords])
    }

    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size())
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_cells(|cell| cell.is_mine)
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.count_cells(|cell| cell.is_revealed && !cell.is_mine)
    }

    fn count_cells(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        // cell totals are bounded by `mult`, which already fits the count type
        self.cells.iter().filter(|&cell| predicate(cell)).count() as CellCount
    }

    /// Number of mines in the edge-clipped neighborhood of `coords`.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.neighbors(coords).filter(|&pos| self[pos].is_mine).count() as u8
    }

    pub fn compute_neighbor_counts(&mut self) {
        for coords in self.positions() {
            if !self[coords].is_mine {
                self[coords].neighbor_count = self.adjacent_mine_count(coords);
            }
        }
    }

    /// Reveals a cell, flooding through zero-count cells, and returns how many cells were newly revealed.
    ///
    /// Out of bounds, flagged, and already revealed targets are left alone. Flooding stops at numbered cells and never
    /// touches flagged ones, so a mine is only ever revealed when it is the target itself.
    pub fn reveal(&mut self, coords: Coord2) -> CellCount {
        if !self.get(coords).is_some_and(Cell::is_revealable) {
            return 0;
        }

        let mut revealed = 0;
        let mut visited = BTreeSet::from([coords]);
        let mut to_visit = vec![coords];

        while let Some(visit_coords) = to_visit.pop() {
            let cell = &mut self[visit_coords];
            if !cell.is_revealable() {
                continue;
            }
            cell.is_revealed = true;
            revealed += 1;

            if cell.is_mine || cell.neighbor_count > 0 {
                continue;
            }

            log::trace!("Flood from {:?}", visit_coords);
            for pos in self.neighbors(visit_coords) {
                if self[pos].is_revealable() && visited.insert(pos) {
                    to_visit.push(pos);
                }
            }
        }

        log::debug!("Revealed {} cell(s) from {:?}", revealed, coords);
        revealed
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        let Some(cell) = self.get(coords) else {
            return MarkOutcome::NoChange;
        };
        if cell.is_revealed {
            return MarkOutcome::NoChange;
        }

        let cell = &mut self[coords];
        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            MarkOutcome::Flagged
        } else {
            MarkOutcome::Unflagged
        }
    }

    /// Marks every mine as revealed, leaving all other cells untouched.
    pub fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine) {
            cell.is_revealed = true;
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    fn revealed(board: &Board) -> Vec<Coord2> {
        board
            .positions()
            .filter(|&pos| board[pos].is_revealed)
            .collect()
    }

    #[test]
    fn empty_board_has_pristine_cells() {
        let board = Board::new((9, 9));

        assert_eq!(board.size(), (9, 9));
        assert_eq!(board.total_cells(), 81);
        assert!(board.cells().all(|&cell| cell == Cell::default()));
    }

    #[test]
    fn from_mine_coords_rejects_out_of_bounds() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn neighbor_counts_are_edge_clipped() {
        // M . .
        // . . .
        // . . M
        let board = board((3, 3), &[(0, 0), (2, 2)]);

        assert_eq!(board[(0, 1)].neighbor_count, 1);
        assert_eq!(board[(1, 1)].neighbor_count, 2);
        assert_eq!(board[(0, 2)].neighbor_count, 0);
        assert_eq!(board[(2, 0)].neighbor_count, 0);
        assert_eq!(board[(1, 2)].neighbor_count, 1);
    }

    #[test]
    fn neighbor_counts_match_brute_force_count() {
        let mines = [(0, 3), (1, 1), (1, 2), (3, 0), (4, 4), (2, 4)];
        let board = board((5, 6), &mines);

        for pos in board.positions().filter(|&pos| !board[pos].is_mine) {
            let expected = mines
                .iter()
                .filter(|&&(row, col)| {
                    (row, col) != pos && row.abs_diff(pos.0) <= 1 && col.abs_diff(pos.1) <= 1
                })
                .count() as u8;
            assert_eq!(board[pos].neighbor_count, expected, "at {:?}", pos);
        }
    }

    #[test]
    fn reveal_numbered_cell_does_not_flood() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.reveal((1, 1)), 1);
        assert_eq!(revealed(&board), [(1, 1)]);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut board = board((3, 3), &[(0, 0)]);

        board.reveal((2, 2));
        let before = board.clone();

        assert_eq!(board.reveal((2, 2)), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn reveal_out_of_bounds_is_noop() {
        let mut board = board((2, 2), &[]);

        assert_eq!(board.reveal((2, 0)), 0);
        assert_eq!(board.reveal((0, 9)), 0);
        assert_eq!(board.revealed_safe_count(), 0);
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        // . . . . .
        // . . . . .
        // . . . . .
        // . . . . M
        let mut board = board((4, 5), &[(3, 4)]);

        board.reveal((0, 0));

        for pos in board.positions() {
            let cell = board[pos];
            assert_eq!(cell.is_revealed, !cell.is_mine, "at {:?}", pos);
        }
        assert_eq!(board.revealed_safe_count(), 19);
    }

    #[test]
    fn flood_fill_does_not_cross_a_wall_of_numbers() {
        // . . M . .
        // . . M . .
        // . . M . .
        let mut board = board((3, 5), &[(0, 2), (1, 2), (2, 2)]);

        board.reveal((1, 0));

        let opened = revealed(&board);
        assert_eq!(opened.len(), 6);
        assert!(opened.iter().all(|&(_, col)| col < 2));
        assert!(!board[(0, 2)].is_revealed);
        assert!(!board[(1, 4)].is_revealed);
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut board = board((3, 3), &[]);

        board.toggle_flag((2, 2));
        board.reveal((0, 0));

        assert!(!board[(2, 2)].is_revealed);
        assert!(board[(2, 2)].is_flagged);
        assert_eq!(board.revealed_safe_count(), 8);
    }

    #[test]
    fn flood_fill_never_reveals_mines() {
        let mines = [(0, 4), (3, 3), (5, 0), (6, 6)];
        let mut board = board((7, 7), &mines);

        board.reveal((0, 0));

        assert!(mines.iter().all(|&pos| !board[pos].is_revealed));
        assert!(board.revealed_safe_count() > 1);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let mut board = board((2, 2), &[]);

        assert_eq!(board.toggle_flag((0, 0)), MarkOutcome::Flagged);
        assert_eq!(board.reveal((0, 0)), 0);
        assert!(!board[(0, 0)].is_revealed);
    }

    #[test]
    fn toggle_flag_twice_restores_cell() {
        let mut board = board((2, 2), &[(1, 1)]);

        assert_eq!(board.toggle_flag((1, 1)), MarkOutcome::Flagged);
        assert!(board[(1, 1)].is_flagged);
        assert_eq!(board.toggle_flag((1, 1)), MarkOutcome::Unflagged);
        assert!(!board[(1, 1)].is_flagged);
    }

    #[test]
    fn toggle_flag_ignores_revealed_and_out_of_bounds() {
        let mut board = board((2, 2), &[(1, 1)]);

        board.reveal((0, 0));

        assert_eq!(board.toggle_flag((0, 0)), MarkOutcome::NoChange);
        assert_eq!(board.toggle_flag((5, 5)), MarkOutcome::NoChange);
        assert!(board.cells().all(|cell| !cell.is_flagged));
    }

    #[test]
    fn reveal_all_mines_leaves_other_cells_alone() {
        let mut board = board((3, 3), &[(0, 0), (2, 1)]);
        board.toggle_flag((1, 1));
        board.reveal((0, 2));
        let before = board.clone();

        board.reveal_all_mines();

        for pos in board.positions() {
            if board[pos].is_mine {
                assert!(board[pos].is_revealed);
            } else {
                assert_eq!(board[pos], before[pos]);
            }
        }
    }
}
