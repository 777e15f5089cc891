use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a renderer needs to draw one frame of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub session_id: SessionId,
    pub size: Coord2,
    pub cells: Array2<CellView>,
    pub status: GameStatus,
    pub elapsed_secs: u32,
    pub mines_left: i32,
}

impl Snapshot {
    pub fn from_session(session: &GameSession) -> Self {
        let board = session.board();
        let size = board.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), CellView::Hidden);
        for coords in board.positions() {
            cells[coords.to_nd_index()] = board[coords].view();
        }

        Self {
            session_id: session.id(),
            size,
            cells,
            status: session.status(),
            elapsed_secs: session.elapsed_secs(),
            mines_left: session.mines_left(),
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }

    pub fn rows(&self) -> impl Iterator<Item = (Coord, impl Iterator<Item = (Coord2, CellView)> + '_)> + '_ {
        let (rows, cols) = self.size;
        (0..rows).map(move |row| {
            let cells = (0..cols).map(move |col| ((row, col), self.cell_at((row, col))));
            (row, cells)
        })
    }
}
