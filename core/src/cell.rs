use serde::{Deserialize, Serialize};

/// One grid position.
///
/// `neighbor_count` is only meaningful for cells without a mine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub neighbor_count: u8,
}

impl Cell {
    /// Whether a reveal targeting this cell may change it.
    pub const fn is_revealable(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    pub const fn view(self) -> CellView {
        if self.is_flagged {
            CellView::Flagged
        } else if !self.is_revealed {
            CellView::Hidden
        } else if self.is_mine {
            CellView::Mine
        } else if self.neighbor_count == 0 {
            CellView::Empty
        } else {
            CellView::Number(self.neighbor_count)
        }
    }
}

/// What the player gets to see for a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Mine,
    Empty,
    Number(u8),
}

impl CellView {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Mine | Self::Empty | Self::Number(_))
    }
}
