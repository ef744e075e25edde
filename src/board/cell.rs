//! Board cells and their landing effects.

use serde::{Deserialize, Serialize};

use super::layout::GridPos;

/// What happens when a player lands on a cell and answers correctly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    /// First cell; every token starts here.
    Start,
    /// Last cell; reaching it wins.
    End,
    /// No effect.
    Normal,
    /// Advance a few cells.
    Lucky,
    /// Retreat a few cells.
    Bad,
    /// Skip the next turn.
    Freeze,
    /// Every other player retreats.
    Attack,
    /// Roll again.
    Again,
    /// Gain a one-shot shield.
    Shield,
    /// Jump straight to the End cell.
    WarpWin,
}

impl CellType {
    /// Start and End carry no random type.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, CellType::Start | CellType::End)
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CellType::Start => "start",
            CellType::End => "end",
            CellType::Normal => "normal",
            CellType::Lucky => "lucky",
            CellType::Bad => "bad",
            CellType::Freeze => "freeze",
            CellType::Attack => "attack",
            CellType::Again => "again",
            CellType::Shield => "shield",
            CellType::WarpWin => "warp_win",
        };
        f.write_str(name)
    }
}

/// One position on the path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Index along the path, 0 = Start.
    pub index: usize,
    /// Landing effect, fixed at generation time.
    pub kind: CellType,
    /// Set once a player has landed here and resolved the effect.
    pub revealed: bool,
    /// Set when a shield cancelled this cell's effect.
    pub blocked: bool,
    /// Grid coordinate for renderers.
    pub pos: GridPos,
}

impl Cell {
    /// An unrevealed cell.
    #[must_use]
    pub fn new(index: usize, kind: CellType, pos: GridPos) -> Self {
        Self {
            index,
            kind,
            revealed: false,
            blocked: false,
            pos,
        }
    }
}
