//! The board: an ordered path of cells.
//!
//! ## Invariants
//!
//! - At least two cells
//! - `cells[0]` is Start, the last cell is End, no other cell is either
//! - Cell types never change after construction; only the `revealed`
//!   and `blocked` indicators do
//!
//! Boards come from [`generate_board`] or, for scripted scenarios, from
//! [`Board::from_kinds`].

mod cell;
mod generator;
mod layout;

pub use cell::{Cell, CellType};
pub use generator::{generate_board, BoardGenerator};
pub use layout::{serpentine_path, GridPos};

use serde::{Deserialize, Serialize};

use crate::core::{EngineResult, GameError};

/// Ordered path of cells from Start to End.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    /// Wrap cells the generator already laid out.
    pub(crate) fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Build a board from explicit cell types, laid out `columns` wide.
    ///
    /// ```
    /// use rust_quizboard::board::{Board, CellType};
    ///
    /// let board = Board::from_kinds(
    ///     [CellType::Start, CellType::Lucky, CellType::End],
    ///     8,
    /// ).unwrap();
    /// assert_eq!(board.last_index(), 2);
    /// ```
    pub fn from_kinds(kinds: impl IntoIterator<Item = CellType>, columns: usize) -> EngineResult<Self> {
        let kinds: Vec<CellType> = kinds.into_iter().collect();
        let length = kinds.len();
        if length < 2 {
            return Err(GameError::InvalidBoard(format!("{length} cells, need at least 2")));
        }
        if kinds[0] != CellType::Start || kinds[length - 1] != CellType::End {
            return Err(GameError::InvalidBoard("path must run from Start to End".into()));
        }
        if let Some(i) = (1..length - 1).find(|&i| kinds[i].is_terminal()) {
            return Err(GameError::InvalidBoard(format!(
                "interior cell {i} is {}",
                kinds[i]
            )));
        }

        let columns = columns.max(1);
        let rows = length.div_ceil(columns);
        let cells = serpentine_path(rows, columns)
            .into_iter()
            .zip(kinds)
            .enumerate()
            .map(|(index, (pos, kind))| Cell::new(index, kind, pos))
            .collect();
        Ok(Self { cells })
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a valid board.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index of the End cell.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// All cells in path order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at `index`.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Type of the cell at `index`; out-of-range indices read as End.
    #[must_use]
    pub fn kind_at(&self, index: usize) -> CellType {
        self.cells.get(index).map_or(CellType::End, |c| c.kind)
    }

    /// Clamp a signed target onto the path.
    #[must_use]
    pub fn clamp(&self, target: i64) -> usize {
        target.clamp(0, self.last_index() as i64) as usize
    }

    /// How many cells have the given type.
    #[must_use]
    pub fn count(&self, kind: CellType) -> usize {
        self.cells.iter().filter(|c| c.kind == kind).count()
    }

    /// Mark a cell as resolved, optionally with the shield-blocked indicator.
    pub(crate) fn reveal(&mut self, index: usize, blocked: bool) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.revealed = true;
            cell.blocked |= blocked;
        }
    }

    /// Hide every cell again, keeping the types.
    pub(crate) fn conceal_all(&mut self) {
        for cell in &mut self.cells {
            cell.revealed = false;
            cell.blocked = false;
        }
    }
}
