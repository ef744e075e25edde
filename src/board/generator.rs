//! Zoned random board generation.
//!
//! ## Draw order
//!
//! For each interior index the generator draws, in order:
//! 1. one value if the index is in the late zone (`< warp_win_chance` → WarpWin)
//! 2. one value if the index is in the early zone (`< shield_chance` → Shield)
//! 3. one value for the default distribution
//!
//! A draw that settles the type stops the sequence for that index. The
//! order is part of the contract: scripted randomness relies on it.

use tracing::debug;

use crate::core::{BoardConfig, BoardRules, RandomSource};

use super::cell::{Cell, CellType};
use super::layout::serpentine_path;
use super::Board;

/// Assigns cell types along a path according to `BoardRules`.
#[derive(Clone, Copy, Debug)]
pub struct BoardGenerator<'a> {
    rules: &'a BoardRules,
}

impl<'a> BoardGenerator<'a> {
    #[must_use]
    pub fn new(rules: &'a BoardRules) -> Self {
        Self { rules }
    }

    /// Cell types for a path of `length` cells.
    ///
    /// Early zone is `1..=early_zone_end`, late zone is
    /// `late_zone_start..length-1`. Index 0 is Start and `length - 1` is End.
    pub fn generate_kinds<R: RandomSource + ?Sized>(
        &self,
        length: usize,
        early_zone_end: usize,
        late_zone_start: usize,
        rng: &mut R,
    ) -> Vec<CellType> {
        let last = length.saturating_sub(1);
        (0..length)
            .map(|i| {
                if i == 0 {
                    CellType::Start
                } else if i == last {
                    CellType::End
                } else {
                    let late = i >= late_zone_start;
                    let early = i <= early_zone_end;
                    self.roll_interior(late, early, rng)
                }
            })
            .collect()
    }

    fn roll_interior<R: RandomSource + ?Sized>(&self, late: bool, early: bool, rng: &mut R) -> CellType {
        if late && rng.uniform() < self.rules.warp_win_chance {
            return CellType::WarpWin;
        }
        if early && rng.uniform() < self.rules.shield_chance {
            return CellType::Shield;
        }
        self.pick_default(rng.uniform())
    }

    /// Map one uniform draw through the default distribution.
    #[must_use]
    pub fn pick_default(&self, r: f64) -> CellType {
        let t = &self.rules.thresholds;
        if r < t.lucky {
            CellType::Lucky
        } else if r < t.bad {
            CellType::Bad
        } else if r < t.freeze {
            CellType::Freeze
        } else if r < t.attack {
            CellType::Attack
        } else if r < t.again {
            CellType::Again
        } else {
            CellType::Normal
        }
    }
}

/// Build a fresh board from configuration.
///
/// The configuration is assumed valid (see `BoardConfig::validate`).
pub fn generate_board<R: RandomSource + ?Sized>(config: &BoardConfig, rng: &mut R) -> Board {
    let length = config.length();
    let rules = &config.rules;
    let kinds = BoardGenerator::new(rules).generate_kinds(
        length,
        rules.early_zone_end(length),
        rules.late_zone_start(length),
        rng,
    );

    let cells: Vec<Cell> = serpentine_path(config.rows, config.columns)
        .into_iter()
        .zip(kinds)
        .enumerate()
        .map(|(index, (pos, kind))| Cell::new(index, kind, pos))
        .collect();

    debug!(length, "generated board");
    Board::from_cells(cells)
}
