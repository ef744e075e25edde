//! Game configuration types.
//!
//! Hosts configure the engine at startup by providing:
//! - `EventThresholds`: cumulative cut-offs of the default cell distribution
//! - `BoardRules`: zone sizes and zone-specific chances
//! - `BoardConfig`: serpentine grid shape plus the rules above
//! - `GameConfig`: player bounds, effect magnitudes and the board
//!
//! Every probability the board generator uses lives here, so the
//! generation policy can be changed and tested without touching the
//! generator. Defaults reproduce the classic 6 x 8 board.
//!
//! ```
//! use rust_quizboard::core::GameConfig;
//!
//! let config = GameConfig::from_toml_str(r#"
//!     player_count = 3
//!     [board]
//!     rows = 4
//!     columns = 8
//! "#).unwrap();
//! assert_eq!(config.player_count, 3);
//! assert_eq!(config.board.length(), 32);
//! ```

use serde::{Deserialize, Serialize};

use super::error::{EngineResult, GameError};

/// Largest board the generator will build.
pub const MAX_BOARD_CELLS: usize = 4096;

/// Most seats a game can have.
pub const MAX_PLAYERS: usize = 4;

/// Cumulative thresholds for the default cell distribution.
///
/// One uniform draw `r` picks the first bucket whose threshold exceeds it:
/// `r < lucky` is Lucky, `r < bad` is Bad, and so on; anything at or above
/// `again` is Normal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventThresholds {
    pub lucky: f64,
    pub bad: f64,
    pub freeze: f64,
    pub attack: f64,
    pub again: f64,
}

impl Default for EventThresholds {
    fn default() -> Self {
        Self {
            lucky: 0.15,
            bad: 0.30,
            freeze: 0.40,
            attack: 0.50,
            again: 0.55,
        }
    }
}

impl EventThresholds {
    /// Thresholds in bucket order.
    #[must_use]
    pub fn as_array(&self) -> [f64; 5] {
        [self.lucky, self.bad, self.freeze, self.attack, self.again]
    }

    /// Check every threshold is in `[0, 1]` and they never decrease.
    pub fn validate(&self) -> EngineResult<()> {
        let cuts = self.as_array();
        if cuts.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(GameError::InvalidConfig(format!(
                "event thresholds must lie in [0, 1], got {cuts:?}"
            )));
        }
        if cuts.windows(2).any(|w| w[1] < w[0]) {
            return Err(GameError::InvalidConfig(format!(
                "event thresholds must be non-decreasing, got {cuts:?}"
            )));
        }
        Ok(())
    }
}

/// Zone policy: which stretch of the path gets which special cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardRules {
    /// Interior cells right after Start that may roll a Shield.
    pub early_zone_len: usize,
    /// Interior cells right before End that may roll a WarpWin.
    pub late_zone_len: usize,
    /// Chance an early-zone cell becomes a Shield.
    pub shield_chance: f64,
    /// Chance a late-zone cell becomes a WarpWin.
    pub warp_win_chance: f64,
    /// Default distribution for every other draw.
    pub thresholds: EventThresholds,
}

impl Default for BoardRules {
    fn default() -> Self {
        Self {
            early_zone_len: 20,
            late_zone_len: 20,
            shield_chance: 0.15,
            warp_win_chance: 0.08,
            thresholds: EventThresholds::default(),
        }
    }
}

impl BoardRules {
    /// Last index of the early zone for a board of `length` cells.
    ///
    /// Never reaches the End cell.
    #[must_use]
    pub fn early_zone_end(&self, length: usize) -> usize {
        self.early_zone_len.min(length.saturating_sub(2))
    }

    /// First index of the late zone for a board of `length` cells.
    ///
    /// Never reaches the Start cell.
    #[must_use]
    pub fn late_zone_start(&self, length: usize) -> usize {
        length
            .saturating_sub(1)
            .saturating_sub(self.late_zone_len)
            .max(1)
    }

    /// Validate chances and thresholds.
    pub fn validate(&self) -> EngineResult<()> {
        for (name, chance) in [
            ("shield_chance", self.shield_chance),
            ("warp_win_chance", self.warp_win_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(GameError::InvalidConfig(format!(
                    "{name} must lie in [0, 1], got {chance}"
                )));
            }
        }
        self.thresholds.validate()
    }
}

/// Shape of the serpentine board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub columns: usize,
    pub rules: BoardRules,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            columns: 8,
            rules: BoardRules::default(),
        }
    }
}

impl BoardConfig {
    /// Number of cells on the path. Saturates instead of overflowing;
    /// `validate` rejects grids that large.
    #[must_use]
    pub fn length(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    /// Set the grid shape.
    #[must_use]
    pub fn with_grid(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    /// Replace the zone rules.
    #[must_use]
    pub fn with_rules(mut self, rules: BoardRules) -> Self {
        self.rules = rules;
        self
    }

    /// The path needs at least a Start and an End cell, and at most
    /// [`MAX_BOARD_CELLS`].
    pub fn validate(&self) -> EngineResult<()> {
        let Some(length) = self.rows.checked_mul(self.columns) else {
            return Err(GameError::InvalidConfig(format!(
                "board {} x {} is too large",
                self.rows, self.columns
            )));
        };
        if length > MAX_BOARD_CELLS {
            return Err(GameError::InvalidConfig(format!(
                "board needs at most {MAX_BOARD_CELLS} cells, {} x {} gives {length}",
                self.rows, self.columns
            )));
        }
        if length < 2 {
            return Err(GameError::InvalidConfig(format!(
                "board needs at least 2 cells, {} x {} gives {}",
                self.rows,
                self.columns,
                self.length()
            )));
        }
        self.rules.validate()
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Players seated at (re)start.
    pub player_count: usize,
    pub min_players: usize,
    pub max_players: usize,

    /// Faces on the die used by `roll_dice` and accepted by `roll`.
    pub dice_faces: u32,

    /// Cells gained on Lucky, and on a Shield cell when already shielded.
    pub lucky_steps: usize,
    /// Cells lost on Bad.
    pub bad_steps: usize,
    /// Cells each Attack victim loses.
    pub attack_steps: usize,

    /// Cap on consecutive Again extra turns for one player.
    ///
    /// `None` leaves extra turns unbounded.
    pub max_extra_turns: Option<u32>,

    pub board: BoardConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            min_players: 1,
            max_players: 4,
            dice_faces: 6,
            lucky_steps: 2,
            bad_steps: 2,
            attack_steps: 2,
            max_extra_turns: None,
            board: BoardConfig::default(),
        }
    }
}

impl GameConfig {
    /// Default configuration with `player_count` players.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> EngineResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the board configuration.
    #[must_use]
    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    /// Cap consecutive extra turns.
    #[must_use]
    pub fn with_max_extra_turns(mut self, cap: u32) -> Self {
        self.max_extra_turns = Some(cap);
        self
    }

    /// Check `count` against the player bounds.
    pub fn check_player_count(&self, count: i64) -> EngineResult<usize> {
        let in_range = count >= self.min_players as i64 && count <= self.max_players as i64;
        if in_range {
            Ok(count as usize)
        } else {
            Err(GameError::InvalidPlayerCount {
                requested: count,
                min: self.min_players,
                max: self.max_players,
            })
        }
    }

    /// Validate the whole configuration.
    pub fn validate(&self) -> EngineResult<()> {
        if self.min_players == 0 || self.min_players > self.max_players || self.max_players > MAX_PLAYERS {
            return Err(GameError::InvalidConfig(format!(
                "player bounds {}..={} are not usable",
                self.min_players, self.max_players
            )));
        }
        self.check_player_count(i64::try_from(self.player_count).unwrap_or(i64::MAX))?;
        if self.dice_faces == 0 {
            return Err(GameError::InvalidConfig("dice needs at least one face".into()));
        }
        self.board.validate()
    }
}
