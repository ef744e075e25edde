//! Player seats and per-player data storage.
//!
//! ## PlayerId
//!
//! Seat identifier. Seats are 1-based to match what players see on the
//! board: the first player is `PlayerId(1)`.
//!
//! ## Player
//!
//! Token attributes for one seat: position on the path, freeze and
//! shield flags.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec` for O(1) access by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier, 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID from a 1-based seat number.
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    /// The 1-based seat number.
    #[must_use]
    pub const fn seat(self) -> u8 {
        self.0
    }

    /// The 0-based storage index.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 as usize).saturating_sub(1)
    }

    /// Next seat in turn order, wrapping from the last seat to the first.
    ///
    /// ```
    /// use rust_quizboard::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(1).next(3), PlayerId::new(2));
    /// assert_eq!(PlayerId::new(3).next(3), PlayerId::new(1));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        let next = (self.0 as usize % player_count.max(1)) + 1;
        Self(next as u8)
    }

    /// Iterate over all seats for a game with `player_count` players.
    ///
    /// ```
    /// use rust_quizboard::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(seats.len(), 4);
    /// assert_eq!(seats[0], PlayerId::new(1));
    /// assert_eq!(seats[3], PlayerId::new(4));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (1..=player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One player's token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat of this player.
    pub id: PlayerId,
    /// Index of the cell the token stands on.
    pub position: usize,
    /// Skips the next turn when set.
    pub frozen: bool,
    /// Holds a one-shot shield.
    pub has_shield: bool,
}

impl Player {
    /// A fresh token on the start cell.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            position: 0,
            frozen: false,
            has_shield: false,
        }
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_quizboard::core::{PlayerId, PlayerMap};
///
/// let mut score: PlayerMap<i32> = PlayerMap::new(4, |_| 0);
/// score[PlayerId::new(2)] = 15;
/// assert_eq!(score[PlayerId::new(2)], 15);
/// assert_eq!(score[PlayerId::new(1)], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new map with values from a factory function.
    ///
    /// Callers validate `player_count` first; an empty map is allowed
    /// but has no addressable seats.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        let data = PlayerId::all(player_count).map(factory).collect();
        Self { data }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Whether `player` names a seat in this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.0 >= 1 && player.index() < self.data.len()
    }

    /// Get a seat's data, or `None` for an unknown seat.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        if self.contains(player) {
            self.data.get(player.index())
        } else {
            None
        }
    }

    /// Get a seat's data mutably, or `None` for an unknown seat.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        if self.contains(player) {
            self.data.get_mut(player.index())
        } else {
            None
        }
    }

    /// Iterate over `(PlayerId, &T)` pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8 + 1), v))
    }

    /// All values in seat order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p1 = PlayerId::new(1);
        let p2 = PlayerId::new(2);

        assert_eq!(p1.index(), 0);
        assert_eq!(p2.index(), 1);
        assert_eq!(p2.seat(), 2);
        assert_eq!(format!("{}", p1), "Player 1");
    }

    #[test]
    fn test_player_id_next_wraps() {
        assert_eq!(PlayerId::new(1).next(1), PlayerId::new(1));
        assert_eq!(PlayerId::new(1).next(2), PlayerId::new(2));
        assert_eq!(PlayerId::new(2).next(2), PlayerId::new(1));
        assert_eq!(PlayerId::new(4).next(4), PlayerId::new(1));
    }

    #[test]
    fn test_new_player_on_start() {
        let p = Player::new(PlayerId::new(3));
        assert_eq!(p.position, 0);
        assert!(!p.frozen);
        assert!(!p.has_shield);
    }

    #[test]
    fn test_player_map_lookup() {
        let mut map: PlayerMap<usize> = PlayerMap::new(3, |p| p.index() * 10);

        assert_eq!(map[PlayerId::new(1)], 0);
        assert_eq!(map[PlayerId::new(3)], 20);
        assert_eq!(map.get(PlayerId::new(4)), None);
        assert_eq!(map.get(PlayerId::new(0)), None);

        if let Some(v) = map.get_mut(PlayerId::new(2)) {
            *v = 99;
        }
        assert_eq!(map[PlayerId::new(2)], 99);
    }

    #[test]
    fn test_player_map_iter_in_seat_order() {
        let map = PlayerMap::new(3, Player::new);
        let seats: Vec<_> = map.iter().map(|(id, p)| (id, p.id)).collect();
        assert_eq!(
            seats,
            vec![
                (PlayerId::new(1), PlayerId::new(1)),
                (PlayerId::new(2), PlayerId::new(2)),
                (PlayerId::new(3), PlayerId::new(3)),
            ]
        );
    }

    #[test]
    fn test_player_map_serialization() {
        let map = PlayerMap::new(2, Player::new);
        let json = serde_json::to_string(&map).unwrap();
        let back: PlayerMap<Player> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
