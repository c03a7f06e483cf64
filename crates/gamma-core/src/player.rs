//! Per-player counters.

use crate::board::PlayerId;
use serde::Serialize;

/// A single player's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    /// Player ID (1-based)
    pub id: PlayerId,
    /// Number of cells currently owned
    pub tiles: u64,
    /// Number of areas held. Exact after a rescan; between rescans an upper
    /// bound that may overcount merged regions but never undercounts.
    pub areas: u32,
    /// Whether the golden move is still available
    pub golden_available: bool,
}

impl Player {
    /// Create a new player with no cells and an unused golden move
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            tiles: 0,
            areas: 0,
            golden_available: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player() {
        let player = Player::new(3);
        assert_eq!(player.id, 3);
        assert_eq!(player.tiles, 0);
        assert_eq!(player.areas, 0);
        assert!(player.golden_available);
    }
}
