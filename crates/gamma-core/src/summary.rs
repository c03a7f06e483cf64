//! Serializable end-of-game summary.

use crate::game::Game;
use crate::player::Player;
use serde::Serialize;

/// Snapshot of a game for reporting: parameters, player counters, and the
/// rendered board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub width: u32,
    pub height: u32,
    pub max_areas: u32,
    pub players: Vec<Player>,
    /// Rendered rows, top row first
    pub board: Vec<String>,
}

impl Game {
    /// Build a summary of the current state
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            width: self.width(),
            height: self.height(),
            max_areas: self.max_areas(),
            players: self.players().to_vec(),
            board: self.render().lines().map(str::to_owned).collect(),
        }
    }

    /// Summary as a JSON document
    pub fn summary_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_json() {
        let mut game = Game::new(2, 1, 2, 1).unwrap();
        assert!(game.place(2, 1, 0));

        let json: serde_json::Value = serde_json::from_str(&game.summary_json().unwrap()).unwrap();
        assert_eq!(json["width"], 2);
        assert_eq!(json["board"][0], ".2");
        assert_eq!(json["players"][1]["tiles"], 1);
        assert_eq!(json["players"][1]["golden_available"], true);
        assert_eq!(json["players"][0]["areas"], 0);
    }
}
