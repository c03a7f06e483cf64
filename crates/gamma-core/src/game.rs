//! Core game state and move engines.
//!
//! This module contains the `Game` struct and all rule enforcement:
//! ordinary placements, golden moves, and the golden move feasibility
//! oracle.

use crate::board::{Board, PlayerId};
use crate::player::Player;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when creating a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Board dimensions must be positive")]
    ZeroDimension,

    #[error("At least one player is required")]
    ZeroPlayers,

    #[error("Area limit must be positive")]
    ZeroAreaLimit,

    #[error("Board is too large")]
    TooLarge,

    #[error("Not enough memory for the game state")]
    Allocation,
}

/// Reasons a move is rejected. A rejected move never changes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("No such player")]
    InvalidPlayer,

    #[error("Cell is outside the board")]
    OutOfBounds,

    #[error("Cell is already taken")]
    CellOccupied,

    #[error("Cell is empty")]
    CellEmpty,

    #[error("Cell already belongs to this player")]
    OwnCell,

    #[error("Golden move already used")]
    GoldenUsed,

    #[error("Move would exceed the area limit")]
    AreaLimit,
}

/// A committed golden move together with what it overwrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoldenMove {
    player: PlayerId,
    victim: PlayerId,
    index: usize,
    player_areas: u32,
    victim_areas: u32,
}

impl GoldenMove {
    /// The player that made the move
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// The player that lost the cell
    pub fn victim(&self) -> PlayerId {
        self.victim
    }
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    /// The cell grid
    board: Board,
    /// All players, player `id` at index `id - 1`
    players: Vec<Player>,
    /// Maximum number of areas a player may hold
    max_areas: u32,
}

impl Game {
    /// Create a new game with an empty board.
    pub fn new(width: u32, height: u32, players: u32, max_areas: u32) -> Result<Self, GameError> {
        if players == 0 {
            return Err(GameError::ZeroPlayers);
        }
        if max_areas == 0 {
            return Err(GameError::ZeroAreaLimit);
        }

        let board = Board::new(width, height)?;

        let mut roster = Vec::new();
        roster
            .try_reserve_exact(players as usize)
            .map_err(|_| GameError::Allocation)?;
        roster.extend((1..=players).map(Player::new));

        Ok(Self {
            board,
            players: roster,
            max_areas,
        })
    }

    pub fn width(&self) -> u32 {
        self.board.width()
    }

    pub fn height(&self) -> u32 {
        self.board.height()
    }

    /// Get the number of players
    pub fn player_count(&self) -> u32 {
        self.players.len() as u32
    }

    pub fn max_areas(&self) -> u32 {
        self.max_areas
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Owner of `(x, y)`, `None` for empty or off-board cells
    pub fn owner_at(&self, x: u32, y: u32) -> Option<PlayerId> {
        self.board.owner_at(x, y)
    }

    /// Get a player by ID
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.slot(id).ok().map(|slot| &self.players[slot])
    }

    /// All players in ID order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of cells owned by `player`, 0 for an unknown player
    pub fn tiles_owned(&self, player: PlayerId) -> u64 {
        self.player(player).map_or(0, |p| p.tiles)
    }

    /// Whether `player` still holds the golden move
    pub fn golden_available(&self, player: PlayerId) -> bool {
        self.player(player).is_some_and(|p| p.golden_available)
    }

    /// Number of empty cells on the board
    pub fn empty_cells(&self) -> u64 {
        let taken: u64 = self.players.iter().map(|p| p.tiles).sum();
        self.board.len() as u64 - taken
    }

    fn slot(&self, player: PlayerId) -> Result<usize, MoveError> {
        if player == 0 || player > self.player_count() {
            return Err(MoveError::InvalidPlayer);
        }
        Ok(player as usize - 1)
    }

    // ==================== Ordinary Moves ====================

    /// Claim an empty cell. Returns whether the move was made.
    pub fn place(&mut self, player: PlayerId, x: u32, y: u32) -> bool {
        self.try_place(player, x, y).is_ok()
    }

    /// Claim an empty cell, reporting why a rejected move failed.
    ///
    /// A cell with no same-owner neighbor is assumed to open a new area.
    /// That estimate ignores merges, so it can only overcount; the board is
    /// rescanned only when the estimate crosses the limit.
    pub fn try_place(&mut self, player: PlayerId, x: u32, y: u32) -> Result<(), MoveError> {
        let slot = self.slot(player)?;
        let index = self.board.index(x, y).ok_or(MoveError::OutOfBounds)?;
        if self.board.owner(index).is_some() {
            return Err(MoveError::CellOccupied);
        }

        self.board.set_owner(index, Some(player));

        let opens_area = !self.board.touches(index, player);
        let mut areas = u64::from(self.players[slot].areas) + u64::from(opens_area);
        if areas > u64::from(self.max_areas) {
            let [exact] = self.board.count_areas([player]);
            areas = u64::from(exact);
        }

        if areas > u64::from(self.max_areas) {
            self.board.set_owner(index, None);
            return Err(MoveError::AreaLimit);
        }

        let state = &mut self.players[slot];
        state.areas = areas as u32;
        state.tiles += 1;
        Ok(())
    }

    // ==================== Golden Moves ====================

    /// Take one cell from another player. Returns whether the move was made.
    pub fn golden(&mut self, player: PlayerId, x: u32, y: u32) -> bool {
        self.try_golden(player, x, y).is_ok()
    }

    /// Take one cell from another player, reporting why a rejected move
    /// failed.
    ///
    /// Taking a cell can merge the mover's areas and split the victim's, so
    /// both players are always rescanned.
    pub fn try_golden(
        &mut self,
        player: PlayerId,
        x: u32,
        y: u32,
    ) -> Result<GoldenMove, MoveError> {
        let slot = self.slot(player)?;
        let index = self.board.index(x, y).ok_or(MoveError::OutOfBounds)?;
        let victim = self.board.owner(index).ok_or(MoveError::CellEmpty)?;
        if victim == player {
            return Err(MoveError::OwnCell);
        }
        if !self.players[slot].golden_available {
            return Err(MoveError::GoldenUsed);
        }
        let victim_slot = self.slot(victim)?;

        let record = GoldenMove {
            player,
            victim,
            index,
            player_areas: self.players[slot].areas,
            victim_areas: self.players[victim_slot].areas,
        };

        self.board.set_owner(index, Some(player));
        let [player_areas, victim_areas] = self.board.count_areas([player, victim]);

        if player_areas > self.max_areas || victim_areas > self.max_areas {
            self.board.set_owner(index, Some(victim));
            return Err(MoveError::AreaLimit);
        }

        let mover = &mut self.players[slot];
        mover.areas = player_areas;
        mover.tiles += 1;
        mover.golden_available = false;

        let loser = &mut self.players[victim_slot];
        loser.areas = victim_areas;
        loser.tiles -= 1;

        Ok(record)
    }

    /// Undo a golden move committed by `try_golden`, restoring the cell,
    /// both players' counters, and the mover's golden token.
    fn revert_golden(&mut self, record: GoldenMove) {
        self.board.set_owner(record.index, Some(record.victim));

        let mover = &mut self.players[record.player as usize - 1];
        mover.areas = record.player_areas;
        mover.tiles -= 1;
        mover.golden_available = true;

        let loser = &mut self.players[record.victim as usize - 1];
        loser.areas = record.victim_areas;
        loser.tiles += 1;
    }

    /// Cheap necessary condition for a golden move: the token is unused and
    /// some other player owns a cell.
    pub fn golden_weakly_possible(&self, player: PlayerId) -> bool {
        if !self.golden_available(player) {
            return false;
        }
        self.players
            .iter()
            .any(|p| p.id != player && p.tiles > 0)
    }

    /// Whether `player` has at least one legal golden move right now.
    ///
    /// Leaves the game exactly as it found it. Below the area limit an
    /// opponent cell can always be taken without breaking the limit, so
    /// only a player at the limit needs the exhaustive search, where each
    /// candidate is tried as a real golden move and undone.
    pub fn golden_possible(&mut self, player: PlayerId) -> bool {
        if !self.golden_weakly_possible(player) {
            return false;
        }

        let [areas] = self.board.count_areas([player]);
        if areas < self.max_areas {
            return true;
        }

        // At the limit, only cells next to an existing area can be taken.
        for index in 0..self.board.len() {
            let candidate = matches!(self.board.owner(index), Some(owner) if owner != player)
                && self.board.touches(index, player);
            if !candidate {
                continue;
            }
            let (x, y) = self.board.coords(index);
            if let Ok(record) = self.try_golden(player, x, y) {
                self.revert_golden(record);
                return true;
            }
        }
        false
    }

    // ==================== Queries ====================

    /// Number of cells `player` could claim with an ordinary move.
    ///
    /// Below the area limit that is every empty cell; at the limit only
    /// empty cells next to the player's areas qualify. An estimate sitting
    /// at the limit is refreshed with an exact count first.
    pub fn free_cells_reachable(&mut self, player: PlayerId) -> u64 {
        let Ok(slot) = self.slot(player) else {
            return 0;
        };

        if self.players[slot].areas == self.max_areas {
            let [exact] = self.board.count_areas([player]);
            self.players[slot].areas = exact;
        }

        if self.players[slot].areas < self.max_areas {
            self.empty_cells()
        } else {
            self.board.empty_cells_touching(player)
        }
    }
}
