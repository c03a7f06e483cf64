//! Cell ownership grid and connectivity scanning.
//!
//! This module contains:
//! - The `Board` grid store (owners plus a scratch "visited" matrix)
//! - Neighbor lookups with the board edge acting as a sentinel
//! - The flood-fill area counter used to recompute exact area counts

use crate::game::GameError;
use serde::Serialize;

/// Player identifier (1-based, `1..=player_count`)
pub type PlayerId = u32;

/// The cell grid, stored row-major with `y = 0` as the first row.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    width: u32,
    height: u32,
    /// Owner of every cell, `None` when empty
    cells: Vec<Option<PlayerId>>,
    /// Flood-fill scratch space, all `false` between scans
    #[serde(skip)]
    visited: Vec<bool>,
    #[cfg(test)]
    #[serde(skip)]
    pub(crate) scans: usize,
}

impl Board {
    /// Create an empty board.
    ///
    /// Storage is reserved fallibly so an oversized board is reported as an
    /// error instead of aborting the process.
    pub fn new(width: u32, height: u32) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::ZeroDimension);
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(GameError::TooLarge)?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| GameError::Allocation)?;
        cells.resize(len, None);

        let mut visited = Vec::new();
        visited
            .try_reserve_exact(len)
            .map_err(|_| GameError::Allocation)?;
        visited.resize(len, false);

        Ok(Self {
            width,
            height,
            cells,
            visited,
            #[cfg(test)]
            scans: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A board always has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `(x, y)`, or `None` outside the board
    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Coordinates of a flat index
    pub fn coords(&self, index: usize) -> (u32, u32) {
        let width = self.width as usize;
        ((index % width) as u32, (index / width) as u32)
    }

    /// Owner of `(x, y)`. Empty cells and cells off the board both read as
    /// `None`, so the edge never matches a real owner.
    pub fn owner_at(&self, x: u32, y: u32) -> Option<PlayerId> {
        self.index(x, y).and_then(|index| self.cells[index])
    }

    pub(crate) fn owner(&self, index: usize) -> Option<PlayerId> {
        self.cells[index]
    }

    pub(crate) fn set_owner(&mut self, index: usize, owner: Option<PlayerId>) {
        self.cells[index] = owner;
    }

    /// Up to four edge-adjacent cells; slots off the board are `None`.
    pub(crate) fn neighbors(&self, index: usize) -> [Option<usize>; 4] {
        let width = self.width as usize;
        let (x, y) = (index % width, index / width);
        [
            (x + 1 < width).then(|| index + 1),
            (x > 0).then(|| index - 1),
            (y + 1 < self.height as usize).then(|| index + width),
            (y > 0).then(|| index - width),
        ]
    }

    /// Whether any edge-adjacent cell is owned by `player`
    pub(crate) fn touches(&self, index: usize, player: PlayerId) -> bool {
        self.neighbors(index)
            .into_iter()
            .flatten()
            .any(|next| self.cells[next] == Some(player))
    }

    /// Number of empty cells edge-adjacent to at least one cell of `player`
    pub fn empty_cells_touching(&self, player: PlayerId) -> u64 {
        (0..self.cells.len())
            .filter(|&index| self.cells[index].is_none() && self.touches(index, player))
            .count() as u64
    }

    /// Rows from the top of the board (highest `y`) down.
    pub fn rows_top_down(&self) -> impl Iterator<Item = &[Option<PlayerId>]> {
        self.cells.chunks(self.width as usize).rev()
    }

    // ==================== Area Counting ====================

    /// Count the areas of each listed player exactly.
    ///
    /// Cells are visited in row-major order; each unvisited cell owned by a
    /// listed player seeds a flood fill over its same-owner region and
    /// counts as one area. The fill uses an explicit stack, so region shape
    /// never affects recursion depth. The scratch matrix is cleared before
    /// returning.
    pub(crate) fn count_areas<const N: usize>(&mut self, players: [PlayerId; N]) -> [u32; N] {
        #[cfg(test)]
        {
            self.scans += 1;
        }

        let mut counts = [0; N];
        let mut stack = Vec::new();

        for index in 0..self.cells.len() {
            if self.visited[index] {
                continue;
            }
            let Some(owner) = self.cells[index] else {
                continue;
            };
            if let Some(slot) = players.iter().position(|&p| p == owner) {
                self.flood_fill(index, owner, &mut stack);
                counts[slot] += 1;
            }
        }

        self.visited.fill(false);
        counts
    }

    /// Mark every cell of the region containing `seed` as visited.
    fn flood_fill(&mut self, seed: usize, owner: PlayerId, stack: &mut Vec<usize>) {
        self.visited[seed] = true;
        stack.push(seed);

        while let Some(index) = stack.pop() {
            for next in self.neighbors(index).into_iter().flatten() {
                if !self.visited[next] && self.cells[next] == Some(owner) {
                    self.visited[next] = true;
                    stack.push(next);
                }
            }
        }
    }
}

#[cfg(test)]
impl Board {
    /// Build a board from rows given top row first, `.` for empty.
    pub(crate) fn from_rows(rows: &[&str]) -> Board {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let mut board = Board::new(width, height).unwrap();
        for (row, line) in rows.iter().enumerate() {
            let y = height - 1 - row as u32;
            for (x, c) in line.chars().enumerate() {
                let index = board.index(x as u32, y).unwrap();
                board.set_owner(index, c.to_digit(10));
            }
        }
        board
    }
}

// Scratch space is excluded: it carries no state between scans.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Board {}
