//! Text rendering of the board.
//!
//! Rows are printed from the top of the board (highest `y`) down. With
//! fewer than 10 players every cell is a single character; otherwise each
//! cell is a right-aligned field as wide as the largest player number,
//! followed by `|`.

use crate::board::PlayerId;
use crate::game::Game;
use std::fmt;

/// Marker for an empty cell
pub const EMPTY_CELL: char = '.';

/// Separator after each padded cell
pub const CELL_SEPARATOR: char = '|';

/// How a single cell is laid out in text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellLayout {
    /// One character per cell, no separator
    Compact,
    /// Right-aligned field of `width` characters plus a separator
    Padded { width: usize },
}

impl CellLayout {
    /// Pick the layout for a game with `player_count` players
    pub fn for_players(player_count: u32) -> Self {
        if player_count < 10 {
            CellLayout::Compact
        } else {
            CellLayout::Padded {
                width: player_count.to_string().len(),
            }
        }
    }

    /// Terminal columns taken by one cell, separator included
    pub fn columns(&self) -> usize {
        match self {
            CellLayout::Compact => 1,
            CellLayout::Padded { width } => width + 1,
        }
    }

    /// Width of a cell label, separator excluded
    pub fn label_width(&self) -> usize {
        match self {
            CellLayout::Compact => 1,
            CellLayout::Padded { width } => *width,
        }
    }

    /// Text of a cell, right-aligned to the label width
    pub fn label(&self, owner: Option<PlayerId>) -> String {
        let width = self.label_width();
        match owner {
            Some(id) => format!("{id:>width$}"),
            None => format!("{EMPTY_CELL:>width$}"),
        }
    }

    /// Write a full cell: label and, when padded, the separator
    pub fn write_cell<W: fmt::Write>(&self, out: &mut W, owner: Option<PlayerId>) -> fmt::Result {
        out.write_str(&self.label(owner))?;
        if let CellLayout::Padded { .. } = self {
            out.write_char(CELL_SEPARATOR)?;
        }
        Ok(())
    }
}

impl Game {
    /// The cell layout used for this game's text rendering
    pub fn cell_layout(&self) -> CellLayout {
        CellLayout::for_players(self.player_count())
    }

    /// Render the board as text, one line per row, top row first.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = self.cell_layout();
        for row in self.board().rows_top_down() {
            for &owner in row {
                layout.write_cell(f, owner)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
