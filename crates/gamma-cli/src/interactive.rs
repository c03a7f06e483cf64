//! Interactive mode: a raw-terminal board with a cursor.
//!
//! Turn order and cursor handling live in [`Session`], which knows nothing
//! about the terminal; [`run`] feeds it key presses and redraws the board.

use crate::start::write_results;
use crossterm::cursor::{Hide, MoveTo, MoveToNextLine, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, PrintStyledContent, ResetColor, Stylize};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{execute, queue};
use gamma_core::{CellLayout, Game, PlayerId};
use std::io::{self, Write};
use tracing::{debug, info};

/// Cursor movement directions. Up increases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Everything a key press can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Cursor(Direction),
    Place,
    Golden,
    Skip,
    Quit,
}

impl Action {
    /// Map a key press to an action
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('d') | KeyCode::Char('D')).then_some(Action::Quit);
        }
        match key.code {
            KeyCode::Up => Some(Action::Cursor(Direction::Up)),
            KeyCode::Down => Some(Action::Cursor(Direction::Down)),
            KeyCode::Left => Some(Action::Cursor(Direction::Left)),
            KeyCode::Right => Some(Action::Cursor(Direction::Right)),
            KeyCode::Char(' ') => Some(Action::Place),
            KeyCode::Char('g') | KeyCode::Char('G') => Some(Action::Golden),
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Skip),
            _ => None,
        }
    }
}

/// An interactive game: the board, whose turn it is, and the cursor.
#[derive(Debug, Clone)]
pub struct Session {
    game: Game,
    current: PlayerId,
    cursor: (u32, u32),
}

impl Session {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            current: 1,
            cursor: (0, 0),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn cursor(&self) -> (u32, u32) {
        self.cursor
    }

    /// Apply one action. Returns `false` once the game is over.
    pub fn apply(&mut self, action: Action) -> bool {
        let (x, y) = self.cursor;
        match action {
            Action::Cursor(direction) => {
                self.move_cursor(direction);
                true
            }
            Action::Place => {
                if self.game.place(self.current, x, y) {
                    self.advance()
                } else {
                    true
                }
            }
            Action::Golden => {
                if self.game.golden(self.current, x, y) {
                    self.advance()
                } else {
                    true
                }
            }
            Action::Skip => self.advance(),
            Action::Quit => false,
        }
    }

    fn move_cursor(&mut self, direction: Direction) {
        let (x, y) = &mut self.cursor;
        match direction {
            Direction::Up if *y + 1 < self.game.height() => *y += 1,
            Direction::Down if *y > 0 => *y -= 1,
            Direction::Right if *x + 1 < self.game.width() => *x += 1,
            Direction::Left if *x > 0 => *x -= 1,
            _ => {}
        }
    }

    /// Pass the turn to the next player able to move, trying the current
    /// player last. Returns `false` when nobody can move.
    fn advance(&mut self) -> bool {
        let count = u64::from(self.game.player_count());
        for step in 1..=count {
            let candidate = ((u64::from(self.current) - 1 + step) % count) as PlayerId + 1;
            if self.can_move(candidate) {
                debug!(player = candidate, "turn passes");
                self.current = candidate;
                return true;
            }
        }
        false
    }

    fn can_move(&mut self, player: PlayerId) -> bool {
        self.game.free_cells_reachable(player) > 0 || self.game.golden_possible(player)
    }
}

/// Whether the board and the prompt line fit a terminal of the given size.
pub fn fits(game: &Game, columns: u16, rows: u16) -> bool {
    let layout = game.cell_layout();
    let board_columns = u64::from(game.width()) * layout.columns() as u64;
    let prompt_columns = prompt(game.player_count()).len() as u64;

    u64::from(game.height()) + 1 < u64::from(rows)
        && board_columns < u64::from(columns)
        && prompt_columns < u64::from(columns)
}

/// Whether the game fits the current terminal
pub fn fits_terminal(game: &Game) -> bool {
    terminal::size().is_ok_and(|(columns, rows)| fits(game, columns, rows))
}

fn prompt(player: PlayerId) -> String {
    format!("current player: {player}")
}

/// Play the game on the terminal until nobody can move or the user quits,
/// then print the final board and each player's tile count.
pub fn run<W: Write>(game: Game, out: &mut W) -> anyhow::Result<()> {
    info!(
        width = game.width(),
        height = game.height(),
        players = game.player_count(),
        "interactive mode started"
    );
    let mut session = Session::new(game);

    enable_raw_mode()?;
    let played = play(&mut session, out);
    disable_raw_mode()?;
    played?;

    draw(&session, out)?;
    execute!(out, ResetColor, Show)?;
    write_results(session.game(), out)?;
    info!("interactive mode finished");
    Ok(())
}

fn play<W: Write>(session: &mut Session, out: &mut W) -> io::Result<()> {
    draw(session, out)?;
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = Action::from_key(key) else {
            continue;
        };
        let running = session.apply(action);
        draw(session, out)?;
        if !running {
            return Ok(());
        }
    }
}

/// Redraw the whole screen: the board with the current player's cells on
/// green and the cursor in reverse video, then the prompt line.
fn draw<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let game = session.game();
    let layout = game.cell_layout();
    let current = session.current_player();

    queue!(out, Clear(ClearType::All), Hide, MoveTo(0, 0))?;
    for (row, y) in game.board().rows_top_down().zip((0..game.height()).rev()) {
        for (x, &owner) in row.iter().enumerate() {
            let mut cell = layout.label(owner).stylize();
            if owner == Some(current) {
                cell = cell.on_green();
            }
            if (x as u32, y) == session.cursor() {
                cell = cell.reverse();
            }
            queue!(out, PrintStyledContent(cell))?;
            if let CellLayout::Padded { .. } = layout {
                queue!(out, Print(gamma_core::render::CELL_SEPARATOR))?;
            }
        }
        queue!(out, MoveToNextLine(1))?;
    }
    queue!(out, Print(prompt(current)), MoveToNextLine(1))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            Action::from_key(key(KeyCode::Up)),
            Some(Action::Cursor(Direction::Up))
        );
        assert_eq!(Action::from_key(key(KeyCode::Char(' '))), Some(Action::Place));
        assert_eq!(Action::from_key(key(KeyCode::Char('G'))), Some(Action::Golden));
        assert_eq!(Action::from_key(key(KeyCode::Char('c'))), Some(Action::Skip));
        assert_eq!(Action::from_key(key(KeyCode::Char('x'))), None);
        assert_eq!(
            Action::from_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            Action::from_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut session = Session::new(Game::new(2, 3, 2, 1).unwrap());
        assert!(session.apply(Action::Cursor(Direction::Down)));
        assert!(session.apply(Action::Cursor(Direction::Left)));
        assert_eq!(session.cursor(), (0, 0));

        for _ in 0..5 {
            session.apply(Action::Cursor(Direction::Up));
            session.apply(Action::Cursor(Direction::Right));
        }
        assert_eq!(session.cursor(), (1, 2));
    }

    #[test]
    fn test_turns_rotate_after_moves() {
        let mut session = Session::new(Game::new(3, 3, 3, 2).unwrap());
        assert_eq!(session.current_player(), 1);

        assert!(session.apply(Action::Place));
        assert_eq!(session.current_player(), 2);
        // Occupied cell: the turn stays
        assert!(session.apply(Action::Place));
        assert_eq!(session.current_player(), 2);

        assert!(session.apply(Action::Skip));
        assert_eq!(session.current_player(), 3);
        assert!(session.apply(Action::Golden));
        assert_eq!(session.current_player(), 1);
        assert_eq!(session.game().owner_at(0, 0), Some(3));
    }

    #[test]
    fn test_game_ends_when_nobody_can_move() {
        let mut session = Session::new(Game::new(1, 1, 1, 1).unwrap());
        assert!(!session.apply(Action::Place));
        assert_eq!(session.game().tiles_owned(1), 1);
    }

    #[test]
    fn test_blocked_players_are_skipped() {
        let mut session = Session::new(Game::new(2, 1, 2, 1).unwrap());
        assert!(session.apply(Action::Place));
        assert_eq!(session.current_player(), 2);
        assert!(session.apply(Action::Golden));
        assert_eq!(session.current_player(), 1);

        // Player 1 takes the last cell; player 2 is then stuck at one area
        // with nothing adjacent, but its token is spent
        session.apply(Action::Cursor(Direction::Right));
        assert!(session.apply(Action::Place));
        assert_eq!(session.current_player(), 1);
    }

    #[test]
    fn test_quit() {
        let mut session = Session::new(Game::new(2, 2, 2, 1).unwrap());
        assert!(!session.apply(Action::Quit));
    }

    #[test]
    fn test_fits() {
        let game = Game::new(10, 5, 2, 1).unwrap();
        assert!(fits(&game, 80, 24));
        assert!(!fits(&game, 80, 6));
        assert!(!fits(&game, 10, 24));

        let wide = Game::new(30, 5, 12, 1).unwrap();
        // 30 cells of 3 columns each
        assert!(!fits(&wide, 90, 24));
        assert!(fits(&wide, 91, 24));
    }
}
