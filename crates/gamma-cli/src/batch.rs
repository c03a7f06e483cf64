//! Batch mode: one command per line, one answer per command.

use crate::command::{BatchCommand, LineReader, RawCommand};
use gamma_core::Game;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

/// Run batch commands until the input ends.
///
/// Answers go to `out`; malformed lines are reported as `ERROR <line>` on
/// `err` and otherwise ignored.
pub fn run<R: BufRead, W: Write, E: Write>(
    game: &mut Game,
    lines: &mut LineReader<R>,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    info!(
        width = game.width(),
        height = game.height(),
        players = game.player_count(),
        max_areas = game.max_areas(),
        "batch mode started"
    );

    while let Some(line) = lines.next_line()? {
        let parsed = RawCommand::parse(line);
        let number = lines.line();

        let command = match parsed {
            Ok(None) => continue,
            Ok(Some(raw)) => BatchCommand::from_raw(&raw),
            Err(error) => Err(error),
        };

        match command {
            Ok(command) => execute(game, command, out)?,
            Err(error) => {
                warn!(line = number, %error, "malformed command");
                writeln!(err, "ERROR {number}")?;
            }
        }
    }

    info!(line = lines.line(), "batch mode finished");
    Ok(())
}

fn execute<W: Write>(game: &mut Game, command: BatchCommand, out: &mut W) -> io::Result<()> {
    debug!(?command, "executing");
    match command {
        BatchCommand::Move { player, x, y } => {
            let result = game.try_place(player, x, y);
            if let Err(reason) = result {
                debug!(player, x, y, %reason, "move rejected");
            }
            writeln!(out, "{}", u8::from(result.is_ok()))
        }
        BatchCommand::Golden { player, x, y } => {
            let result = game.try_golden(player, x, y);
            match result {
                Ok(taken) => debug!(player, victim = taken.victim(), x, y, "golden move"),
                Err(reason) => debug!(player, x, y, %reason, "golden move rejected"),
            }
            writeln!(out, "{}", u8::from(result.is_ok()))
        }
        BatchCommand::BusyFields(player) => writeln!(out, "{}", game.tiles_owned(player)),
        BatchCommand::FreeFields(player) => {
            writeln!(out, "{}", game.free_cells_reachable(player))
        }
        BatchCommand::GoldenPossible(player) => {
            writeln!(out, "{}", u8::from(game.golden_possible(player)))
        }
        BatchCommand::Board => write!(out, "{game}"),
    }
}
