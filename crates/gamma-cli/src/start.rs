//! Session start: find the mode line, build the game, hand over to a mode.

use crate::command::{GameParams, LineReader, RawCommand, StartCommand};
use crate::{batch, interactive};
use clap::ValueEnum;
use gamma_core::Game;
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Shown instead of the interactive board when it does not fit
pub const TERMINAL_TOO_SMALL: &str = "Terminal is too small :(";

/// Format of the summary printed after batch mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// `PLAYER <n> <tiles>` lines
    Text,
    /// The full game summary as JSON
    Json,
}

/// Scan the stream for a mode line and run the chosen mode.
///
/// Lines that are neither blank, comments, nor a valid mode line are
/// reported as `ERROR <line>` on `err`. Returns once a mode has run or the
/// input ends.
pub fn run<R: BufRead, W: Write, E: Write>(
    lines: &mut LineReader<R>,
    out: &mut W,
    err: &mut E,
    summary: Option<SummaryFormat>,
) -> anyhow::Result<()> {
    while let Some(line) = lines.next_line()? {
        let parsed = RawCommand::parse(line)
            .and_then(|raw| raw.map(|raw| StartCommand::from_raw(&raw)).transpose());
        let number = lines.line();

        let command = match parsed {
            Ok(None) => continue,
            Ok(Some(command)) => command,
            Err(error) => {
                warn!(line = number, %error, "malformed mode line");
                writeln!(err, "ERROR {number}")?;
                continue;
            }
        };

        match command {
            StartCommand::Batch(params) => {
                let Some(mut game) = new_game(params, number) else {
                    writeln!(err, "ERROR {number}")?;
                    continue;
                };
                writeln!(out, "OK {number}")?;
                batch::run(&mut game, lines, out, err)?;
                if let Some(format) = summary {
                    write_summary(&game, format, out)?;
                }
                return Ok(());
            }
            StartCommand::Interactive(params) => {
                let Some(game) = new_game(params, number) else {
                    writeln!(err, "ERROR {number}")?;
                    continue;
                };
                if !interactive::fits_terminal(&game) {
                    warn!(line = number, "board does not fit the terminal");
                    writeln!(out, "{TERMINAL_TOO_SMALL}")?;
                    writeln!(err, "ERROR {number}")?;
                    continue;
                }
                writeln!(out, "OK {number}")?;
                out.flush()?;
                return interactive::run(game, out);
            }
        }
    }

    info!(lines = lines.line(), "input ended before a game started");
    Ok(())
}

fn new_game(params: GameParams, line: usize) -> Option<Game> {
    let GameParams {
        width,
        height,
        players,
        max_areas,
    } = params;
    Game::new(width, height, players, max_areas)
        .inspect_err(|error| warn!(line, %error, "cannot create game"))
        .ok()
}

/// Print `PLAYER <n> <tiles>` for every player.
pub fn write_results<W: Write>(game: &Game, out: &mut W) -> std::io::Result<()> {
    for player in game.players() {
        writeln!(out, "PLAYER {} {}", player.id, player.tiles)?;
    }
    out.flush()
}

fn write_summary<W: Write>(game: &Game, format: SummaryFormat, out: &mut W) -> anyhow::Result<()> {
    match format {
        SummaryFormat::Text => write_results(game, out)?,
        SummaryFormat::Json => writeln!(out, "{}", game.summary_json()?)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run_session(input: &str, summary: Option<SummaryFormat>) -> (String, String) {
        let mut lines = LineReader::new(input.as_bytes());
        let mut out = Vec::new();
        let mut err = Vec::new();
        run(&mut lines, &mut out, &mut err, summary).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_batch_start() {
        let (out, err) = run_session("B 2 2 2 1\nm 1 0 0\nb 1\n", None);
        assert_eq!(out, "OK 1\n1\n1\n");
        assert_eq!(err, "");
    }

    #[test]
    fn test_errors_before_mode_line() {
        let input = "\
# header

m 1 0 0
B 0 2 2 1
B 2 2 2
Bx 2 2 2 1
B 2 2 2 1
x 1
b 1
";
        let (out, err) = run_session(input, None);
        assert_eq!(out, "OK 7\n0\n");
        // Line numbering carries on into batch mode
        assert_eq!(err, "ERROR 3\nERROR 4\nERROR 5\nERROR 6\nERROR 8\n");
    }

    #[test]
    fn test_input_without_mode_line() {
        let (out, err) = run_session("# nothing\n\nm 1 1 1", None);
        assert_eq!(out, "");
        assert_eq!(err, "ERROR 3\n");
    }

    #[test]
    fn test_text_summary() {
        let (out, _) = run_session("B 3 1 3 1\nm 1 0 0\nm 3 2 0\n", Some(SummaryFormat::Text));
        assert_eq!(out, "OK 1\n1\n1\nPLAYER 1 1\nPLAYER 2 0\nPLAYER 3 1\n");
    }

    #[test]
    fn test_json_summary() {
        let (out, _) = run_session("B 2 1 2 1\nm 2 0 0\n", Some(SummaryFormat::Json));
        let json = out.strip_prefix("OK 1\n1\n").unwrap();
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["board"][0], "2.");
        assert_eq!(value["players"][1]["tiles"], 1);
    }
}
