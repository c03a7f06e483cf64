//! Line-oriented command syntax shared by the start-up and batch phases.
//!
//! A command line is a single letter, then whitespace, then unsigned
//! decimal numbers separated by whitespace. Blank lines and lines starting
//! with `#` carry no command.

use gamma_core::PlayerId;
use std::io::{self, BufRead};
use thiserror::Error;

/// Errors for malformed command lines
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    UnknownCommand(char),

    #[error("command letter must be followed by whitespace")]
    MissingSeparator,

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("expected {expected} arguments, found {found}")]
    ArgumentCount { expected: usize, found: usize },
}

/// A line split into its command letter and numeric arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommand {
    pub letter: u8,
    pub args: Vec<u32>,
}

impl RawCommand {
    /// Split a line. Returns `Ok(None)` for blank and comment lines.
    pub fn parse(line: &[u8]) -> Result<Option<Self>, CommandError> {
        let Some((&letter, rest)) = line.split_first() else {
            return Ok(None);
        };
        if letter == b'#' {
            return Ok(None);
        }
        if rest.first().is_some_and(|&c| !is_blank(c)) {
            return Err(CommandError::MissingSeparator);
        }

        let args = rest
            .split(|&c| is_blank(c))
            .filter(|token| !token.is_empty())
            .map(parse_number)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Self { letter, args }))
    }

    /// Arguments as a fixed-size array, checking the count
    fn expect<const N: usize>(&self) -> Result<[u32; N], CommandError> {
        <[u32; N]>::try_from(self.args.as_slice()).map_err(|_| CommandError::ArgumentCount {
            expected: N,
            found: self.args.len(),
        })
    }

    fn unknown(&self) -> CommandError {
        CommandError::UnknownCommand(char::from(self.letter))
    }
}

/// Whitespace allowed between tokens. Newlines end the line instead.
fn is_blank(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | 0x0b | 0x0c | b'\r')
}

fn parse_number(token: &[u8]) -> Result<u32, CommandError> {
    let invalid = || CommandError::InvalidNumber(String::from_utf8_lossy(token).into_owned());
    if !token.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    std::str::from_utf8(token)
        .ok()
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(invalid)
}

/// Game parameters given on a mode line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameParams {
    pub width: u32,
    pub height: u32,
    pub players: u32,
    pub max_areas: u32,
}

/// Commands accepted before a game starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartCommand {
    /// `B width height players areas`
    Batch(GameParams),
    /// `I width height players areas`
    Interactive(GameParams),
}

impl StartCommand {
    pub fn from_raw(raw: &RawCommand) -> Result<Self, CommandError> {
        let params = |raw: &RawCommand| {
            raw.expect::<4>()
                .map(|[width, height, players, max_areas]| GameParams {
                    width,
                    height,
                    players,
                    max_areas,
                })
        };
        match raw.letter {
            b'B' => params(raw).map(StartCommand::Batch),
            b'I' => params(raw).map(StartCommand::Interactive),
            _ => Err(raw.unknown()),
        }
    }
}

/// Commands accepted in batch mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchCommand {
    /// `m player x y`
    Move { player: PlayerId, x: u32, y: u32 },
    /// `g player x y`
    Golden { player: PlayerId, x: u32, y: u32 },
    /// `b player`
    BusyFields(PlayerId),
    /// `f player`
    FreeFields(PlayerId),
    /// `q player`
    GoldenPossible(PlayerId),
    /// `p`
    Board,
}

impl BatchCommand {
    pub fn from_raw(raw: &RawCommand) -> Result<Self, CommandError> {
        Ok(match raw.letter {
            b'm' => {
                let [player, x, y] = raw.expect::<3>()?;
                BatchCommand::Move { player, x, y }
            }
            b'g' => {
                let [player, x, y] = raw.expect::<3>()?;
                BatchCommand::Golden { player, x, y }
            }
            b'b' => BatchCommand::BusyFields(raw.expect::<1>()?[0]),
            b'f' => BatchCommand::FreeFields(raw.expect::<1>()?[0]),
            b'q' => BatchCommand::GoldenPossible(raw.expect::<1>()?[0]),
            b'p' => {
                raw.expect::<0>()?;
                BatchCommand::Board
            }
            _ => return Err(raw.unknown()),
        })
    }
}

/// Reads the command stream line by line, keeping the line number.
pub struct LineReader<R> {
    reader: R,
    line: usize,
    buffer: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buffer: Vec::new(),
        }
    }

    /// Number of the line most recently returned
    pub fn line(&self) -> usize {
        self.line
    }

    /// Next line without its terminating newline, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
        }
        Ok(Some(self.buffer.as_slice()))
    }
}
