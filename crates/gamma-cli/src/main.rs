//! Gamma command-line front-end.
//!
//! Reads a command stream from stdin (or `--input`), starts a batch or
//! interactive game from its first mode line, and answers on stdout.
//! Protocol errors go to stderr; so do logs, filtered by `RUST_LOG`.

mod batch;
mod command;
mod interactive;
mod start;

use anyhow::Context;
use clap::Parser;
use command::LineReader;
use start::SummaryFormat;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Gamma - a territory game for several players
#[derive(Parser, Debug)]
#[command(name = "gamma")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print a per-player summary after batch mode
    #[arg(long, value_enum)]
    summary: Option<SummaryFormat>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut lines = LineReader::new(input);
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    start::run(&mut lines, &mut out, &mut err, args.summary)
}
