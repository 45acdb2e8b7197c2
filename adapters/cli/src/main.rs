#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Retro Tactics at a terminal prompt.

mod input;
mod save_file;
mod terminal;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use input::{Input, HELP};
use retro_tactics_engine::{Config, TurnEngine};
use retro_tactics_world::query;
use save_file::FileStore;
use terminal::TerminalPresenter;
use tracing::info;
use tracing_subscriber::EnvFilter;

type Session = TurnEngine<TerminalPresenter, FileStore>;

/// Turn-based tactics on an 8x8 board.
#[derive(Debug, Parser)]
#[command(name = "retro-tactics", version)]
struct Args {
    /// Seed for rosters and opponent choices; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// File used by the `save` and `load` commands.
    #[arg(long, default_value = "retro-tactics.save")]
    save_file: PathBuf,

    /// Log filter directive such as `debug` or `retro_tactics_world=debug`.
    #[arg(long)]
    log: Option<String>,

    /// Disable ANSI colors on the board.
    #[arg(long)]
    no_color: bool,
}

/// Entry point for the Retro Tactics command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_deref())?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let store = FileStore::new(args.save_file);
    info!(seed, save_file = %store.path().display(), "starting session");

    let mut session = TurnEngine::new(
        &Config::new(seed),
        TerminalPresenter::new(!args.no_color),
        store,
    );
    session.start();

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "seed {seed}; type `help` for commands")?;
    flush_report(&mut session, &mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line.context("could not read from standard input")?;
        match line.parse::<Input>() {
            Ok(Input::Quit) => break,
            Ok(input) => run(&mut session, input, &mut stdout)?,
            Err(error) => writeln!(stdout, "{error}")?,
        }
        flush_report(&mut session, &mut stdout)?;
    }

    Ok(())
}

fn init_logging(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter `{directive}`"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow!(error))
        .context("could not install the log subscriber")
}

fn run(session: &mut Session, input: Input, out: &mut impl Write) -> Result<()> {
    match input {
        Input::Click(cell) => session.click(cell),
        Input::Hover(cell) => session.hover(cell),
        Input::Leave(cell) => session.leave(cell),
        Input::NewGame => session.new_game(),
        Input::Save => {
            if let Err(error) = session.save() {
                writeln!(out, "{:#}", anyhow::Error::new(error))?;
            }
        }
        Input::Load => {
            if let Err(error) = session.load() {
                writeln!(out, "{:#}", anyhow::Error::new(error))?;
            }
        }
        Input::Board => session.presenter_mut().request_board(),
        Input::Help => writeln!(out, "{HELP}")?,
        Input::Quit => {}
    }
    Ok(())
}

fn flush_report(session: &mut Session, out: &mut impl Write) -> Result<()> {
    let report = session.presenter_mut().take_report();
    out.write_all(report.as_bytes())?;

    let world = session.world();
    if query::is_over(world) {
        writeln!(out, "game over; `new` starts another run")?;
    }
    write!(out, "> ")?;
    out.flush().context("could not write to standard output")
}
