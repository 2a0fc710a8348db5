//! Terminal Tetris runner (default binary).
//!
//! Owns the terminal lifecycle and the frame loop: advance the game, render a
//! snapshot, flush the framebuffer, sleep briefly, repeat until quit.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use term_tetris::core::{Flow, GameLoop, GameSnapshot, GameState, MonotonicClock};
use term_tetris::input::TerminalInput;
use term_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport, ViewportFit};
use term_tetris::types::FRAME_SLEEP_MS;

/// Falling-block puzzle game for the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the piece sequence (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Append logs to this file; filter with RUST_LOG (default: info)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let state = match args.seed {
        Some(seed) => {
            info!("starting game with seed {}", seed);
            GameState::new(seed)
        }
        None => {
            info!("starting game with random seed");
            GameState::default()
        }
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, state);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        warn!("failed to restore terminal: {:#}", err);
    }

    let (score, lines) = result?;
    info!("game finished: score={} lines={}", score, lines);
    Ok(())
}

/// Log to a file only: anything written to the terminal would corrupt the
/// alternate screen.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}

fn run(term: &mut TerminalRenderer, state: GameState) -> Result<(u32, u32)> {
    let view = GameView::default();
    let mut input = TerminalInput::new();
    let mut game = GameLoop::new(state, MonotonicClock::new());

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let frame_sleep = Duration::from_millis(FRAME_SLEEP_MS);
    let mut too_small = false;

    loop {
        if game.frame(&mut input).context("polling input")? == Flow::Quit {
            break;
        }

        if let Some(event) = game.state_mut().take_last_event() {
            if event.lines_cleared > 0 {
                info!(
                    "cleared {} line(s) with {:?} for {} points",
                    event.lines_cleared, event.kind, event.points
                );
            }
        }

        game.state().snapshot_into(&mut snap);
        let fit = view.render_into(&snap, viewport(), &mut fb);
        if fit == ViewportFit::TooSmall {
            if !too_small {
                warn!("terminal smaller than the playfield, pausing");
            }
            game.state_mut().force_pause();
        }
        too_small = fit == ViewportFit::TooSmall;

        term.draw_swap(&mut fb)?;
        thread::sleep(frame_sleep);
    }

    let state = game.state();
    let (score, lines) = (state.score(), state.lines());

    let mut summary = view.render_summary(score, lines, viewport());
    term.invalidate();
    term.draw_swap(&mut summary)?;
    input.wait_for_key().context("waiting for final key press")?;

    Ok((score, lines))
}
