//! Terminal endless runner (default binary).
//!
//! Owns the fixed-rate loop: polls crossterm for keys and resizes, hands the
//! simulation a clamped `dt`, and writes one full frame per tick. The runner
//! steers itself; the keyboard only pauses or quits. SIGTERM and SIGINT
//! end the run through the same exit path as `q`.

use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use log::{info, warn};

use tui_runner::config::RunnerConfig;
use tui_runner::{logging, signals};
use tui_runner::core::{GameState, SimpleRng};
use tui_runner::input::{map_key, should_quit};
use tui_runner::term::{FrameBuffer, TerminalRenderer, TrackView};
use tui_runner::types::{RunnerAction, FALLBACK_VIEWPORT, MAX_DT};

const TITLE: &str = "TUI RUNNER - press q to quit, p to pause";

fn main() -> Result<()> {
    let config = RunnerConfig::from_env();
    if let Err(e) = logging::init(&config.log_path) {
        // No logger to report through; this lands on the main screen.
        eprintln!("tui-runner: logging disabled: {:#}", e);
    }
    for warning in &config.warnings {
        warn!("{}", warning);
    }
    info!(
        "starting tui-runner: fps={} seed={} log={}",
        config.fps,
        config.seed,
        config.log_path.display()
    );

    if let Err(e) = signals::install() {
        warn!("failed to install signal handlers: {:#}", e);
    }

    let mut term = TerminalRenderer::new();
    term.enter().context("failed to enter terminal game mode")?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        warn!("failed to restore terminal: {:#}", e);
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &RunnerConfig) -> Result<()> {
    let (width, height) = terminal::size().unwrap_or(FALLBACK_VIEWPORT);
    info!("viewport {}x{}", width, height);

    let mut state = GameState::new(width, height);
    let mut rng = SimpleRng::new(config.seed);
    let view = TrackView::default();
    let mut fb = FrameBuffer::new(width, height);

    term.splash(TITLE, width)?;
    if event::poll(config.splash_duration())? {
        if let Event::Key(key) = event::read()? {
            if should_quit(key) {
                return Ok(());
            }
        }
    }

    let tick = config.tick_duration();
    let mut last_tick = Instant::now();
    let mut next_frame = last_tick + tick;
    let mut paused = false;

    loop {
        if signals::shutdown_requested() {
            info!("termination signal received");
            break;
        }

        // Input with timeout until next frame.
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match map_key(key) {
                    Some(RunnerAction::Quit) => break,
                    Some(RunnerAction::TogglePause) => {
                        paused = !paused;
                        let verb = if paused { "paused" } else { "resumed" };
                        info!("{} at t={:.2}", verb, state.elapsed());
                    }
                    None => {}
                },
                Event::Resize(w, h) => apply_resize(term, &mut state, w, h)?,
                _ => {}
            }
            continue;
        }

        let now = Instant::now();
        next_frame += tick;
        if next_frame < now {
            // Fell behind (stall or suspend); resync instead of bursting.
            next_frame = now + tick;
        }
        let dt = now.duration_since(last_tick).as_secs_f64().clamp(0.0, MAX_DT);
        last_tick = now;

        // Some terminals never deliver resize events.
        if let Ok((w, h)) = terminal::size() {
            apply_resize(term, &mut state, w, h)?;
        }

        if !paused {
            state.advance(dt, &mut rng);
        }
        view.render_into(&state, &mut fb);
        term.draw(&fb)?;
    }

    info!(
        "run finished: score={} coins={} time={:.1}s speed={:.2}",
        state.score(),
        state.coins_collected(),
        state.elapsed(),
        state.speed()
    );
    Ok(())
}

fn apply_resize(term: &mut TerminalRenderer, state: &mut GameState, w: u16, h: u16) -> Result<()> {
    if (w, h) == (state.width(), state.height()) {
        return Ok(());
    }
    info!("resize {}x{} -> {}x{}", state.width(), state.height(), w, h);
    state.resize(w, h);
    term.clear()
}
