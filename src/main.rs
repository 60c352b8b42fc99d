//! Terminal runner (default binary).
//!
//! Owns the external collaborators of the engine: the gravity timer, the
//! keyboard and the screen. Configuration comes from `BLOCKFALL_CONFIG` (a JSON
//! file) or the `BLOCKFALL_*` variables; `BLOCKFALL_LOG_PATH` enables the JSONL
//! event log.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use blockfall::core::{EngineConfig, GameSnapshot, GameState};
use blockfall::event_log::{EventLog, LogRecord};
use blockfall::input::{handle_key_event, should_quit, wants_modifier_reports};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, FRAME_MS};

fn main() -> Result<()> {
    let config = load_config()?;
    let mut game = GameState::with_config(config)?;
    let mut log = EventLog::from_env()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, log.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(log) = log.as_mut() {
        match log.take_failure() {
            Some(failure) => eprintln!("[blockfall] {failure}"),
            None => eprintln!("[blockfall] events written to {}", log.path().display()),
        }
    }
    if result.is_ok() {
        eprintln!("[blockfall] {} lines cleared", game.lines());
    }
    result
}

fn load_config() -> Result<EngineConfig> {
    match std::env::var("BLOCKFALL_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            EngineConfig::from_json_str(&json).with_context(|| format!("parsing config {path}"))
        }
        Err(_) => Ok(EngineConfig::from_env()),
    }
}

fn run(term: &mut TerminalRenderer, game: &mut GameState, mut log: Option<&mut EventLog>) -> Result<()> {
    // Without modifier reports Ctrl only rotates together with `z`.
    let _ = term.push_keyboard_flags(wants_modifier_reports());

    if let Some(log) = log.as_deref_mut() {
        log.record(&LogRecord::Start {
            config: game.config(),
        });
    }

    let view = GameView::default().with_palette(&game.config().palette);
    let gravity = Duration::from_millis(game.config().gravity_ms as u64);
    let frame = Duration::from_millis(FRAME_MS as u64);

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = gravity.saturating_sub(last_tick.elapsed()).min(frame);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(GameAction::Restart) => {
                            let seed = game.bag().seed();
                            game.restart();
                            last_tick = Instant::now();
                            if let Some(log) = log.as_deref_mut() {
                                log.record(&LogRecord::Restart { seed });
                            }
                        }
                        Some(action) => {
                            game.apply_action(action);
                        }
                        None => {}
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= gravity {
            last_tick = Instant::now();
            game.tick();
        }

        if let Some(event) = game.take_last_event() {
            if let Some(log) = log.as_deref_mut() {
                log.record(&LogRecord::Lock(event));
            }
        }
    }
}
