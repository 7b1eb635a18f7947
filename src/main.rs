//! Terminal runner (default binary).
//!
//! Fixed 16ms timestep: poll input until the next tick, advance the session,
//! react to its events, then redraw through the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::config::{parse_args, HostConfig};
use blockfall::core::{GameSession, SessionConfig, SessionSnapshot};
use blockfall::input::{should_quit, InputHandler};
use blockfall::ranking::{Ranking, RankingStore};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{Command, GameEvent, GameMode, TICK_MS};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;

    let store = RankingStore::from_env();
    let mut ranking = store.load();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, &store, &mut ranking);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        eprintln!("[Host] Failed to restore terminal: {:#}", e);
    }
    result
}

fn run(
    term: &mut TerminalRenderer,
    config: HostConfig,
    store: &RankingStore,
    ranking: &mut Ranking,
) -> Result<()> {
    let mut session = GameSession::new(SessionConfig {
        mode: config.mode,
        seed: config.resolve_seed(),
        high_score: ranking.high_score(config.mode),
    });

    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = SessionSnapshot::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into_with_ranking(
            &snap,
            ranking.scores(session.mode()),
            Viewport::new(w, h),
            &mut fb,
        );
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout).context("polling terminal events")? {
            match event::read().context("reading terminal event")? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        return Ok(());
                    }
                    for command in input.handle_key_event(key) {
                        apply_command(&mut session, &mut input, command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if let Some(command) = input.update(TICK_MS) {
                apply_command(&mut session, &mut input, command);
            }
            session.advance(TICK_MS);

            let mode = session.mode();
            for event in session.drain_events() {
                if let GameEvent::GameOver(score) = event {
                    record_score(store, ranking, mode, score);
                }
            }
        }
    }
}

/// Restart is only honored from the pause menu and the results screen
fn apply_command(session: &mut GameSession, input: &mut InputHandler, command: Command) {
    if command == Command::Restart {
        if !session.phase().offers_retry() {
            return;
        }
        input.reset();
    }
    session.apply(command);
}

fn record_score(
    store: &RankingStore,
    ranking: &mut Ranking,
    mode: GameMode,
    score: u32,
) {
    ranking.record(mode, score);
    if let Err(e) = store.save(ranking) {
        eprintln!("[Ranking] Failed to save {}: {:#}", store.path().display(), e);
    }
}
