//! Integration tests for the session lifecycle

use blockfall::core::{GameSession, Phase, SessionConfig};
use blockfall::types::{Command, GameEvent, GameMode, TICK_MS};

fn config(mode: GameMode, seed: u32) -> SessionConfig {
    SessionConfig {
        mode,
        seed,
        high_score: 0,
    }
}

/// Run fixed 16ms ticks until `phase` is reached or `max_ms` elapses
fn run_until(session: &mut GameSession, phase: Phase, max_ms: u32) -> u32 {
    let mut elapsed = 0;
    while session.phase() != phase && elapsed < max_ms {
        session.advance(TICK_MS);
        elapsed += TICK_MS;
    }
    elapsed
}

#[test]
fn test_game_lifecycle() {
    let mut session = GameSession::new(config(GameMode::Normal, 12345));
    assert_eq!(session.phase(), Phase::Ready);
    assert!(session.active().is_none());

    let elapsed = run_until(&mut session, Phase::Falling, 10_000);
    // Ready (2000ms) + Go (1000ms), rounded up to whole ticks.
    assert!((3000..3000 + 2 * TICK_MS).contains(&elapsed), "{}", elapsed);
    assert!(session.active().is_some());
    assert!(session.next().is_some());
    assert!(!session.is_game_over());

    let events: Vec<_> = session.drain_events().collect();
    assert_eq!(&events[..2], &[GameEvent::Ready, GameEvent::Go]);
}

#[test]
fn test_game_actions() {
    let mut session = GameSession::new(config(GameMode::Normal, 12345));
    session.skip_intro();

    let initial = session.active().unwrap();

    // Move left (may fail at the wall, but should try)
    if session.apply(Command::MoveLeft) {
        assert_eq!(session.active().unwrap().col, initial.col - 1);
    }

    // Rotate (may or may not succeed depending on piece position)
    session.apply(Command::Rotate);

    assert!(session.gravity_tick());
    assert!(session.active().unwrap().row > initial.row - 2);
    assert!(!session.is_game_over());
}

#[test]
fn test_game_pause() {
    let mut session = GameSession::new(config(GameMode::Normal, 7));
    session.skip_intro();

    assert!(session.apply(Command::Pause));
    assert!(session.is_paused());

    let before = session.snapshot();
    for _ in 0..500 {
        session.advance(TICK_MS);
    }
    assert!(!session.apply(Command::HardDrop));
    assert_eq!(session.snapshot(), before);

    assert!(session.apply(Command::Pause));
    assert!(!session.is_paused());
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        Command::MoveLeft,
        Command::Rotate,
        Command::HardDrop,
        Command::MoveRight,
        Command::MoveRight,
        Command::HardDrop,
        Command::Hold,
        Command::HardDrop,
    ];

    let play = || {
        let mut session = GameSession::new(config(GameMode::Normal, 99));
        session.skip_intro();
        for command in script {
            session.apply(command);
            session.advance(TICK_MS);
        }
        session.snapshot()
    };

    assert_eq!(play(), play());
}

#[test]
fn test_hard_drops_until_top_out() {
    let mut session = GameSession::new(config(GameMode::Normal, 2024));
    session.skip_intro();

    // Stacking in the middle column tops out well before 200 pieces.
    let mut drops = 0;
    while !session.is_game_over() && drops < 200 {
        session.apply(Command::HardDrop);
        drops += 1;
    }
    assert!(session.is_game_over());
    assert_eq!(session.phase(), Phase::Finishing);

    let overs: Vec<_> = session
        .drain_events()
        .filter(|e| matches!(e, GameEvent::GameOver(_)))
        .collect();
    assert_eq!(overs, vec![GameEvent::GameOver(session.score())]);

    // Gameplay is frozen after game over.
    assert!(!session.apply(Command::HardDrop));

    run_until(&mut session, Phase::Over, 10_000);
    assert_eq!(session.phase(), Phase::Over);
    assert!(session.drain_events().any(|e| e == GameEvent::ResultsDue));
}

#[test]
fn test_restart_after_results() {
    let mut session = GameSession::new(config(GameMode::TimeAttack, 5));
    session.skip_intro();
    while !session.is_game_over() {
        session.apply(Command::HardDrop);
    }
    let final_score = session.score();
    run_until(&mut session, Phase::Over, 10_000);

    assert!(session.apply(Command::Restart));
    assert_eq!(session.phase(), Phase::Ready);
    assert_eq!(session.mode(), GameMode::TimeAttack);
    assert_eq!(session.score(), 0);
    assert_eq!(session.high_score(), final_score);
    assert_eq!(session.board().filled_interior_cells(), 0);
}

#[test]
fn test_retry_from_pause_menu() {
    let mut session = GameSession::new(config(GameMode::Normal, 21));
    session.skip_intro();
    session.apply(Command::HardDrop);
    assert!(session.score() > 0);

    assert!(!session.phase().offers_retry());
    session.apply(Command::Pause);
    assert!(session.phase().offers_retry());

    assert!(session.apply(Command::Restart));
    assert_eq!(session.phase(), Phase::Ready);
    assert_eq!(session.score(), 0);
    assert_eq!(session.high_score(), 0, "abandoned game is not ranked");
    assert_eq!(session.board().filled_interior_cells(), 0);
}

#[test]
fn test_time_attack_runs_out() {
    let mut session = GameSession::new(config(GameMode::TimeAttack, 3));
    session.skip_intro();
    let mut last_clock = session.clock_seconds();
    let mut elapsed = 0u32;
    while !session.is_game_over() && elapsed < 200_000 {
        session.advance(1000);
        elapsed += 1000;
        assert!(session.clock_seconds() <= last_clock);
        last_clock = session.clock_seconds();
    }
    assert!(session.is_game_over());
    // Either the clock hit zero or the stack topped out first.
    if elapsed >= 180_000 {
        assert_eq!(session.clock_seconds(), 0);
    }
}
