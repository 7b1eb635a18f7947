//! Game session module - the gameplay state machine
//!
//! This module ties together the board, catalog, generator, resolver and
//! scoring. It owns the active/next/held pieces and drives the cycle
//! spawn → fall → lock → clear → spawn until the session tops out or the
//! time-attack clock runs out.
//!
//! The host talks to a session in three ways:
//!
//! - [`GameSession::apply`] for abstract input commands
//! - [`GameSession::advance`] with elapsed milliseconds (fixed timestep), or
//!   the primitive [`GameSession::gravity_tick`] / [`GameSession::clock_tick`]
//!   if it runs its own timers
//! - [`GameSession::drain_events`] to pick up what happened since last time
//!
//! Rejected commands (blocked moves, rotations with no legal kick, input while
//! paused) leave the state untouched and emit nothing.

use crate::board::Board;
use crate::collision::{can_move_by, drop_row, try_rotate};
use crate::piece::Piece;
use crate::rng::PieceGenerator;
use crate::scoring::{gravity_interval_ms, level_for_score, line_clear_score};
use crate::snapshot::SessionSnapshot;
use crate::types::*;

/// Session phases
///
/// `Ready`, `Go` and `Finishing` are timed presentation gates; gameplay only
/// runs in `Falling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Ready,
    Go,
    Falling,
    Paused,
    /// Game over fired; waiting before results are due
    Finishing,
    Over,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Go => "go",
            Phase::Falling => "falling",
            Phase::Paused => "paused",
            Phase::Finishing => "finishing",
            Phase::Over => "over",
        }
    }

    /// Phases whose screen offers Retry: the pause menu and the results.
    pub fn offers_retry(&self) -> bool {
        matches!(self, Phase::Paused | Phase::Over)
    }
}

/// Everything needed to start a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: GameMode,
    /// Seed for the piece generator
    pub seed: u32,
    /// Current ranking head for this mode, for display only
    pub high_score: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Normal,
            seed: 1,
            high_score: 0,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    generator: PieceGenerator,
    active: Option<Piece>,
    next: Option<Piece>,
    held: Option<Piece>,
    phase: Phase,
    /// Remaining time in a timed phase (Ready, Go, Finishing)
    phase_timer_ms: u32,
    score: u32,
    lines: u32,
    level: u32,
    gravity_interval_ms: u32,
    gravity_timer_ms: u32,
    /// Seconds elapsed (normal) or remaining (time attack)
    clock_seconds: u32,
    clock_timer_ms: u32,
    game_over: bool,
    /// Pending outward events, oldest first
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session in the `Ready` phase
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            board: Board::new(),
            generator: PieceGenerator::new(config.seed),
            active: None,
            next: None,
            held: None,
            phase: Phase::Ready,
            phase_timer_ms: READY_MS,
            score: 0,
            lines: 0,
            level: 0,
            gravity_interval_ms: BASE_GRAVITY_MS,
            gravity_timer_ms: 0,
            clock_seconds: config.mode.initial_clock_seconds(),
            clock_timer_ms: 0,
            game_over: false,
            events: vec![GameEvent::Ready],
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.config.high_score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn gravity_interval_ms(&self) -> u32 {
        self.gravity_interval_ms
    }

    pub fn clock_seconds(&self) -> u32 {
        self.clock_seconds
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    pub fn held(&self) -> Option<Piece> {
        self.held
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Seed that continues this session's piece sequence
    pub fn seed(&self) -> u32 {
        self.generator.seed()
    }

    /// Landing row of the active piece
    pub fn ghost_row(&self) -> Option<i8> {
        self.active.map(|piece| drop_row(&self.board, &piece))
    }

    /// Take every pending event, oldest first
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Pending events without consuming them
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active;
        out.ghost_row = self.ghost_row();
        out.next = self.next;
        out.held = self.held;
        out.mode = self.config.mode;
        out.phase = self.phase;
        out.score = self.score;
        out.high_score = self.config.high_score;
        out.lines = self.lines;
        out.level = self.level;
        out.gravity_interval_ms = self.gravity_interval_ms;
        out.clock_seconds = self.clock_seconds;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance session time by `elapsed_ms`.
    ///
    /// Counts down the timed phases and, while falling, feeds the clock and
    /// gravity accumulators. Returns true if the board or active piece changed.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        match self.phase {
            Phase::Ready => {
                if self.count_down_phase(elapsed_ms) {
                    self.phase = Phase::Go;
                    self.phase_timer_ms = GO_MS;
                    self.events.push(GameEvent::Go);
                }
                false
            }
            Phase::Go => {
                if self.count_down_phase(elapsed_ms) {
                    self.begin_play();
                    return true;
                }
                false
            }
            Phase::Falling => self.advance_falling(elapsed_ms),
            Phase::Finishing => {
                if self.count_down_phase(elapsed_ms) {
                    self.phase = Phase::Over;
                    self.events.push(GameEvent::ResultsDue);
                }
                false
            }
            Phase::Paused | Phase::Over => false,
        }
    }

    fn count_down_phase(&mut self, elapsed_ms: u32) -> bool {
        self.phase_timer_ms = self.phase_timer_ms.saturating_sub(elapsed_ms);
        self.phase_timer_ms == 0
    }

    fn advance_falling(&mut self, elapsed_ms: u32) -> bool {
        let mut changed = false;

        self.clock_timer_ms += elapsed_ms;
        while self.clock_timer_ms >= CLOCK_MS && self.phase == Phase::Falling {
            self.clock_timer_ms -= CLOCK_MS;
            self.clock_tick();
        }

        self.gravity_timer_ms += elapsed_ms;
        while self.gravity_timer_ms >= self.gravity_interval_ms && self.phase == Phase::Falling {
            self.gravity_timer_ms -= self.gravity_interval_ms;
            changed |= self.gravity_tick();
        }

        changed
    }

    /// First spawn after the start presentation
    fn begin_play(&mut self) {
        self.phase = Phase::Falling;
        self.phase_timer_ms = 0;
        self.gravity_timer_ms = 0;
        self.clock_timer_ms = 0;
        self.active = Some(Piece::spawn(self.generator.next_kind()));
        self.next = Some(Piece::spawn(self.generator.next_kind()));
    }

    /// Skip the Ready/Go presentation and start falling right away
    pub fn skip_intro(&mut self) {
        if matches!(self.phase, Phase::Ready | Phase::Go) {
            self.begin_play();
        }
    }

    /// One gravity step: fall a row, or lock when blocked below
    pub fn gravity_tick(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if can_move_by(&self.board, &active, 1, 0) {
            self.active = Some(active.shifted(1, 0));
        } else {
            self.lock_active(PLACEMENT_BONUS);
        }
        true
    }

    /// One second of session clock
    ///
    /// Counts up in normal mode. In time attack it counts down and reaching
    /// zero ends the game through the same path as a top-out.
    pub fn clock_tick(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }

        match self.config.mode {
            GameMode::Normal => {
                self.clock_seconds = self.clock_seconds.saturating_add(1);
                self.events.push(GameEvent::ClockChanged(self.clock_seconds));
            }
            GameMode::TimeAttack => {
                self.clock_seconds = self.clock_seconds.saturating_sub(1);
                self.events.push(GameEvent::ClockChanged(self.clock_seconds));
                if self.clock_seconds == 0 {
                    self.trigger_game_over();
                }
            }
        }
        true
    }

    /// Apply an input command; returns whether anything changed
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.try_shift(-1),
            Command::MoveRight => self.try_shift(1),
            Command::SoftDropStart => {
                if self.phase != Phase::Falling {
                    return false;
                }
                self.set_gravity_interval(SOFT_DROP_MS)
            }
            Command::SoftDropEnd => {
                if !matches!(self.phase, Phase::Falling | Phase::Paused) {
                    return false;
                }
                self.set_gravity_interval(SOFT_DROP_RELEASE_MS)
            }
            Command::Rotate => self.rotate(),
            Command::HardDrop => self.hard_drop(),
            Command::Hold => self.hold(),
            Command::Pause => match self.phase {
                Phase::Falling => self.pause(),
                Phase::Paused => self.resume(),
                _ => false,
            },
            Command::Restart => {
                self.restart();
                true
            }
        }
    }

    fn try_shift(&mut self, d_col: i8) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if can_move_by(&self.board, &active, 0, d_col) {
            self.active = Some(active.shifted(0, d_col));
            return true;
        }
        false
    }

    fn rotate(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match try_rotate(&self.board, &active) {
            Some(rotated) => {
                self.active = Some(rotated);
                self.events.push(GameEvent::Rotated);
                true
            }
            None => false,
        }
    }

    /// Drop straight to the landing row and lock without waiting for gravity
    fn hard_drop(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let landing = drop_row(&self.board, &active);
        self.active = Some(Piece {
            row: landing,
            ..active
        });
        self.lock_active(HARD_DROP_BONUS);
        true
    }

    /// Swap the active piece with the hold slot.
    ///
    /// An empty slot takes the active piece and the next piece becomes active
    /// (a new next is generated). Otherwise active and held swap in place: the
    /// piece coming back keeps the position and mask it had when it was held.
    /// Holding is allowed any number of times per piece.
    fn hold(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.held.take() {
            None => {
                self.active = self.next.take();
                self.next = Some(Piece::spawn(self.generator.next_kind()));
            }
            Some(held) => {
                self.active = Some(held);
            }
        }
        self.held = Some(active);
        self.events.push(GameEvent::Held);
        true
    }

    /// Freeze gravity and the session clock
    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        self.phase = Phase::Paused;
        self.events.push(GameEvent::Paused);
        true
    }

    /// Restart gravity and the clock from the current interval and value
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Falling;
        self.gravity_timer_ms = 0;
        self.clock_timer_ms = 0;
        self.events.push(GameEvent::Resumed);
        true
    }

    /// Replace this session with a fresh one in the same mode.
    ///
    /// The piece sequence continues from the current generator state, and a
    /// finished game's score is folded into the displayed high score.
    pub fn restart(&mut self) {
        let high_score = if self.game_over {
            self.config.high_score.max(self.score)
        } else {
            self.config.high_score
        };
        let config = SessionConfig {
            seed: self.generator.seed(),
            high_score,
            ..self.config
        };
        *self = Self::new(config);
    }

    /// End the session.
    ///
    /// Idempotent: only the first call emits [`GameEvent::GameOver`] and starts
    /// the finish delay. Returns whether this call ended the game.
    pub fn trigger_game_over(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.game_over = true;
        self.phase = Phase::Finishing;
        self.phase_timer_ms = FINISH_MS;
        self.events.push(GameEvent::GameOver(self.score));
        true
    }

    /// Commit the active piece, award `bonus`, clear lines and spawn.
    fn lock_active(&mut self, bonus: u32) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.place(&active);
        self.events.push(GameEvent::PieceLocked);
        self.add_score(bonus);

        self.clear_lines();
        self.spawn();
    }

    fn clear_lines(&mut self) {
        let cleared = self.board.clear_full_rows().len();
        if cleared == 0 {
            return;
        }
        self.lines += cleared as u32;
        self.events.push(GameEvent::LinesCleared(cleared as u32));
        self.add_score(line_clear_score(cleared));
    }

    /// Promote next to active, generate a new next, and check for top-out
    fn spawn(&mut self) {
        let incoming = match self.next.take() {
            Some(piece) => piece,
            None => Piece::spawn(self.generator.next_kind()),
        };
        self.active = Some(incoming);
        self.next = Some(Piece::spawn(self.generator.next_kind()));

        if self.overlaps_board(&incoming) {
            self.trigger_game_over();
        }
    }

    /// Whether any in-well cell of `piece` sits on an occupied cell
    fn overlaps_board(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .any(|(row, col)| row >= 0 && self.board.is_occupied(row, col))
    }

    /// Add points, then re-derive the level; gravity only speeds up when the
    /// level actually rises.
    fn add_score(&mut self, points: u32) {
        if points == 0 {
            return;
        }
        self.score = self.score.saturating_add(points);
        self.events.push(GameEvent::ScoreChanged(self.score));

        let level = level_for_score(self.score);
        if level > self.level {
            self.level = level;
            self.set_gravity_interval(gravity_interval_ms(level));
            self.events.push(GameEvent::LevelChanged(level));
        }
    }

    /// Change the gravity interval; a change restarts the gravity accumulator
    fn set_gravity_interval(&mut self, interval_ms: u32) -> bool {
        if self.gravity_interval_ms == interval_ms {
            return false;
        }
        self.gravity_interval_ms = interval_ms;
        self.gravity_timer_ms = 0;
        true
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
