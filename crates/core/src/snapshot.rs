use crate::piece::Piece;
use crate::session::Phase;
use crate::types::{Cell, GameMode, BOARD_COLS, BOARD_ROWS};

pub type BoardGrid = [[Cell; BOARD_COLS as usize]; BOARD_ROWS as usize];

/// Read-only view of a session for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Locked cells, walls included; the active piece is not merged in
    pub board: BoardGrid,
    pub active: Option<Piece>,
    /// Anchor row the active piece would land on
    pub ghost_row: Option<i8>,
    pub next: Option<Piece>,
    pub held: Option<Piece>,
    pub mode: GameMode,
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub lines: u32,
    pub level: u32,
    pub gravity_interval_ms: u32,
    pub clock_seconds: u32,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_COLS as usize]; BOARD_ROWS as usize];
        self.active = None;
        self.ghost_row = None;
        self.next = None;
        self.held = None;
        self.mode = GameMode::Normal;
        self.phase = Phase::Ready;
        self.score = 0;
        self.high_score = 0;
        self.lines = 0;
        self.level = 0;
        self.gravity_interval_ms = 0;
        self.clock_seconds = 0;
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling
    }

    pub fn game_over(&self) -> bool {
        matches!(self.phase, Phase::Finishing | Phase::Over)
    }

    /// Clock split into `(minutes, seconds)` for an `MM:SS` display
    pub fn clock_fields(&self) -> (u32, u32) {
        (self.clock_seconds / 60, self.clock_seconds % 60)
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_COLS as usize]; BOARD_ROWS as usize],
            active: None,
            ghost_row: None,
            next: None,
            held: None,
            mode: GameMode::Normal,
            phase: Phase::Ready,
            score: 0,
            high_score: 0,
            lines: 0,
            level: 0,
            gravity_interval_ms: 0,
            clock_seconds: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_fields() {
        let mut snap = SessionSnapshot::default();
        snap.clock_seconds = 180;
        assert_eq!(snap.clock_fields(), (3, 0));
        snap.clock_seconds = 65;
        assert_eq!(snap.clock_fields(), (1, 5));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut snap = SessionSnapshot::default();
        snap.score = 99;
        snap.phase = Phase::Paused;
        snap.board[3][3] = Some(crate::types::Block::Wall);
        snap.clear();
        assert_eq!(snap, SessionSnapshot::default());
        assert!(!snap.playable());
        assert!(!snap.game_over());
    }
}
