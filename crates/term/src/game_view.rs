//! GameView: maps a [`SessionSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Phase, Piece, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Block, GameMode, PieceKind, BOARD_COLS, BOARD_ROWS};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Side panel width in terminal columns
const PANEL_W: u16 = 16;

/// A lightweight terminal renderer for a session.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn board_px(&self) -> (u16, u16) {
        (
            BOARD_COLS as u16 * self.cell_w,
            BOARD_ROWS as u16 * self.cell_h,
        )
    }

    /// Render the session into an existing framebuffer.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_ranking(snap, &[], viewport, fb);
    }

    /// Render the session, listing `ranking` on the results screen.
    pub fn render_into_with_ranking(
        &self,
        snap: &SessionSnapshot,
        ranking: &[u32],
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (board_w, board_h) = self.board_px();
        let start_x = viewport.width.saturating_sub(board_w + 2 + PANEL_W) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(board_h) / 2,
            AnchorY::Top => 0,
        };

        if snap.phase == Phase::Over {
            self.draw_results(fb, snap, ranking, start_x, start_y, board_w + 2 + PANEL_W);
            return;
        }

        for row in 0..BOARD_ROWS as i8 {
            for col in 0..BOARD_COLS as i8 {
                match snap.board[row as usize][col as usize] {
                    Some(Block::Wall) => self.draw_wall_cell(fb, start_x, start_y, row, col),
                    Some(Block::Piece(kind)) => {
                        self.draw_piece_cell(fb, start_x, start_y, row, col, kind)
                    }
                    None => self.draw_empty_cell(fb, start_x, start_y, row, col),
                }
            }
        }

        if let (Some(active), Some(ghost_row)) = (snap.active, snap.ghost_row) {
            let ghost = Piece {
                row: ghost_row,
                ..active
            };
            let style = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
            for (row, col) in ghost.cells() {
                if row >= 0 && snap.board[row as usize][col as usize].is_none() {
                    self.fill_cell_rect(fb, start_x, start_y, row, col, '░', style);
                }
            }
        }

        if let Some(active) = snap.active {
            for (row, col) in active.cells().filter(|&(row, _)| row >= 0) {
                self.draw_piece_cell(fb, start_x, start_y, row, col, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + board_w + 2, start_y);

        let overlay = match snap.phase {
            Phase::Ready => Some(("READY", Rgb::new(255, 255, 255))),
            Phase::Go => Some(("GO!", Rgb::new(255, 60, 60))),
            Phase::Paused => Some(("PAUSED", Rgb::new(255, 255, 255))),
            Phase::Finishing => Some(("GAME OVER", Rgb::new(255, 255, 255))),
            Phase::Falling | Phase::Over => None,
        };
        if let Some((text, fg)) = overlay {
            let style = CellStyle::new(fg, PANEL_BG).bold();
            fb.put_str_centered(start_x, board_w, start_y + board_h / 2, text, style);
            if snap.phase.offers_retry() {
                let hint = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG).dim();
                fb.put_str_centered(start_x, board_w, start_y + board_h / 2 + 2, "ENTER: RETRY", hint);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_ranking(
        &self,
        snap: &SessionSnapshot,
        ranking: &[u32],
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_ranking(snap, ranking, viewport, &mut fb);
        fb
    }

    fn draw_wall_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, row: i8, col: i8) {
        let style = CellStyle::new(Rgb::new(120, 120, 130), PANEL_BG);
        self.fill_cell_rect(fb, start_x, start_y, row, col, '▓', style);
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, row: i8, col: i8) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell_rect(fb, start_x, start_y, row, col, '·', style);
    }

    fn draw_piece_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: i8,
        col: i8,
        kind: PieceKind,
    ) {
        let style = CellStyle::new(piece_color(kind), PLAY_BG).bold();
        self.fill_cell_rect(fb, start_x, start_y, row, col, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: i8,
        col: i8,
        ch: char,
        style: CellStyle,
    ) {
        if row < 0 || col < 0 {
            return;
        }
        let px = start_x + col as u16 * self.cell_w;
        let py = start_y + row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, mode_label(snap.mode), label);
        y += 2;

        for (name, number) in [
            ("SCORE", snap.score),
            ("HIGH SCORE", snap.high_score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y += 2;
        }

        fb.put_str(panel_x, y, "TIME", label);
        let (minutes, seconds) = snap.clock_fields();
        let colon_x = panel_x + fb.put_u32_padded(panel_x, y + 1, minutes, 2, value);
        fb.put_char(colon_x, y + 1, ':', value);
        fb.put_u32_padded(colon_x + 1, y + 1, seconds, 2, value);
        y += 2;

        fb.put_str(panel_x, y, "NEXT", label);
        self.draw_preview(fb, panel_x, y + 1, snap.next);
        y += 5;

        fb.put_str(panel_x, y, "HOLD", label);
        self.draw_preview(fb, panel_x, y + 1, snap.held);
    }

    /// Draw a piece's current mask in a 4x4 preview box
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: Option<Piece>) {
        let Some(piece) = piece else {
            fb.put_str(x, y, "-", CellStyle::default().dim());
            return;
        };
        let style = CellStyle::new(piece_color(piece.kind), PANEL_BG).bold();
        for (dr, dc) in piece.shape.minos() {
            fb.fill_rect(
                x + dc as u16 * self.cell_w,
                y + dr as u16 * self.cell_h,
                self.cell_w,
                self.cell_h,
                '█',
                style,
            );
        }
    }

    fn draw_results(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        ranking: &[u32],
        x: u16,
        start_y: u16,
        w: u16,
    ) {
        let title = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG);
        let dim = value.dim();

        let mut y = start_y;
        fb.put_str_centered(x, w, y, "RESULTS", title);
        y += 1;
        fb.put_str_centered(x, w, y, mode_label(snap.mode), dim);
        y += 2;

        fb.put_str_centered(x, w, y, "SCORE", title);
        y += 1;
        let digits = digit_count(snap.score);
        fb.put_u32(x + w.saturating_sub(digits) / 2, y, snap.score, value);
        y += 2;

        fb.put_str_centered(x, w, y, "RANKING", title);
        y += 1;
        let col = x + w.saturating_sub(12) / 2;
        for (rank, &score) in ranking.iter().enumerate() {
            let style = if score == snap.score { title } else { value };
            fb.put_u32(col, y, rank as u32 + 1, style);
            fb.put_char(col + 1, y, '.', style);
            fb.put_u32(col + 3, y, score, style);
            y += 1;
        }
        y += 1;

        fb.put_str_centered(x, w, y, "ENTER: RETRY  Q: QUIT", dim);
    }
}

fn digit_count(value: u32) -> u16 {
    value.checked_ilog10().map_or(1, |d| d as u16 + 1)
}

fn mode_label(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Normal => "NORMAL",
        GameMode::TimeAttack => "TIME ATTACK",
    }
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameSession, SessionConfig};

    const VIEW: Viewport = Viewport {
        width: 60,
        height: 24,
    };

    fn screen_text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_ready_overlay() {
        let session = GameSession::new(SessionConfig::default());
        let fb = GameView::default().render(&session.snapshot(), VIEW);
        assert!(screen_text(&fb).contains("READY"));
    }

    #[test]
    fn test_walls_and_panel() {
        let mut session = GameSession::new(SessionConfig {
            high_score: 4321,
            ..SessionConfig::default()
        });
        session.skip_intro();
        let fb = GameView::default().render(&session.snapshot(), VIEW);
        let text = screen_text(&fb);
        assert!(text.contains("▓▓"));
        assert!(text.contains("HIGH SCORE"));
        assert!(text.contains("4321"));
        assert!(text.contains("NORMAL"));
        assert!(text.contains("00:00"));
        assert!(!text.contains("READY"));
    }

    #[test]
    fn test_ghost_drawn_below_active() {
        let mut session = GameSession::new(SessionConfig::default());
        session.skip_intro();
        let fb = GameView::default().render(&session.snapshot(), VIEW);
        assert!(screen_text(&fb).contains('░'));
    }

    #[test]
    fn test_results_screen_lists_ranking() {
        let mut session = GameSession::new(SessionConfig::default());
        session.skip_intro();
        session.trigger_game_over();
        session.advance(3000);
        let snap = session.snapshot();
        assert_eq!(snap.phase, Phase::Over);

        let fb = GameView::default().render_with_ranking(&snap, &[900, 0], VIEW);
        let text = screen_text(&fb);
        assert!(text.contains("RESULTS"));
        assert!(text.contains("1. 900"));
        assert!(text.contains("2. 0"));
        assert!(text.contains("ENTER: RETRY"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let session = GameSession::new(SessionConfig::default());
        let fb = GameView::default().render(&session.snapshot(), Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(u32::MAX), 10);
    }
}
