//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame, and any frame after a resize or
//! [`TerminalRenderer::invalidate`], clears the screen and writes every row.
//! Later frames rewrite each row only from its first to its last changed cell.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    /// Raw mode and the alternate screen are active
    entered: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            entered: false,
        }
    }

    /// Switch to raw mode and the alternate screen.
    ///
    /// The terminal is restored by [`TerminalRenderer::exit`], or on drop if
    /// the caller bails out early.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        self.entered = true;
        self.last = None;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disabling raw mode")?;
        Ok(())
    }

    /// Drop the diff baseline; the next draw repaints the whole screen.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Flush `fb` and keep it as the baseline for the next diff.
    ///
    /// On return `fb` holds the previous frame's allocation, ready to be
    /// redrawn by the caller.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.last.as_ref(), fb, &mut self.buf)?;
        self.flush_buf()?;

        // The old frame becomes the caller's scratch buffer.
        let mut spare = self
            .last
            .take()
            .unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        spare.resize(fb.width(), fb.height());
        std::mem::swap(&mut spare, fb);
        self.last = Some(spare);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            eprintln!("[Term] Failed to restore terminal: {:#}", e);
        }
    }
}

/// Style last sent to the terminal, so consecutive cells only emit what changed.
#[derive(Debug, Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn switch_to(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        match self.style.replace(style) {
            Some(current) if current == style => {}
            Some(current) if current.bold == style.bold && current.dim == style.dim => {
                if current.fg != style.fg {
                    out.queue(SetForegroundColor(term_color(style.fg)))?;
                }
                if current.bg != style.bg {
                    out.queue(SetBackgroundColor(term_color(style.bg)))?;
                }
            }
            _ => {
                // Attribute reset also drops colors, so it goes first.
                out.queue(SetAttribute(Attribute::Reset))?;
                if style.bold {
                    out.queue(SetAttribute(Attribute::Bold))?;
                }
                if style.dim {
                    out.queue(SetAttribute(Attribute::Dim))?;
                }
                out.queue(SetForegroundColor(term_color(style.fg)))?;
                out.queue(SetBackgroundColor(term_color(style.bg)))?;
            }
        }
        Ok(())
    }

    fn release(&mut self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.take().is_some() {
            out.queue(SetAttribute(Attribute::Reset))?;
            out.queue(ResetColor)?;
        }
        Ok(())
    }
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Inclusive column range covering every cell of row `y` that differs.
fn dirty_span(prev: &FrameBuffer, next: &FrameBuffer, y: u16) -> Option<(u16, u16)> {
    let changed = |x: u16| prev.get(x, y) != next.get(x, y);
    let first = (0..next.width()).find(|&x| changed(x))?;
    let last = (first..next.width()).rev().find(|&x| changed(x))?;
    Some((first, last))
}

/// Encode `next` into `out`, one cursor move per touched row.
///
/// Without a previous frame (or with one of a different size) the screen is
/// cleared and every row is written; otherwise each row is rewritten from its
/// first to its last changed cell.
fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut pen = Pen::default();
    for y in 0..next.height() {
        let span = match prev {
            Some(prev) => dirty_span(prev, next, y),
            None => next.width().checked_sub(1).map(|last| (0, last)),
        };
        let Some((first, last)) = span else {
            continue;
        };

        out.queue(cursor::MoveTo(first, y))?;
        for x in first..=last {
            let cell = next.get(x, y).unwrap_or_default();
            pen.switch_to(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
    }
    pen.release(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Cell;

    /// Encoded frame with color and attribute sequences removed, leaving
    /// cursor moves, clears and glyphs.
    fn encoded(prev: Option<&FrameBuffer>, next: &FrameBuffer) -> String {
        let mut out = Vec::new();
        encode_frame(prev, next, &mut out).unwrap();
        let raw = String::from_utf8(out).unwrap();

        let mut text = String::new();
        let mut rest = raw.as_str();
        while let Some(start) = rest.find('\x1b') {
            text.push_str(&rest[..start]);
            let seq = &rest[start..];
            let end = seq.find(|c: char| c.is_ascii_alphabetic()).unwrap() + 1;
            if !seq[..end].ends_with('m') {
                text.push_str(&seq[..end]);
            }
            rest = &seq[end..];
        }
        text.push_str(rest);
        text
    }

    #[test]
    fn full_frame_clears_and_writes_every_row() {
        let mut fb = FrameBuffer::new(2, 2);
        let style = CellStyle::default();
        for (i, ch) in ['A', 'B', 'C', 'D'].into_iter().enumerate() {
            fb.set(i as u16 % 2, i as u16 / 2, Cell { ch, style });
        }

        let text = encoded(None, &fb);
        assert!(text.contains("\x1b[2J"));
        assert!(text.contains("\x1b[1;1HAB"));
        assert!(text.contains("\x1b[2;1HCD"));
    }

    #[test]
    fn identical_frames_encode_nothing() {
        let fb = FrameBuffer::new(4, 3);
        assert_eq!(encoded(Some(&fb), &fb), "");
    }

    #[test]
    fn diff_rewrites_span_between_first_and_last_change() {
        let style = CellStyle::default();
        let prev = FrameBuffer::new(6, 2);
        let mut next = FrameBuffer::new(6, 2);
        next.set(1, 1, Cell { ch: 'X', style });
        next.set(3, 1, Cell { ch: 'Y', style });

        let text = encoded(Some(&prev), &next);
        assert!(!text.contains("\x1b[2J"));
        assert!(text.contains("\x1b[2;2HX Y"));
        assert!(!text.contains("\x1b[1;"), "untouched row skipped");
    }

    #[test]
    fn resized_frame_falls_back_to_full_redraw() {
        let prev = FrameBuffer::new(3, 1);
        let next = FrameBuffer::new(4, 1);
        assert!(encoded(Some(&prev), &next).contains("\x1b[2J"));
    }

    #[test]
    fn pen_emits_only_changed_color() {
        let red = CellStyle::new(Rgb::new(255, 0, 0), Rgb::new(0, 0, 0));
        let green = CellStyle::new(Rgb::new(0, 255, 0), Rgb::new(0, 0, 0));

        let mut pen = Pen::default();
        let mut out = Vec::new();
        pen.switch_to(&mut out, red).unwrap();
        out.clear();

        pen.switch_to(&mut out, red).unwrap();
        assert!(out.is_empty());

        pen.switch_to(&mut out, green).unwrap();
        let text = String::from_utf8(out.clone()).unwrap();
        assert!(text.contains("38;2;0;255;0"));
        assert!(!text.contains("48;2;"), "background unchanged");
        assert!(!text.contains("\x1b[0m"), "no attribute reset");

        out.clear();
        pen.switch_to(&mut out, green.bold()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b[0m"));
        assert!(text.contains("38;2;0;255;0"));
    }
}
