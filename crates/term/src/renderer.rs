//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Every frame is a full redraw: cursor home, then each row with `\r\n`
//! between rows. At this frame size diffing buys nothing.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

use crate::core::GameState;
use crate::fb::FrameBuffer;
use crate::track_view::TrackView;

/// Row separator in raw mode (no implicit carriage return).
const ROW_SEPARATOR: &[u8] = b"\r\n";

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Wipe the screen; used after a resize so stale columns do not linger.
    pub fn clear(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()
    }

    /// Show a title centred on the first row.
    pub fn splash(&mut self, title: &str, width: u16) -> Result<()> {
        let x = width.saturating_sub(title.len() as u16) / 2;
        self.buf.clear();
        self.buf.queue(cursor::MoveTo(x, 0))?;
        self.buf.queue(Print(title))?;
        self.flush_buf()
    }

    /// Encode and write one framebuffer.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        encode_frame_into(fb, &mut self.buf)?;
        self.flush_buf()
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

/// Encode a full frame into `out` (cleared first).
///
/// Layout: a cursor-home sequence, then `width` bytes per row with a
/// `\r\n` separator between rows (none after the last).
pub fn encode_frame_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.clear();
    out.queue(cursor::MoveTo(0, 0))?;
    for y in 0..fb.height() {
        out.extend_from_slice(fb.row(y));
        if y + 1 < fb.height() {
            out.extend_from_slice(ROW_SEPARATOR);
        }
    }
    Ok(())
}

/// Render `state` straight to terminal bytes.
pub fn render_frame(view: &TrackView, state: &GameState) -> Result<Vec<u8>> {
    let fb = view.render(state);
    let mut out = Vec::with_capacity(fb.cells().len() + 2 * fb.height() as usize + 16);
    encode_frame_into(&fb, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_starts_with_cursor_home() {
        let fb = FrameBuffer::new(3, 2);
        let mut out = Vec::new();
        encode_frame_into(&fb, &mut out).unwrap();
        assert!(out.starts_with(b"\x1b[1;1H"));
    }

    #[test]
    fn rows_are_separated_not_terminated() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.put_str(0, 0, "ab");
        fb.put_str(0, 1, "cd");
        let mut out = Vec::new();
        encode_frame_into(&fb, &mut out).unwrap();
        assert!(out.ends_with(b"ab\r\ncd"));
    }

    #[test]
    fn encode_reuses_output_buffer() {
        let fb = FrameBuffer::new(4, 3);
        let mut out = Vec::new();
        encode_frame_into(&fb, &mut out).unwrap();
        let first = out.len();
        encode_frame_into(&fb, &mut out).unwrap();
        assert_eq!(out.len(), first);
    }
}
