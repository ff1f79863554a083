/// Presents a packed 1-bit frame in the terminal
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use mono3d_core::framebuffer::byte_index;
use mono3d_core::DisplayGeometry;
use std::io::Write;
use std::ops::Range;

/// Each terminal cell shows two pixel rows, indexed by (top, bottom)
const HALF_BLOCKS: [[char; 2]; 2] = [[' ', '▄'], ['▀', '█']];

/// Terminal lines reserved above the image for the status overlay
pub const OVERLAY_LINES: u16 = 1;

/// Converts frame rows into half-block text lines
pub struct BitmapDisplay {
    geometry: DisplayGeometry,
}

impl BitmapDisplay {
    pub fn new(geometry: DisplayGeometry) -> Self {
        Self { geometry }
    }

    /// Terminal lines needed to show every pixel row.
    pub fn line_count(&self) -> usize {
        self.geometry.rows().div_ceil(2)
    }

    /// Terminal lines covering the pixel rows in `rows`.
    pub fn lines_for_rows(&self, rows: Range<usize>) -> Range<usize> {
        let end = rows.end.min(self.geometry.rows());
        rows.start / 2..end.div_ceil(2)
    }

    fn pixel(&self, frame: &[u8], x: usize, y: usize) -> bool {
        if y >= self.geometry.rows() {
            return false;
        }
        let byte = frame[byte_index(y, x, self.geometry.row_stride())];
        byte & (1 << (7 - (x % 8))) != 0
    }

    /// Text for one terminal line, at most `width` cells wide.
    pub fn line_text(&self, frame: &[u8], line: usize, width: usize) -> String {
        let top = line * 2;
        (0..self.geometry.columns().min(width))
            .map(|x| {
                let upper = self.pixel(frame, x, top) as usize;
                let lower = self.pixel(frame, x, top + 1) as usize;
                HALF_BLOCKS[upper][lower]
            })
            .collect()
    }

    /// Queue the touched rows of `frame`, clipped to the terminal size.
    pub fn draw<W: Write>(
        &self,
        writer: &mut W,
        frame: &[u8],
        rows: Range<usize>,
        terminal_size: (u16, u16),
    ) -> std::io::Result<()> {
        let (width, height) = terminal_size;
        let visible_lines = height.saturating_sub(OVERLAY_LINES) as usize;

        writer.queue(SetForegroundColor(Color::White))?;
        for line in self.lines_for_rows(rows) {
            if line >= visible_lines {
                break;
            }
            writer.queue(cursor::MoveTo(0, line as u16 + OVERLAY_LINES))?;
            writer.queue(Print(self.line_text(frame, line, width as usize)))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mono3d_core::FrameBuffer;

    fn geometry() -> DisplayGeometry {
        DisplayGeometry::new(10, 5, 2).unwrap()
    }

    #[test]
    fn test_half_blocks() {
        let geometry = geometry();
        let mut data = vec![0u8; geometry.buffer_len()];
        {
            let mut frame = FrameBuffer::new(&mut data, geometry).unwrap();
            frame.set(0, 0, true);
            frame.set(1, 1, true);
            frame.set(2, 0, true);
            frame.set(2, 1, true);
            frame.set(9, 4, true);
        }

        let display = BitmapDisplay::new(geometry);
        assert_eq!(display.line_count(), 3);
        assert_eq!(display.line_text(&data, 0, 80), "▀▄█       ");
        assert_eq!(display.line_text(&data, 2, 80), "         ▀");
        assert_eq!(display.line_text(&data, 0, 2), "▀▄");
    }

    #[test]
    fn test_lines_for_rows() {
        let display = BitmapDisplay::new(geometry());
        assert_eq!(display.lines_for_rows(0..5), 0..3);
        assert_eq!(display.lines_for_rows(2..4), 1..2);
        assert_eq!(display.lines_for_rows(0..100), 0..3);
    }

    #[test]
    fn test_draw_clips_to_terminal() {
        let geometry = geometry();
        let data = vec![0xFFu8; geometry.buffer_len()];
        let display = BitmapDisplay::new(geometry);

        let mut out = Vec::new();
        display.draw(&mut out, &data, 0..5, (4, 2)).unwrap();
        let text = String::from_utf8(out).unwrap();

        // One line fits below the overlay, four cells wide
        assert_eq!(text.matches('█').count(), 4);
    }
}
