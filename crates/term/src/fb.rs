//! Framebuffer for terminal rendering.
//!
//! Cells are single-byte ASCII glyphs stored row-major. Every write takes
//! signed coordinates and is dropped when it falls outside the buffer, so
//! projection code can compute columns freely and never index out of range.

/// 2D framebuffer of character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![b' '; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, b' ');
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// One row of cells, empty when `y` is out of range.
    pub fn row(&self, y: u16) -> &[u8] {
        if y >= self.height {
            return &[];
        }
        let w = self.width as usize;
        let start = (y as usize) * w;
        &self.cells[start..start + w]
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn put(&mut self, x: i32, y: i32, ch: u8) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = ch;
        }
    }

    pub fn clear(&mut self, ch: u8) {
        self.cells.fill(ch);
    }

    /// Write `s` starting at column `x`; cells off either edge are skipped.
    pub fn put_str(&mut self, x: i32, y: i32, s: &str) {
        for (i, ch) in s.bytes().enumerate() {
            self.put(x + i as i32, y, ch);
        }
    }

    /// Fill columns `x0..=x1` of row `y`, clamped to the buffer.
    pub fn fill_span(&mut self, x0: i32, x1: i32, y: i32, ch: u8) {
        let x0 = x0.max(0);
        let x1 = x1.min(self.width as i32 - 1);
        for x in x0..=x1 {
            self.put(x, y, ch);
        }
    }

    /// Replace `from` with `to` in columns `x0..=x1` of row `y`.
    pub fn replace_span(&mut self, x0: i32, x1: i32, y: i32, from: u8, to: u8) {
        let x0 = x0.max(0);
        let x1 = x1.min(self.width as i32 - 1);
        for x in x0..=x1 {
            if self.get(x, y) == Some(from) {
                self.put(x, y, to);
            }
        }
    }

    /// Write `value` in decimal, zero-padded to at least `min_digits`.
    ///
    /// Returns the number of columns the number occupies (written or not).
    pub fn put_u64_padded(&mut self, x: i32, y: i32, value: u64, min_digits: usize) -> i32 {
        let len = decimal_width(value, min_digits);
        let mut v = value;
        for i in (0..len).rev() {
            self.put(x + i, y, b'0' + (v % 10) as u8);
            v /= 10;
        }
        len
    }
}

/// Columns needed to print `value` zero-padded to `min_digits`.
pub fn decimal_width(value: u64, min_digits: usize) -> i32 {
    let mut digits = 1;
    let mut v = value / 10;
    while v > 0 {
        digits += 1;
        v /= 10;
    }
    digits.max(min_digits as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_str(fb: &FrameBuffer, y: u16) -> String {
        String::from_utf8_lossy(fb.row(y)).into_owned()
    }

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put(-1, 0, b'X');
        fb.put(4, 0, b'X');
        fb.put(0, 2, b'X');
        fb.put(0, -1, b'X');
        assert!(fb.cells().iter().all(|&c| c == b' '));
    }

    #[test]
    fn put_str_clips_both_edges() {
        let mut fb = FrameBuffer::new(5, 1);
        fb.put_str(-2, 0, "abcdefg");
        assert_eq!(row_str(&fb, 0), "cdefg");
    }

    #[test]
    fn fill_span_clamps() {
        let mut fb = FrameBuffer::new(5, 1);
        fb.fill_span(-3, 1, 0, b'#');
        assert_eq!(row_str(&fb, 0), "##   ");
        fb.fill_span(3, 99, 0, b'=');
        assert_eq!(row_str(&fb, 0), "## ==");
    }

    #[test]
    fn replace_span_only_touches_matching_cells() {
        let mut fb = FrameBuffer::new(5, 1);
        fb.put(2, 0, b'|');
        fb.replace_span(0, 4, 0, b' ', b'-');
        assert_eq!(row_str(&fb, 0), "--|--");
    }

    #[test]
    fn padded_numbers() {
        let mut fb = FrameBuffer::new(10, 1);
        assert_eq!(fb.put_u64_padded(0, 0, 42, 5), 5);
        assert_eq!(row_str(&fb, 0), "00042     ");
        assert_eq!(decimal_width(1234567, 3), 7);
        assert_eq!(decimal_width(0, 0), 1);
    }

    #[test]
    fn resize_keeps_dimensions_consistent() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.resize(3, 4);
        assert_eq!(fb.cells().len(), 12);
        assert_eq!(fb.row(3).len(), 3);
        assert!(fb.row(4).is_empty());
    }
}
