//! Rectangular text grids
//!
//! A [`View`] is a list of [`Line`]s. Each line owns its UTF-8 text and a
//! cell cache of decoded code points. Editing the text drops the cache;
//! [`View::build_cells`] recomputes every cache and pads all lines to the
//! widest one, giving the view its fixed rectangular shape.

use std::fmt;

use super::utf8;

/// Cell value used for padding and for "nothing drawn here"
pub const BLANK: char = ' ';

/// One row of a view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    text: String,
    cells: Vec<char>,
}

impl Line {
    /// Create a line from UTF-8 text. Cells stay unbuilt.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cells: Vec::new(),
        }
    }

    /// Create a line from raw bytes, decoding malformed sequences to U+FFFD.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(utf8::decode_all(bytes).into_iter().collect::<String>())
    }

    /// Raw text of the line
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. The cell cache is invalidated.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cells.clear();
    }

    /// Cell cache; empty until the owning view rebuilds its cells
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    fn rebuild_cells(&mut self, width: usize) {
        self.cells.clear();
        self.cells.extend(utf8::decode_all(self.text.as_bytes()).into_iter().take(width));
        self.cells.resize(width, BLANK);
    }
}

/// A rectangular block of text cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    lines: Vec<Line>,
    max_cols: usize,
}

impl View {
    /// Create an empty view
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a view from text lines. Cells stay unbuilt.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Line::new).collect(),
            max_cols: 0,
        }
    }

    /// All lines
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Line at `index`
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Replace the text of line `index`; returns `false` when out of range
    pub fn set_line_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.lines.get_mut(index) {
            Some(line) => {
                line.set_text(text);
                true
            }
            None => false,
        }
    }

    /// Number of lines (grid rows)
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Widest line in code points, as of the last [`View::build_cells`]
    pub fn max_cols(&self) -> usize {
        self.max_cols
    }

    /// Grid rows
    pub fn rows(&self) -> usize {
        self.lines.len()
    }

    /// Grid columns
    pub fn cols(&self) -> usize {
        self.max_cols
    }

    /// Whether the view has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Decode every line and pad all cell rows to the widest line.
    ///
    /// Idempotent as long as no line text changes in between.
    pub fn build_cells(&mut self) {
        self.max_cols = self
            .lines
            .iter()
            .map(|line| utf8::count(line.text.as_bytes()))
            .max()
            .unwrap_or(0);

        let width = self.max_cols;
        for line in &mut self.lines {
            line.rebuild_cells(width);
        }
    }

    /// Cell at row `y`, column `x`
    pub fn cell(&self, y: usize, x: usize) -> Option<char> {
        self.lines.get(y).and_then(|line| line.cells.get(x).copied())
    }

    /// Copy `src` into this view with its top-left corner at `(y0, x0)`.
    ///
    /// Destination cells outside `[0, rows) x [0, cols)` are skipped one by
    /// one, so any offset (including negative ones) is safe.
    pub fn blit(&mut self, src: &View, y0: i32, x0: i32) {
        let rows = self.rows() as i64;
        let cols = self.cols() as i64;

        for (sy, src_line) in src.lines.iter().enumerate() {
            let dy = i64::from(y0) + sy as i64;
            if dy < 0 || dy >= rows {
                continue;
            }
            let dst_line = &mut self.lines[dy as usize];
            for (sx, &ch) in src_line.cells.iter().take(src.max_cols).enumerate() {
                let dx = i64::from(x0) + sx as i64;
                if dx < 0 || dx >= cols {
                    continue;
                }
                if let Some(cell) = dst_line.cells.get_mut(dx as usize) {
                    *cell = ch;
                }
            }
        }
    }

    /// Built cell rows rendered back to strings
    pub fn to_strings(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.cells.iter().collect())
            .collect()
    }

    /// Row-major iterator over built cells as `(row, col, cell)`
    pub fn cells_row_major(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.lines.iter().enumerate().flat_map(|(y, line)| {
            line.cells.iter().enumerate().map(move |(x, &ch)| (y, x, ch))
        })
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.to_strings().iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(lines: &[&str]) -> View {
        let mut view = View::from_lines(lines.iter().copied());
        view.build_cells();
        view
    }

    #[test]
    fn test_build_cells_pads_to_widest_line() {
        let view = built(&["ab", "░░░░", ""]);
        assert_eq!(view.max_cols(), 4);
        for line in view.lines() {
            assert_eq!(line.cells().len(), 4);
        }
        assert_eq!(view.to_strings(), vec!["ab  ", "░░░░", "    "]);
    }

    #[test]
    fn test_build_cells_is_idempotent() {
        let mut view = built(&["x", "yyy"]);
        let first = view.clone();
        view.build_cells();
        assert_eq!(view, first);
    }

    #[test]
    fn test_set_text_invalidates_cells() {
        let mut view = built(&["abc"]);
        assert!(view.set_line_text(0, "abcdef"));
        assert!(view.line(0).unwrap().cells().is_empty());
        view.build_cells();
        assert_eq!(view.max_cols(), 6);
        assert!(!view.set_line_text(3, "nope"));
    }

    #[test]
    fn test_from_bytes_is_lossy() {
        let line = Line::from_bytes(&[b'o', 0xFF, b'k']);
        assert_eq!(line.text(), "o\u{FFFD}k");
    }

    #[test]
    fn test_blit_clips_partial_to_parent() {
        // 3x5 partial at (1, 2) inside a 4x6 parent
        let mut parent = built(&["......"; 4]);
        let partial = built(&["ABCDE", "FGHIJ", "KLMNO"]);
        parent.blit(&partial, 1, 2);

        assert_eq!(parent.to_strings(), vec!["......", "..ABCD", "..FGHI", "..KLMN"]);
        assert_eq!(parent.cols(), 6);
        assert_eq!(parent.rows(), 4);
    }

    #[test]
    fn test_blit_never_writes_out_of_bounds() {
        let src = built(&["##", "##"]);
        for (y0, x0) in [(-1, -1), (-5, 0), (0, 9), (3, 3), (-1, 2)] {
            let mut dst = built(&["...", "...", "..."]);
            dst.blit(&src, y0, x0);
            assert_eq!(dst.rows(), 3);
            for line in dst.lines() {
                assert_eq!(line.cells().len(), 3);
            }
        }

        let mut dst = built(&["...", "...", "..."]);
        dst.blit(&src, -1, -1);
        assert_eq!(dst.to_strings(), vec!["#..", "...", "..."]);
    }

    #[test]
    fn test_display_joins_rows() {
        let view = built(&["a", "bc"]);
        assert_eq!(view.to_string(), "a \nbc");
    }
}
