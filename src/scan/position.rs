use unicode_segmentation::UnicodeSegmentation;

/// Tab stops count as this many columns.
pub const TAB_WIDTH: usize = 4;

/// A location in the source text.
///
/// Lines and columns are 1-based; `offset` is the byte offset of the
/// location. Columns advance one per grapheme cluster so that multi-byte
/// text reports human-readable columns; a tab advances [`TAB_WIDTH`]
/// columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Advance the position over a chunk of consumed text.
    pub fn advance(&mut self, consumed: &str) {
        for grapheme in consumed.graphemes(true) {
            match grapheme {
                "\n" | "\r" | "\r\n" => {
                    self.line += 1;
                    self.column = 1;
                }
                "\t" => self.column += TAB_WIDTH,
                _ => self.column += 1,
            }
        }
        self.offset += consumed.len();
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}
