//! Line and column lookup over character offsets
//!
//! The engine addresses input by character index, so offsets here count
//! `char`s, not UTF-8 bytes. `\n`, `\r\n` and a lone `\r` each end one line.

/// Zero-based line and column of a character offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    /// Zero-based line number
    pub line: usize,
    /// Zero-based column, in characters
    pub column: usize,
}

impl LineCol {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Precomputed line starts for O(log n) offset lookups.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Offsets of line starts (the first line always starts at 0)
    line_starts: Vec<usize>,
    /// Total length of the text in characters
    len: usize,
}

impl LineIndex {
    /// Build the index with a single pass over `chars`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pegrat::source::LineIndex;
    ///
    /// let chars: Vec<char> = "ab\r\ncd".chars().collect();
    /// let index = LineIndex::new(&chars);
    /// assert_eq!(index.line_count(), 2);
    /// assert_eq!(index.line_col(4).line, 1);
    /// ```
    #[must_use]
    pub fn new(chars: &[char]) -> Self {
        let mut line_starts = vec![0];

        let mut i = 0;
        while i < chars.len() {
            match chars[i] {
                '\n' => {
                    line_starts.push(i + 1);
                    i += 1;
                }
                '\r' => {
                    if chars.get(i + 1) == Some(&'\n') {
                        // CRLF counts once; the break belongs to the LF
                        line_starts.push(i + 2);
                        i += 2;
                    } else {
                        line_starts.push(i + 1);
                        i += 1;
                    }
                }
                _ => i += 1,
            }
        }

        Self {
            line_starts,
            len: chars.len(),
        }
    }

    /// Convert a character offset to a line/column position.
    ///
    /// A line break character belongs to the line it terminates.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is greater than the text length.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> LineCol {
        assert!(
            offset <= self.len,
            "Offset {} exceeds text length {}",
            offset,
            self.len
        );

        let line = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };

        LineCol {
            line,
            column: offset - self.line_starts[line],
        }
    }

    /// Number of lines in the text (an empty text has one line)
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Offset of the first character of `line`, if it exists
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(text: &str) -> LineIndex {
        let chars: Vec<char> = text.chars().collect();
        LineIndex::new(&chars)
    }

    #[test]
    fn test_line_col_unix_line_endings() {
        let index = index("line 1\nline 2\nline 3");

        assert_eq!(index.line_col(0), LineCol::new(0, 0));
        assert_eq!(index.line_col(6), LineCol::new(0, 6));
        assert_eq!(index.line_col(7), LineCol::new(1, 0));
        assert_eq!(index.line_col(13), LineCol::new(1, 6));
        assert_eq!(index.line_col(14), LineCol::new(2, 0));
    }

    #[test]
    fn test_line_col_windows_line_endings() {
        let index = index("line 1\r\nline 2\r\nline 3");

        assert_eq!(index.line_col(6), LineCol::new(0, 6));
        assert_eq!(index.line_col(7), LineCol::new(0, 7));
        assert_eq!(index.line_col(8), LineCol::new(1, 0));
        assert_eq!(index.line_count(), 3);
    }

    #[test]
    fn test_line_col_lone_carriage_return() {
        let index = index("a\rb\nc");

        assert_eq!(index.line_col(2), LineCol::new(1, 0));
        assert_eq!(index.line_col(4), LineCol::new(2, 0));
    }

    #[test]
    fn test_columns_count_characters() {
        let index = index("λx.x\nλy");

        assert_eq!(index.line_col(4), LineCol::new(0, 4));
        assert_eq!(index.line_col(6), LineCol::new(1, 1));
    }

    #[test]
    fn test_empty_text() {
        let index = index("");

        assert_eq!(index.line_col(0), LineCol::new(0, 0));
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_start(1), None);
    }

    #[test]
    #[should_panic(expected = "exceeds text length")]
    fn test_offset_past_end_panics() {
        let _ = index("abc").line_col(4);
    }
}
