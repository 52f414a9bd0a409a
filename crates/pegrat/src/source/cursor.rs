use std::sync::Arc;

use crate::error::CursorError;
use crate::source::LineIndex;

/// Immutable character buffer shared by a cursor and every location it hands out.
#[derive(Debug)]
pub struct SourceText {
    chars: Box<[char]>,
    lines: LineIndex,
}

impl SourceText {
    /// Copy `text` into a character buffer and index its line breaks.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let chars: Box<[char]> = text.chars().collect();
        let lines = LineIndex::new(&chars);
        Self { chars, lines }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[must_use]
    pub fn char_at(&self, position: usize) -> Option<char> {
        self.chars.get(position).copied()
    }

    #[must_use]
    pub const fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// Text in `from..to`, or `None` if the range is not inside the buffer.
    #[must_use]
    pub fn slice(&self, from: usize, to: usize) -> Option<String> {
        self.chars.get(from..to).map(|chars| chars.iter().collect())
    }
}

/// Read position over a [`SourceText`].
///
/// A cursor belongs to exactly one in-progress parse. Only its own
/// operations move the position, and `0 <= position <= len` always holds.
#[derive(Debug, Clone)]
pub struct Cursor {
    text: Arc<SourceText>,
    position: usize,
}

impl Cursor {
    /// Create a cursor at position 0.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pegrat::source::Cursor;
    ///
    /// let mut cursor = Cursor::new("ab");
    /// assert_eq!(cursor.next(), Ok('a'));
    /// assert_eq!(cursor.position(), 1);
    /// ```
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self::from_source(Arc::new(SourceText::new(text)))
    }

    #[must_use]
    pub const fn from_source(text: Arc<SourceText>) -> Self {
        Self { text, position: 0 }
    }

    #[must_use]
    pub fn source(&self) -> &Arc<SourceText> {
        &self.text
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.position < self.text.len()
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Character under the cursor, without advancing.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.text.char_at(self.position)
    }

    /// Read the character at the current position and advance past it.
    ///
    /// # Errors
    ///
    /// [`CursorError::EndOfInput`] if the cursor is already at the end.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<char, CursorError> {
        let c = self.text.char_at(self.position).ok_or(CursorError::EndOfInput {
            position: self.position,
        })?;
        self.position += 1;
        Ok(c)
    }

    /// Move to an absolute position.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] if `position > len`.
    pub fn jump(&mut self, position: usize) -> Result<(), CursorError> {
        if position > self.text.len() {
            return Err(CursorError::OutOfRange {
                position,
                length: self.text.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Return to a position previously read from this cursor.
    ///
    /// Backtracking only ever restores positions it observed, so the range
    /// check is a debug assertion here.
    pub(crate) fn rewind(&mut self, position: usize) {
        debug_assert!(
            position <= self.text.len(),
            "rewind to {position} past end {}",
            self.text.len()
        );
        self.position = position;
    }

    /// One-based line number of the current position.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.text.lines().line_col(self.position).line + 1
    }

    /// Text in `from..to`.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] if the range does not lie inside the buffer.
    pub fn substring(&self, from: usize, to: usize) -> Result<String, CursorError> {
        self.text.slice(from, to).ok_or(CursorError::OutOfRange {
            position: from.max(to),
            length: self.text.len(),
        })
    }
}
