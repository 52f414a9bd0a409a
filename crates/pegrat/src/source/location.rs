use std::fmt;
use std::sync::Arc;

use crate::error::CursorError;
use crate::source::SourceText;

/// Immutable `[start, end)` span over one source buffer.
#[derive(Clone)]
pub struct Location {
    text: Arc<SourceText>,
    start: usize,
    end: usize,
}

impl Location {
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] unless `start <= end <= text.len()`.
    pub fn new(text: Arc<SourceText>, start: usize, end: usize) -> Result<Self, CursorError> {
        if start > end || end > text.len() {
            return Err(CursorError::OutOfRange {
                position: if start > end { start } else { end },
                length: text.len(),
            });
        }
        Ok(Self { text, start, end })
    }

    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The covered text.
    #[must_use]
    pub fn text(&self) -> String {
        // start <= end <= len is checked at construction
        self.text.slice(self.start, self.end).unwrap_or_default()
    }

    /// One-based line number of the span start.
    #[must_use]
    pub fn line(&self) -> usize {
        self.text.lines().line_col(self.start).line + 1
    }

    /// Whether both locations point into the same buffer.
    #[must_use]
    pub fn same_source(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.text, &other.text)
    }

    /// Join this span with the one immediately following it.
    ///
    /// Returns `None` if the spans belong to different buffers or
    /// `self.end() != next.start()`.
    #[must_use]
    pub fn concat(&self, next: &Self) -> Option<Self> {
        if !self.same_source(next) || self.end != next.start {
            return None;
        }
        Some(Self {
            text: Arc::clone(&self.text),
            start: self.start,
            end: next.end,
        })
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.same_source(other) && self.start == other.start && self.end == other.end
    }
}

impl Eq for Location {}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Location")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A parsed value paired with the span it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<T> {
    pub value: T,
    pub location: Location,
}

impl<T> Located<T> {
    #[must_use]
    pub const fn new(value: T, location: Location) -> Self {
        Self { value, location }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Located<U> {
        Located {
            value: f(self.value),
            location: self.location,
        }
    }

    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }
}
