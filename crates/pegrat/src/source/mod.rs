//! # Source Text
//!
//! The character buffer a parse runs over, the [`Cursor`] that walks it, and
//! the [`Location`] spans handed out to parsed values.

mod cursor;
mod line_index;
mod location;

pub use cursor::{Cursor, SourceText};
pub use line_index::{LineCol, LineIndex};
pub use location::{Located, Location};
