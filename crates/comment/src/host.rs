//! The host's ordinary line break.

use ropey::RopeSlice;
use tern_primitives::{CharIdx, EditError, Transaction, leading_whitespace};

/// Produces the edit a plain line break makes, before any comment handling.
pub trait LineBreaker {
	/// Builds the line break edit for a cursor at `cursor`.
	///
	/// # Errors
	///
	/// Returns [`EditError`] if the edit cannot be built against `text`.
	fn line_break(&self, text: RopeSlice, cursor: CharIdx) -> Result<Transaction, EditError>;
}

/// Inserts a newline followed by the current line's indentation.
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyIndent;

impl LineBreaker for CopyIndent {
	fn line_break(&self, text: RopeSlice, cursor: CharIdx) -> Result<Transaction, EditError> {
		let line = text.char_to_line(cursor.min(text.len_chars()));
		let indent = leading_whitespace(text, line);
		Transaction::insert(text, cursor, format!("\n{indent}"))
	}
}
