//! The per-buffer state the engine edits.

use std::sync::Arc;

use ropey::{Rope, RopeSlice};
use tern_language::LanguageConfig;
use tern_primitives::{Bias, CharIdx, EditError, Transaction};

use crate::cancel::CancelState;

/// A text buffer with a single cursor and its comment language.
#[derive(Debug, Clone)]
pub struct Buffer {
	text: Rope,
	cursor: CharIdx,
	language: Arc<LanguageConfig>,
	active: bool,
	pub(crate) cancel: CancelState,
}

impl Buffer {
	/// Creates an active buffer with the cursor at the start of `text`.
	pub fn new(text: &str, language: Arc<LanguageConfig>) -> Self {
		Self {
			text: Rope::from(text),
			cursor: 0,
			language,
			active: true,
			cancel: CancelState::default(),
		}
	}

	/// Moves the cursor to `cursor`, clamped to the text.
	#[must_use]
	pub fn with_cursor(mut self, cursor: CharIdx) -> Self {
		self.set_cursor(cursor);
		self
	}

	pub fn text(&self) -> RopeSlice<'_> {
		self.text.slice(..)
	}

	pub fn cursor(&self) -> CharIdx {
		self.cursor
	}

	/// Moves the cursor, clamped to the text.
	pub fn set_cursor(&mut self, cursor: CharIdx) {
		self.cursor = cursor.min(self.text.len_chars());
	}

	/// Returns the line the cursor is on.
	pub fn cursor_line(&self) -> usize {
		self.text.char_to_line(self.cursor)
	}

	pub fn language(&self) -> &Arc<LanguageConfig> {
		&self.language
	}

	/// Switches the comment language. Any pending retraction is dropped.
	pub fn set_language(&mut self, language: Arc<LanguageConfig>) {
		self.language = language;
		self.cancel.disarm();
	}

	/// Returns true if comment continuation is on for this buffer.
	pub fn is_active(&self) -> bool {
		self.active
	}

	pub fn enable(&mut self) {
		self.active = true;
	}

	/// Turns continuation off. Any pending retraction is dropped.
	pub fn disable(&mut self) {
		self.active = false;
		self.cancel.disarm();
	}

	/// Flips continuation on or off, returning the new state.
	pub fn toggle(&mut self) -> bool {
		if self.active {
			self.disable();
		} else {
			self.enable();
		}
		self.active
	}

	/// Returns the pending retraction state.
	pub fn cancel_state(&self) -> &CancelState {
		&self.cancel
	}

	/// Applies `tx` and maps the cursor through it with `bias`.
	///
	/// # Errors
	///
	/// Returns [`EditError::LengthMismatch`] if `tx` was built for other text.
	pub fn apply(&mut self, tx: &Transaction, bias: Bias) -> Result<(), EditError> {
		tx.apply(&mut self.text)?;
		self.cursor = tx.map_pos(self.cursor, bias);
		Ok(())
	}

	/// Inserts `text` at the cursor and moves the cursor past it.
	///
	/// # Errors
	///
	/// Propagates [`EditError`] from building the insertion.
	pub fn insert(&mut self, text: &str) -> Result<(), EditError> {
		let tx = Transaction::insert(self.text(), self.cursor, text)?;
		self.apply(&tx, Bias::Right)
	}
}

impl std::fmt::Display for Buffer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sh() -> Arc<LanguageConfig> {
		Arc::new(LanguageConfig::new("sh").with_comment_tokens(["#"]))
	}

	#[test]
	fn test_cursor_is_clamped() {
		let buffer = Buffer::new("abc", sh()).with_cursor(10);
		assert_eq!(buffer.cursor(), 3);
	}

	#[test]
	fn test_insert_moves_cursor() {
		let mut buffer = Buffer::new("ac", sh()).with_cursor(1);
		buffer.insert("b").unwrap();
		assert_eq!(buffer.to_string(), "abc");
		assert_eq!(buffer.cursor(), 2);
	}

	#[test]
	fn test_toggle_and_disarm() {
		let mut buffer = Buffer::new("", sh());
		buffer.cancel.arm("#");
		assert!(!buffer.toggle());
		assert!(!buffer.cancel_state().is_armed());
		assert!(buffer.toggle());
	}
}
