//! Retraction of an unwanted continuation line.
//!
//! After a single-line continuation the tracker arms once. If the very next
//! command is another line break that leaves the cursor on a blank line, the
//! bare continuation line above it is deleted, as though the first break had
//! never continued the comment. Any other command disarms it.

use tern_primitives::{Bias, EditError, Transaction, is_blank_line, line_start, line_text};

use crate::buffer::Buffer;

/// The kind of command a host reports to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
	LineBreak,
	/// Typing, motion, deletion or anything else.
	Other,
}

/// One-shot tracker state, held per buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelState {
	armed: Option<String>,
}

impl CancelState {
	/// Returns true if the next line break may retract a continuation.
	pub fn is_armed(&self) -> bool {
		self.armed.is_some()
	}

	/// Arms the tracker for a continuation that inserted `prefix`.
	pub(crate) fn arm(&mut self, prefix: impl Into<String>) {
		self.armed = Some(prefix.into());
	}

	pub(crate) fn disarm(&mut self) {
		self.armed = None;
	}

	/// Consumes the armed prefix. The tracker never survives a command.
	pub(crate) fn take(&mut self) -> Option<String> {
		self.armed.take()
	}
}

/// Deletes the continuation line above the cursor once a second break has
/// left the cursor on a blank line.
///
/// The line above must still read exactly `prefix` (ignoring surrounding
/// whitespace); otherwise the buffer is left untouched. Returns true if a
/// line was removed.
///
/// # Errors
///
/// Propagates [`EditError`] from the deletion.
pub(crate) fn retract(buffer: &mut Buffer, prefix: &str) -> Result<bool, EditError> {
	let text = buffer.text();
	let line = buffer.cursor_line();
	if line == 0 || !is_blank_line(text, line) {
		return Ok(false);
	}

	let above = line - 1;
	if line_text(text, above).trim() != prefix.trim() {
		tracing::trace!(line = above, "line above is no longer a bare continuation");
		return Ok(false);
	}

	let tx = Transaction::delete(text, line_start(text, above), line_start(text, line))?;
	buffer.apply(&tx, Bias::Left)?;
	tracing::debug!(line = above, "retracted continuation line");
	Ok(true)
}
