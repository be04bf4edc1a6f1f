//! Transactions: ordered, non-overlapping changes against one document.

mod changeset;
mod types;


pub use changeset::ChangeSet;
use thiserror::Error;
pub use types::{Bias, Change, Insertion, Operation};

use crate::range::CharIdx;
use crate::{Rope, RopeSlice};

/// Errors raised while building or applying a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
	/// A change reaches past the end of the document.
	#[error("change {start}..{end} is out of bounds for document of length {len}")]
	OutOfBounds {
		/// Start of the offending change.
		start: CharIdx,
		/// End of the offending change.
		end: CharIdx,
		/// Document length.
		len: usize,
	},
	/// A change starts before the previous one ended, or is reversed.
	#[error("change {start}..{end} overlaps or precedes the previous change")]
	Unordered {
		/// Start of the offending change.
		start: CharIdx,
		/// End of the offending change.
		end: CharIdx,
	},
	/// The change set was built against a different document.
	#[error("change set expects a document of length {expected}, got {actual}")]
	LengthMismatch {
		/// Length the change set was built for.
		expected: usize,
		/// Length of the document it was applied to.
		actual: usize,
	},
}

/// A set of edits applied atomically to one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
	changes: ChangeSet,
}

impl Transaction {
	/// Builds a transaction from changes sorted by start offset.
	///
	/// # Errors
	///
	/// Returns [`EditError::Unordered`] for reversed or overlapping changes and
	/// [`EditError::OutOfBounds`] for changes past the end of `doc`.
	pub fn change(
		doc: RopeSlice,
		changes: impl IntoIterator<Item = Change>,
	) -> Result<Self, EditError> {
		let len = doc.len_chars();
		let mut set = ChangeSet::default();
		let mut last = 0;

		for Change {
			start,
			end,
			replacement,
		} in changes
		{
			if start < last || end < start {
				return Err(EditError::Unordered { start, end });
			}
			if end > len {
				return Err(EditError::OutOfBounds { start, end, len });
			}

			set.retain(start - last);
			set.delete(end - start);
			if let Some(text) = replacement {
				set.insert(text);
			}
			last = end;
		}

		set.retain(len - last);
		Ok(Self { changes: set })
	}

	/// Inserts `text` at `pos`.
	///
	/// # Errors
	///
	/// Returns [`EditError::OutOfBounds`] when `pos` is past the end of `doc`.
	pub fn insert(doc: RopeSlice, pos: CharIdx, text: impl Into<String>) -> Result<Self, EditError> {
		Self::change(doc, [Change::insert(pos, text)])
	}

	/// Deletes `[start, end)`.
	///
	/// # Errors
	///
	/// Returns an error for reversed or out-of-bounds ranges.
	pub fn delete(doc: RopeSlice, start: CharIdx, end: CharIdx) -> Result<Self, EditError> {
		Self::change(doc, [Change::delete(start, end)])
	}

	/// Returns the underlying change set.
	pub fn changes(&self) -> &ChangeSet {
		&self.changes
	}

	/// Returns true if the transaction leaves the document unchanged.
	pub fn is_identity(&self) -> bool {
		self.changes.is_identity()
	}

	/// Applies the transaction to `doc`.
	///
	/// # Errors
	///
	/// Returns [`EditError::LengthMismatch`] if `doc` is not the document the
	/// transaction was built against.
	pub fn apply(&self, doc: &mut Rope) -> Result<(), EditError> {
		self.changes.apply(doc)
	}

	/// Maps a position from before the transaction to after it.
	pub fn map_pos(&self, pos: CharIdx, bias: Bias) -> CharIdx {
		self.changes.map_pos(pos, bias)
	}
}
