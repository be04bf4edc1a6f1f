use super::EditError;
use super::types::{Bias, Insertion, Operation};
use crate::Rope;
use crate::range::{CharIdx, CharLen};

/// A sequence of retain, delete, and insert operations over one document.
///
/// `len` is the length of the document the set was built against; applying it
/// to any other length is rejected.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
	pub(super) changes: Vec<Operation>,
	pub(super) len: usize,
	pub(super) len_after: usize,
}

impl ChangeSet {
	/// Returns the length of the source document (before changes).
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns the length of the document after applying changes.
	pub fn len_after(&self) -> usize {
		self.len_after
	}

	/// Returns true if applying this set leaves the document untouched.
	pub fn is_identity(&self) -> bool {
		self.changes
			.iter()
			.all(|op| matches!(op, Operation::Retain(_)))
	}

	/// Returns a slice of all operations in this changeset.
	pub fn operations(&self) -> &[Operation] {
		&self.changes
	}

	/// Retains `n` characters from the source.
	///
	/// Consecutive retains are merged.
	pub(crate) fn retain(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}

		self.len += n;
		self.len_after += n;

		if let Some(Operation::Retain(count)) = self.changes.last_mut() {
			*count += n;
		} else {
			self.changes.push(Operation::Retain(n));
		}
	}

	/// Deletes `n` characters from the source.
	///
	/// Consecutive deletes are merged.
	pub(crate) fn delete(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}

		self.len += n;

		if let Some(Operation::Delete(count)) = self.changes.last_mut() {
			*count += n;
		} else {
			self.changes.push(Operation::Delete(n));
		}
	}

	/// Inserts `text` at the current position.
	///
	/// An insert directly after a delete is moved in front of it so that
	/// replacements always read insert-then-delete.
	pub(crate) fn insert(&mut self, text: String) {
		if text.is_empty() {
			return;
		}

		let ins = Insertion::new(text);
		self.len_after += ins.char_len;

		match self.changes.as_mut_slice() {
			[.., Operation::Insert(prev)] | [.., Operation::Insert(prev), Operation::Delete(_)] => {
				prev.text.push_str(&ins.text);
				prev.char_len += ins.char_len;
			}
			[.., last @ Operation::Delete(_)] => {
				let del = std::mem::replace(last, Operation::Insert(ins));
				self.changes.push(del);
			}
			_ => {
				self.changes.push(Operation::Insert(ins));
			}
		}
	}

	/// Applies this changeset to `doc` in place.
	///
	/// # Errors
	///
	/// Returns [`EditError::LengthMismatch`] when `doc` is not the document
	/// this set was built against.
	pub fn apply(&self, doc: &mut Rope) -> Result<(), EditError> {
		if doc.len_chars() != self.len {
			return Err(EditError::LengthMismatch {
				expected: self.len,
				actual: doc.len_chars(),
			});
		}

		let mut pos = 0;
		for op in &self.changes {
			match op {
				Operation::Retain(n) => {
					pos += n;
				}
				Operation::Delete(n) => {
					doc.remove(pos..pos + n);
				}
				Operation::Insert(ins) => {
					doc.insert(pos, &ins.text);
					pos += ins.char_len;
				}
			}
		}

		Ok(())
	}

	/// Maps a source position to its position after the changes.
	///
	/// Positions inside a deleted run collapse to the deletion point. `bias`
	/// decides which side of an insertion at exactly `pos` the result lands on.
	pub fn map_pos(&self, pos: CharIdx, bias: Bias) -> CharIdx {
		let mut old_pos = 0;
		let mut new_pos = 0;

		for op in &self.changes {
			if old_pos > pos {
				break;
			}

			match op {
				Operation::Retain(n) => {
					if old_pos + n > pos {
						return new_pos + (pos - old_pos);
					}
					old_pos += n;
					new_pos += n;
				}
				Operation::Delete(n) => {
					if old_pos + n > pos {
						return new_pos;
					}
					old_pos += n;
				}
				Operation::Insert(ins) => {
					if old_pos != pos || bias == Bias::Right {
						new_pos += ins.char_len;
					}
				}
			}
		}

		new_pos + (pos - old_pos)
	}
}
