//! Core types for text editing: char indices, line queries, and transactions.

/// Char index and length aliases.
pub mod range;
/// Line-oriented rope queries and display columns.
pub mod rope;
/// Change sets and the transactions built from them.
pub mod transaction;

pub use range::{CharIdx, CharLen};
pub use rope::{
	display_column, display_width, first_non_whitespace, indent_column, indentation, is_blank_line,
	leading_whitespace, line_end, line_start, line_text,
};
pub use ropey::{Rope, RopeSlice};
pub use transaction::{Bias, Change, ChangeSet, EditError, Transaction};
