//! Rope utilities and line queries.
//!
//! Line indices follow ropey: a trailing newline starts an empty final line.
//! "Line end" never includes the line terminator.

use ropey::RopeSlice;

use crate::range::CharIdx;

#[inline]
fn is_line_ending(c: char) -> bool {
	matches!(
		c,
		'\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
	)
}

#[inline]
fn is_horizontal_space(c: char) -> bool {
	c == ' ' || c == '\t'
}

/// Returns the char index at which `line` begins.
#[inline]
pub fn line_start(text: RopeSlice, line: usize) -> CharIdx {
	text.line_to_char(line)
}

/// Returns the char index just before the terminator of `line`.
pub fn line_end(text: RopeSlice, line: usize) -> CharIdx {
	let start = text.line_to_char(line);
	let slice = text.line(line);
	let mut len = slice.len_chars();

	if len > 0 && slice.char(len - 1) == '\n' {
		len -= 1;
		if len > 0 && slice.char(len - 1) == '\r' {
			len -= 1;
		}
	} else if len > 0 && is_line_ending(slice.char(len - 1)) {
		len -= 1;
	}

	start + len
}

/// Returns the text of `line` without its terminator.
pub fn line_text(text: RopeSlice, line: usize) -> String {
	text.slice(line_start(text, line)..line_end(text, line)).to_string()
}

/// Returns the run of spaces and tabs that opens `line`.
pub fn leading_whitespace(text: RopeSlice, line: usize) -> String {
	text.line(line)
		.chars()
		.take_while(|c| is_horizontal_space(*c))
		.collect()
}

/// Returns the char index of the first non-blank char on `line`.
///
/// For a blank line this is the line end.
pub fn first_non_whitespace(text: RopeSlice, line: usize) -> CharIdx {
	let end = line_end(text, line);
	let mut pos = line_start(text, line);
	while pos < end && text.char(pos).is_whitespace() {
		pos += 1;
	}
	pos
}

/// Returns true if `line` holds nothing but whitespace.
pub fn is_blank_line(text: RopeSlice, line: usize) -> bool {
	first_non_whitespace(text, line) == line_end(text, line)
}

/// Returns the display width of `chars` laid out from column 0.
///
/// Tabs advance to the next multiple of `tab_width`.
pub fn display_width(chars: impl IntoIterator<Item = char>, tab_width: usize) -> usize {
	let tab_width = tab_width.max(1);
	chars.into_iter().fold(0, |col, c| {
		if c == '\t' {
			col + tab_width - col % tab_width
		} else {
			col + 1
		}
	})
}

/// Returns the display column of `pos` within its line.
pub fn display_column(text: RopeSlice, pos: CharIdx, tab_width: usize) -> usize {
	let line = text.char_to_line(pos);
	display_width(text.slice(line_start(text, line)..pos).chars(), tab_width)
}

/// Returns the display column at which the content of `line` begins.
pub fn indent_column(text: RopeSlice, line: usize, tab_width: usize) -> usize {
	display_column(text, first_non_whitespace(text, line), tab_width)
}

/// Builds whitespace that reaches display column `column` from column 0.
pub fn indentation(column: usize, tab_width: usize, use_tabs: bool) -> String {
	if use_tabs && tab_width > 0 {
		let mut indent = "\t".repeat(column / tab_width);
		indent.push_str(&" ".repeat(column % tab_width));
		indent
	} else {
		" ".repeat(column)
	}
}

#[cfg(test)]
mod tests {
	use ropey::Rope;

	use super::*;

	#[test]
	fn test_line_end_excludes_newline() {
		let text = Rope::from("hello\nworld");
		assert_eq!(line_end(text.slice(..), 0), 5);
		assert_eq!(line_end(text.slice(..), 1), 11);
	}

	#[test]
	fn test_line_end_crlf() {
		let text = Rope::from("ab\r\ncd");
		assert_eq!(line_end(text.slice(..), 0), 2);
		assert_eq!(line_start(text.slice(..), 1), 4);
	}

	#[test]
	fn test_trailing_newline_opens_empty_line() {
		let text = Rope::from("hello\n");
		assert_eq!(line_start(text.slice(..), 1), 6);
		assert_eq!(line_end(text.slice(..), 1), 6);
		assert!(is_blank_line(text.slice(..), 1));
	}

	#[test]
	fn test_line_text() {
		let text = Rope::from("  // a\n// b\n");
		assert_eq!(line_text(text.slice(..), 0), "  // a");
		assert_eq!(line_text(text.slice(..), 1), "// b");
		assert_eq!(line_text(text.slice(..), 2), "");
	}

	#[test]
	fn test_leading_whitespace_mixed() {
		let text = Rope::from("\t  x");
		assert_eq!(leading_whitespace(text.slice(..), 0), "\t  ");
	}

	#[test]
	fn test_first_non_whitespace() {
		let text = Rope::from("x\n   y\n  \n");
		assert_eq!(first_non_whitespace(text.slice(..), 1), 5);
		assert_eq!(first_non_whitespace(text.slice(..), 2), 9);
	}

	#[test]
	fn test_display_column_expands_tabs() {
		let text = Rope::from("\tab\t//");
		assert_eq!(display_column(text.slice(..), 1, 4), 4);
		assert_eq!(display_column(text.slice(..), 3, 4), 6);
		assert_eq!(display_column(text.slice(..), 4, 4), 8);
	}

	#[test]
	fn test_display_width_of_str() {
		assert_eq!(display_width("  ab".chars(), 4), 4);
		assert_eq!(display_width("a\t".chars(), 4), 4);
		assert_eq!(display_width("\t\t".chars(), 0), 2);
	}

	#[test]
	fn test_indent_column() {
		let text = Rope::from("code\n    // x\n");
		assert_eq!(indent_column(text.slice(..), 1, 4), 4);
		assert_eq!(indent_column(text.slice(..), 0, 4), 0);
	}

	#[test]
	fn test_indentation_spaces_and_tabs() {
		assert_eq!(indentation(6, 4, false), "      ");
		assert_eq!(indentation(6, 4, true), "\t  ");
		assert_eq!(indentation(0, 4, true), "");
	}
}
