//! Structural indentation of comment lines.

use ropey::RopeSlice;
use tern_primitives::{display_column, first_non_whitespace, line_end, line_start};

use crate::config::LanguageConfig;
use crate::scanner::{CommentKind, CommentScanner};

/// Computes the indentation a line should have.
pub trait Indenter {
	/// Returns the display column `line` should start at, or `None` to leave
	/// its indentation alone.
	fn indent_column(
		&self,
		language: &LanguageConfig,
		text: RopeSlice,
		line: usize,
		tab_width: usize,
	) -> Option<usize>;
}

/// Aligns the `*` of block comment continuation lines one column inside the
/// opener, which yields the conventional shape:
///
/// ```text
/// /**
///  * text
///  */
/// ```
///
/// Lines that do not start with `*`, and the opener line itself, are left alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommentIndenter;

impl Indenter for CommentIndenter {
	fn indent_column(
		&self,
		language: &LanguageConfig,
		text: RopeSlice,
		line: usize,
		tab_width: usize,
	) -> Option<usize> {
		let first = first_non_whitespace(text, line);
		if first == line_end(text, line) || text.char(first) != '*' {
			return None;
		}

		let map = CommentScanner::new(language).scan(text);
		let token = map.token_at(first)?;
		if token.kind != CommentKind::Block || token.start >= line_start(text, line) {
			return None;
		}

		Some(display_column(text, token.start, tab_width) + 1)
	}
}

#[cfg(test)]
mod tests {
	use ropey::Rope;

	use super::*;

	fn c() -> LanguageConfig {
		LanguageConfig::new("c")
			.with_comment_tokens(["//"])
			.with_block_comment("/*", "*/")
	}

	#[test]
	fn test_star_lines_align_inside_opener() {
		let text = Rope::from("    /**\n* text\n      */\nint x;");
		let lang = c();
		assert_eq!(CommentIndenter.indent_column(&lang, text.slice(..), 1, 4), Some(5));
		assert_eq!(CommentIndenter.indent_column(&lang, text.slice(..), 2, 4), Some(5));
	}

	#[test]
	fn test_opener_line_and_code_untouched() {
		let text = Rope::from("/**\n * text\n */\n*ptr = 1;");
		let lang = c();
		assert_eq!(CommentIndenter.indent_column(&lang, text.slice(..), 0, 4), None);
		assert_eq!(CommentIndenter.indent_column(&lang, text.slice(..), 3, 4), None);
	}

	#[test]
	fn test_tabbed_opener_column() {
		let text = Rope::from("\t/*\n*/");
		let lang = c();
		assert_eq!(CommentIndenter.indent_column(&lang, text.slice(..), 1, 8), Some(9));
	}

	#[test]
	fn test_plain_text_lines_untouched() {
		let text = Rope::from("/*\n   text\n*/");
		let lang = c();
		assert_eq!(CommentIndenter.indent_column(&lang, text.slice(..), 1, 4), None);
	}
}
