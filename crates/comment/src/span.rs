//! Locating the comment around the cursor.

use ropey::{Rope, RopeSlice};
use tern_language::{CommentKind, CommentMap, LanguageConfig, SyntaxProvider};
use tern_primitives::{Bias, CharIdx, Transaction};

/// The contiguous comment region containing the cursor.
///
/// `start..end` is trimmed of outer whitespace but always contains the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSpan {
	pub start: CharIdx,
	pub end: CharIdx,
	/// True if a line break at the cursor stays inside the comment.
	pub multiline: bool,
}

impl CommentSpan {
	/// Maps the span through an edit that happened inside or after it.
	#[must_use]
	pub fn map(self, tx: &Transaction) -> Self {
		Self {
			start: tx.map_pos(self.start, Bias::Left),
			end: tx.map_pos(self.end, Bias::Left),
			multiline: self.multiline,
		}
	}
}

fn is_comment(map: &CommentMap, pos: CharIdx) -> bool {
	map.is_comment(pos).unwrap_or(false)
}

/// Finds the comment the cursor is in.
///
/// The cursor is in a comment when the char before it is. A cursor right
/// after a block closer is outside. Classification failures read as "not a
/// comment".
pub fn locate(
	syntax: &dyn SyntaxProvider,
	language: &LanguageConfig,
	text: RopeSlice,
	cursor: CharIdx,
) -> Option<CommentSpan> {
	if cursor == 0 || cursor > text.len_chars() {
		return None;
	}

	let map = syntax
		.classify(language, text)
		.map_err(|e| tracing::trace!(error = %e, "comment classification failed"))
		.ok()?;

	if !is_comment(&map, cursor - 1) {
		return None;
	}
	if let Some(token) = map.token_at(cursor - 1)
		&& token.kind == CommentKind::Block
		&& token.terminated
		&& token.end == cursor
	{
		return None;
	}

	let mut start = cursor - 1;
	while start > 0 && is_comment(&map, start - 1) {
		start -= 1;
	}
	let mut end = cursor;
	while is_comment(&map, end) {
		end += 1;
	}

	while start < cursor && text.char(start).is_whitespace() {
		start += 1;
	}
	while end > cursor && text.char(end - 1).is_whitespace() {
		end -= 1;
	}

	let multiline = is_multiline(syntax, language, text.slice(start..end), cursor - start);
	tracing::trace!(start, end, multiline, "located comment span");
	Some(CommentSpan { start, end, multiline })
}

/// Classifies a copy of `span` with a break inserted at `offset` and reports
/// whether the break itself lands inside a comment.
fn is_multiline(
	syntax: &dyn SyntaxProvider,
	language: &LanguageConfig,
	span: RopeSlice,
	offset: CharIdx,
) -> bool {
	let mut copy = Rope::from(span);
	copy.insert_char(offset, '\n');
	syntax
		.classify(language, copy.slice(..))
		.and_then(|map| map.is_comment(offset))
		.unwrap_or(false)
}

#[cfg(test)]
mod tests {
	use ropey::Rope;
	use rstest::rstest;
	use tern_language::LexicalSyntax;

	use super::*;

	fn c() -> LanguageConfig {
		LanguageConfig::new("c")
			.with_comment_tokens(["//"])
			.with_block_comment("/*", "*/")
	}

	fn span(text: &str) -> Option<CommentSpan> {
		let cursor = text.find('|').expect("cursor marker");
		let doc = Rope::from(text.replacen('|', "", 1));
		let cursor = doc.byte_to_char(cursor);
		locate(&LexicalSyntax, &c(), doc.slice(..), cursor)
	}

	#[rstest]
	#[case("int x;|")]
	#[case("|// a")]
	#[case("/* a */|")]
	#[case("/* a */ |b")]
	#[case("x = \"// no|\";")]
	fn test_outside_comment(#[case] text: &str) {
		assert_eq!(span(text), None);
	}

	#[test]
	fn test_line_comment_is_single_line() {
		assert_eq!(
			span("x; // hello|\ny;"),
			Some(CommentSpan {
				start: 3,
				end: 11,
				multiline: false
			})
		);
	}

	#[test]
	fn test_line_comment_mid_text() {
		let found = span("// one| two").unwrap();
		assert!(!found.multiline);
		assert_eq!((found.start, found.end), (0, 10));
	}

	#[test]
	fn test_block_comment_is_multiline() {
		let found = span("/** doc| */").unwrap();
		assert!(found.multiline);
		assert_eq!((found.start, found.end), (0, 10));
	}

	#[test]
	fn test_unterminated_block_is_multiline() {
		assert!(span("/**|").unwrap().multiline);
	}

	#[test]
	fn test_trailing_whitespace_trimmed_up_to_cursor() {
		let found = span("//  |  ").unwrap();
		assert_eq!((found.start, found.end), (0, 4));
	}

	#[test]
	fn test_map_through_break() {
		let doc = Rope::from("/* a b */");
		let found = CommentSpan {
			start: 0,
			end: 9,
			multiline: true,
		};
		let tx = Transaction::insert(doc.slice(..), 4, "\n ").unwrap();
		let mapped = found.map(&tx);
		assert_eq!((mapped.start, mapped.end), (0, 11));
	}
}
