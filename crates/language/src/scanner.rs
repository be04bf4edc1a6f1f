//! Lexical comment scanning.
//!
//! The scanner walks a text snapshot once, skipping string literals and
//! recording every line and block comment it meets. The result is a
//! [`CommentMap`] that answers "is this char inside a comment" by binary
//! search, so repeated per-char queries stay cheap.

use ropey::RopeSlice;
use tern_primitives::CharIdx;

use crate::config::LanguageConfig;
use crate::syntax::SyntaxError;

/// The two shapes a comment can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
	/// Runs from its opener to the end of the line.
	Line,
	/// Runs from its opener to the matching closer.
	Block,
}

/// One comment in a text snapshot, delimiters included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentToken {
	/// First char of the opener.
	pub start: CharIdx,
	/// One past the last char (closer included for blocks).
	pub end: CharIdx,
	pub kind: CommentKind,
	/// False for a block comment still open at the end of the text.
	pub terminated: bool,
}

impl CommentToken {
	/// Returns true if the char at `pos` belongs to this comment.
	#[inline]
	pub fn contains(&self, pos: CharIdx) -> bool {
		self.start <= pos && pos < self.end
	}
}

/// The comments of one text snapshot, sorted by start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentMap {
	tokens: Vec<CommentToken>,
	len: usize,
}

impl CommentMap {
	/// Builds a map from tokens produced by any classifier.
	///
	/// Tokens are sorted by start; overlapping tokens are the caller's bug.
	pub fn new(mut tokens: Vec<CommentToken>, len: usize) -> Self {
		tokens.sort_by_key(|t| t.start);
		Self { tokens, len }
	}

	/// Length in chars of the text this map describes.
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn tokens(&self) -> &[CommentToken] {
		&self.tokens
	}

	/// Returns the comment covering the char at `pos`.
	pub fn token_at(&self, pos: CharIdx) -> Option<&CommentToken> {
		let idx = self.tokens.partition_point(|t| t.start <= pos);
		idx.checked_sub(1)
			.map(|i| &self.tokens[i])
			.filter(|t| t.contains(pos))
	}

	/// Returns whether the char at `pos` is part of a comment.
	///
	/// # Errors
	///
	/// Returns [`SyntaxError::OutOfBounds`] when `pos` is not a char of the text.
	pub fn is_comment(&self, pos: CharIdx) -> Result<bool, SyntaxError> {
		if pos >= self.len {
			return Err(SyntaxError::OutOfBounds { pos, len: self.len });
		}
		Ok(self.token_at(pos).is_some())
	}
}

enum Opener {
	Line,
	Block(usize),
}

/// Scans text for the comments of one language.
#[derive(Debug)]
pub struct CommentScanner<'a> {
	line_tokens: Vec<Vec<char>>,
	block: Option<(Vec<char>, Vec<char>)>,
	nested: bool,
	strings: &'a [char],
	char_literals: bool,
}

impl<'a> CommentScanner<'a> {
	pub fn new(language: &'a LanguageConfig) -> Self {
		Self {
			line_tokens: language
				.comment_tokens
				.iter()
				.filter(|t| !t.is_empty())
				.map(|t| t.chars().collect())
				.collect(),
			block: language
				.block_comment
				.as_ref()
				.filter(|(open, close)| !open.is_empty() && !close.is_empty())
				.map(|(open, close)| (open.chars().collect(), close.chars().collect())),
			nested: language.nested_blocks,
			strings: &language.string_delimiters,
			char_literals: language.char_literals,
		}
	}

	/// Scans `text` and returns every comment in it.
	pub fn scan(&self, text: RopeSlice) -> CommentMap {
		let chars: Vec<char> = text.chars().collect();
		let mut tokens = Vec::new();
		let mut i = 0;

		while i < chars.len() {
			let c = chars[i];
			if c == '\'' && self.char_literals {
				i = skip_char_literal(&chars, i);
				continue;
			}
			if self.strings.contains(&c) {
				i = skip_string(&chars, i);
				continue;
			}

			match self.opener_at(&chars, i) {
				Some(Opener::Block(open_len)) => {
					let (end, terminated) = self.block_end(&chars, i + open_len);
					tokens.push(CommentToken {
						start: i,
						end,
						kind: CommentKind::Block,
						terminated,
					});
					i = end;
				}
				Some(Opener::Line) => {
					let end = chars[i..]
						.iter()
						.position(|c| *c == '\n' || *c == '\r')
						.map_or(chars.len(), |off| i + off);
					tokens.push(CommentToken {
						start: i,
						end,
						kind: CommentKind::Line,
						terminated: true,
					});
					i = end;
				}
				None => i += 1,
			}
		}

		CommentMap {
			tokens,
			len: chars.len(),
		}
	}

	/// Picks the longest opener starting at `i`.
	fn opener_at(&self, chars: &[char], i: usize) -> Option<Opener> {
		let line = self
			.line_tokens
			.iter()
			.filter(|t| chars[i..].starts_with(t))
			.map(Vec::len)
			.max();
		let block = self
			.block
			.as_ref()
			.map(|(open, _)| open)
			.filter(|open| chars[i..].starts_with(open))
			.map(Vec::len);

		match (line, block) {
			(Some(l), Some(b)) if l > b => Some(Opener::Line),
			(_, Some(b)) => Some(Opener::Block(b)),
			(Some(_), None) => Some(Opener::Line),
			(None, None) => None,
		}
	}

	/// Finds the end of a block whose body starts at `from`.
	fn block_end(&self, chars: &[char], from: usize) -> (usize, bool) {
		let Some((open, close)) = &self.block else {
			return (chars.len(), false);
		};

		let mut depth = 1usize;
		let mut j = from;
		while j < chars.len() {
			if chars[j..].starts_with(close) {
				depth -= 1;
				j += close.len();
				if depth == 0 {
					return (j, true);
				}
			} else if self.nested && chars[j..].starts_with(open) {
				depth += 1;
				j += open.len();
			} else {
				j += 1;
			}
		}

		(chars.len(), false)
	}
}

/// Skips a string literal opened at `start`, returning the index after it.
///
/// Single-quoted literals never span lines; an unterminated one ends at the
/// line break so a stray apostrophe cannot swallow the rest of the text.
fn skip_string(chars: &[char], start: usize) -> usize {
	let quote = chars[start];
	let mut j = start + 1;
	while j < chars.len() {
		match chars[j] {
			'\\' => j += 2,
			c if c == quote => return j + 1,
			'\n' if quote == '\'' => return j,
			_ => j += 1,
		}
	}
	chars.len()
}

/// Longest escape a char literal may hold between its quotes (`\u{10FFFF}`).
const MAX_CHAR_ESCAPE: usize = 10;

/// Skips a char literal opened at `start`, returning the index after it.
///
/// A quote that does not start a well-formed literal (`'a` lifetimes, loop
/// labels) is skipped on its own.
fn skip_char_literal(chars: &[char], start: usize) -> usize {
	match chars.get(start + 1) {
		Some('\\') => {
			let body = start + 3;
			chars
				.iter()
				.enumerate()
				.skip(body)
				.take(MAX_CHAR_ESCAPE)
				.take_while(|(_, c)| **c != '\n')
				.find(|(_, c)| **c == '\'')
				.map_or(start + 1, |(j, _)| j + 1)
		}
		Some(c) if *c != '\n' && chars.get(start + 2) == Some(&'\'') => start + 3,
		_ => start + 1,
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use ropey::Rope;
	use rstest::rstest;

	use super::*;

	fn rust() -> LanguageConfig {
		LanguageConfig::new("rust")
			.with_comment_tokens(["//"])
			.with_block_comment("/*", "*/")
	}

	fn spans(lang: &LanguageConfig, text: &str) -> Vec<(usize, usize, CommentKind)> {
		let rope = Rope::from(text);
		CommentScanner::new(lang)
			.scan(rope.slice(..))
			.tokens()
			.iter()
			.map(|t| (t.start, t.end, t.kind))
			.collect()
	}

	#[test]
	fn test_line_comment_runs_to_line_end() {
		let lang = rust();
		assert_eq!(
			spans(&lang, "x(); // hi\ny();"),
			vec![(5, 10, CommentKind::Line)]
		);
	}

	#[test]
	fn test_block_comment_spans_lines() {
		let lang = rust();
		assert_eq!(
			spans(&lang, "a /* b\n c */ d"),
			vec![(2, 12, CommentKind::Block)]
		);
	}

	#[test]
	fn test_unterminated_block_reaches_end() {
		let lang = rust();
		let rope = Rope::from("/** open\n * more");
		let map = CommentScanner::new(&lang).scan(rope.slice(..));
		assert_eq!(map.tokens().len(), 1);
		assert!(!map.tokens()[0].terminated);
		assert_eq!(map.tokens()[0].end, rope.len_chars());
	}

	#[test]
	fn test_strings_hide_comment_tokens() {
		let lang = rust();
		assert_eq!(spans(&lang, r#"let s = "// no"; // yes"#), vec![(17, 23, CommentKind::Line)]);
		assert_eq!(spans(&lang, r#"let s = "\" // no";"#), vec![]);
	}

	#[test]
	fn test_single_quote_string_stops_at_newline() {
		let lang = LanguageConfig::new("python").with_comment_tokens(["#"]).with_string_delimiters(['"', '\'']);
		assert_eq!(spans(&lang, "x = 'oops\n# real"), vec![(10, 16, CommentKind::Line)]);
	}

	#[rstest]
	#[case("let q = '\"';\n// doc", vec![(13, 19, CommentKind::Line)])]
	#[case("let q = '\\'';\n// doc", vec![(14, 20, CommentKind::Line)])]
	#[case("let q = '\\u{22}'; // doc", vec![(18, 24, CommentKind::Line)])]
	#[case("fn f<'a>(s: &'a str) {} // doc", vec![(24, 30, CommentKind::Line)])]
	#[case("let c = '/'; // doc", vec![(13, 19, CommentKind::Line)])]
	fn test_char_literals(#[case] text: &str, #[case] expected: Vec<(usize, usize, CommentKind)>) {
		let lang = rust().with_char_literals(true);
		assert_eq!(spans(&lang, text), expected);
	}

	#[test]
	fn test_nested_blocks() {
		let lang = rust().with_nested_blocks(true);
		assert_eq!(
			spans(&lang, "/* a /* b */ c */ d"),
			vec![(0, 17, CommentKind::Block)]
		);
		let flat = rust();
		assert_eq!(
			spans(&flat, "/* a /* b */ c */ d"),
			vec![(0, 12, CommentKind::Block)]
		);
	}

	#[test]
	fn test_longest_opener_wins() {
		let lua = LanguageConfig::new("lua")
			.with_comment_tokens(["--"])
			.with_block_comment("--[[", "]]");
		assert_eq!(spans(&lua, "--[[ a\nb ]] --c"), vec![
			(0, 11, CommentKind::Block),
			(12, 15, CommentKind::Line),
		]);
	}

	#[rstest]
	#[case(0, Ok(false))]
	#[case(3, Ok(true))]
	#[case(8, Ok(true))]
	#[case(9, Ok(false))]
	#[case(15, Err(SyntaxError::OutOfBounds { pos: 15, len: 15 }))]
	fn test_is_comment(#[case] pos: usize, #[case] expected: Result<bool, SyntaxError>) {
		let lang = rust();
		let rope = Rope::from("x; // doc\nfoo()");
		let map = CommentScanner::new(&lang).scan(rope.slice(..));
		assert_eq!(map.is_comment(pos), expected);
	}

	#[test]
	fn test_token_at_between_tokens() {
		let map = CommentMap::new(
			vec![
				CommentToken { start: 5, end: 8, kind: CommentKind::Line, terminated: true },
				CommentToken { start: 0, end: 2, kind: CommentKind::Line, terminated: true },
			],
			10,
		);
		assert_eq!(map.token_at(1).map(|t| t.start), Some(0));
		assert_eq!(map.token_at(3), None);
		assert_eq!(map.token_at(7).map(|t| t.start), Some(5));
		assert_eq!(map.token_at(8), None);
	}
}
