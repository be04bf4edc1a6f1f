//! Comment prefixes of single lines.
//!
//! A prefix is the comment opener that a line's trailing comment starts
//! with, plus the whitespace that separates it from the comment text:
//!
//! ```text
//!     let x = 1; /// text
//!                ^^^^ raw "/// ", trimmed "///"
//! ```

use ropey::RopeSlice;
use tern_language::{CommentMap, LanguageConfig};
use tern_primitives::{CharIdx, display_width, line_end, line_start, line_text};

/// The comment prefix of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePrefix {
	/// Opener plus the whitespace that follows it.
	pub raw: String,
	/// `raw` without surrounding whitespace.
	pub trimmed: String,
	/// The configured opener token the prefix starts with.
	pub token: String,
	/// Where the comment starts.
	pub start: CharIdx,
	/// Display column of the prefix, if only whitespace precedes it.
	pub column: Option<usize>,
}

/// Extracts the prefix of the comment that runs to the end of `line`.
///
/// Returns `None` if no comment starts on the line and reaches its end.
pub fn extract_prefix(
	language: &LanguageConfig,
	text: RopeSlice,
	map: &CommentMap,
	line: usize,
	tab_width: usize,
) -> Option<LinePrefix> {
	let start_of_line = line_start(text, line);
	let end_of_line = line_end(text, line);

	let mut last = end_of_line;
	while last > start_of_line && text.char(last - 1).is_whitespace() {
		last -= 1;
	}
	if last == start_of_line {
		return None;
	}

	let token = map.token_at(last - 1)?;
	if token.start < start_of_line {
		return None;
	}

	let rest: String = text.slice(token.start..end_of_line).chars().collect();
	let opener = language.match_opener(&rest)?;

	let raw_len = rest
		.chars()
		.skip(opener.len)
		.position(char::is_whitespace)
		.map_or(rest.chars().count(), |off| opener.len + off + 1);
	let raw: String = rest.chars().take(raw_len).collect();
	let trimmed = raw.trim().to_string();
	let column = column_of(&trimmed, &line_text(text, line), tab_width);

	Some(LinePrefix {
		raw,
		trimmed,
		token: opener.token.to_string(),
		start: token.start,
		column,
	})
}

/// Returns true if `prefix` marks a doc comment.
///
/// The prefix is a doc marker when, after removing one base token, what is
/// left is empty or repeats the base token's chars: `///` over `//`, `;;;`
/// over `;`, `/**` over `/*`. `//!` is not.
pub fn classify_doc(language: &LanguageConfig, prefix: &LinePrefix) -> bool {
	let Some(base) = language.doc_token() else {
		return false;
	};
	if base.is_empty() {
		return false;
	}
	prefix
		.trimmed
		.strip_prefix(base)
		.is_some_and(|rest| rest.trim().chars().all(|c| base.contains(c)))
}

/// Returns the display column of the first occurrence of `trimmed` on
/// `line`, or `None` if anything but whitespace precedes it.
pub fn column_of(trimmed: &str, line: &str, tab_width: usize) -> Option<usize> {
	if trimmed.is_empty() {
		return None;
	}

	let mut found = None;
	let mut search_end = line.len();
	while let Some(idx) = line[..search_end].rfind(trimmed) {
		found = Some(idx);
		search_end = idx;
	}

	let before = &line[..found?];
	before
		.chars()
		.all(|c| c == ' ' || c == '\t')
		.then(|| display_width(before.chars(), tab_width))
}

/// Returns true if `line` holds nothing but the prefix.
pub fn is_empty_comment(prefix: &LinePrefix, line: &str) -> bool {
	line.trim().replacen(&prefix.trimmed, "", 1).trim().is_empty()
}

/// Returns true if two prefixes belong to the same run of comments.
///
/// They must share an opener token and one must extend the other.
pub fn mutually_match(a: &LinePrefix, b: &LinePrefix) -> bool {
	a.token == b.token && (a.trimmed.starts_with(&b.trimmed) || b.trimmed.starts_with(&a.trimmed))
}

/// Returns the prefix with the shorter trimmed text, preferring `a` on ties.
pub fn shorter<'a>(a: &'a LinePrefix, b: &'a LinePrefix) -> &'a LinePrefix {
	if b.trimmed.chars().count() < a.trimmed.chars().count() {
		b
	} else {
		a
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use ropey::Rope;
	use rstest::rstest;
	use tern_language::{LexicalSyntax, SyntaxProvider};

	use super::*;

	fn rust() -> LanguageConfig {
		LanguageConfig::new("rust")
			.with_comment_tokens(["//"])
			.with_block_comment("/*", "*/")
	}

	fn lisp() -> LanguageConfig {
		LanguageConfig::new("lisp").with_comment_tokens([";"])
	}

	fn prefix_of(language: &LanguageConfig, text: &str) -> Option<LinePrefix> {
		let doc = Rope::from(text);
		let map = LexicalSyntax.classify(language, doc.slice(..)).unwrap();
		extract_prefix(language, doc.slice(..), &map, 0, 4)
	}

	fn prefix(trimmed: &str, token: &str) -> LinePrefix {
		LinePrefix {
			raw: format!("{trimmed} "),
			trimmed: trimmed.to_string(),
			token: token.to_string(),
			start: 0,
			column: Some(0),
		}
	}

	#[rstest]
	#[case("/// text", "/// ", "///")]
	#[case("    // text", "// ", "//")]
	#[case("//text more", "//text ", "//text")]
	#[case("//", "//", "//")]
	#[case("let x = 1; // tail", "// ", "//")]
	#[case("/** doc", "/** ", "/**")]
	#[case("//!\tinner", "//!\t", "//!")]
	fn test_extract(#[case] line: &str, #[case] raw: &str, #[case] trimmed: &str) {
		let found = prefix_of(&rust(), line).unwrap();
		assert_eq!(found.raw, raw);
		assert_eq!(found.trimmed, trimmed);
	}

	#[rstest]
	#[case("let x = 1;")]
	#[case("")]
	#[case("/* closed */ x")]
	#[case("   ")]
	fn test_extract_none(#[case] line: &str) {
		assert_eq!(prefix_of(&rust(), line), None);
	}

	#[test]
	fn test_extract_skips_continuation_of_earlier_block() {
		let doc = Rope::from("/* a\n * b");
		let lang = rust();
		let map = LexicalSyntax.classify(&lang, doc.slice(..)).unwrap();
		assert_eq!(extract_prefix(&lang, doc.slice(..), &map, 1, 4), None);
	}

	#[test]
	fn test_extract_records_column() {
		assert_eq!(prefix_of(&rust(), "\t/// a").unwrap().column, Some(4));
		assert_eq!(prefix_of(&rust(), "x; /// a").unwrap().column, None);
	}

	#[rstest]
	#[case("/// a", true)]
	#[case("// a", true)]
	#[case("//! a", false)]
	#[case("/** a", false)]
	fn test_classify_doc_rust(#[case] line: &str, #[case] doc: bool) {
		let lang = rust();
		let found = prefix_of(&lang, line).unwrap();
		assert_eq!(classify_doc(&lang, &found), doc);
	}

	#[test]
	fn test_classify_doc_lisp_repeats() {
		let lang = lisp();
		for line in [";;; a", ";; a", "; a"] {
			let found = prefix_of(&lang, line).unwrap();
			assert!(classify_doc(&lang, &found), "{line}");
		}
	}

	#[test]
	fn test_classify_doc_explicit_token() {
		let lang = rust().with_doc_token("///");
		assert!(classify_doc(&lang, &prefix_of(&lang, "/// a").unwrap()));
		assert!(!classify_doc(&lang, &prefix_of(&lang, "// a").unwrap()));
	}

	#[rstest]
	#[case("//", "  // a", Some(2))]
	#[case("//", "x // a", None)]
	#[case("//", "\t// a // b", Some(4))]
	#[case("#", "no prefix", None)]
	#[case("", "  ", None)]
	fn test_column_of(#[case] trimmed: &str, #[case] line: &str, #[case] expected: Option<usize>) {
		assert_eq!(column_of(trimmed, line, 4), expected);
	}

	#[rstest]
	#[case("/// ", true)]
	#[case("  ///", true)]
	#[case("/// a", false)]
	fn test_is_empty_comment(#[case] line: &str, #[case] empty: bool) {
		assert_eq!(is_empty_comment(&prefix("///", "//"), line), empty);
	}

	#[test]
	fn test_mutual_match() {
		let two = prefix("//", "//");
		let three = prefix("///", "//");
		let bang = prefix("//!", "//");
		let hash = prefix("#", "#");
		assert!(mutually_match(&two, &three));
		assert!(mutually_match(&three, &two));
		assert!(mutually_match(&two, &bang));
		assert!(!mutually_match(&three, &bang));
		assert!(!mutually_match(&two, &hash));
	}

	#[test]
	fn test_shorter() {
		let two = prefix("//", "//");
		let three = prefix("///", "//");
		assert_eq!(shorter(&three, &two).trimmed, "//");
		assert_eq!(shorter(&two, &three).trimmed, "//");
	}
}
