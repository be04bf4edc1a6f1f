//! The syntax classification seam.

use ropey::RopeSlice;
use tern_primitives::CharIdx;
use thiserror::Error;

use crate::config::LanguageConfig;
use crate::scanner::{CommentMap, CommentScanner};

/// Errors that can occur while classifying comments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
	/// The language defines neither line nor block comments.
	#[error("language '{0}' has no comment syntax")]
	NoCommentSyntax(String),

	/// A query referred to a char outside the classified text.
	#[error("offset {pos} is outside the text (length {len})")]
	OutOfBounds { pos: CharIdx, len: usize },

	/// A host classifier failed (parse error, unsupported grammar).
	#[error("classification failed: {0}")]
	Classify(String),
}

/// Answers which chars of a text snapshot belong to comments.
///
/// Implementations must reflect the language's real grammar: the engine has
/// no comment knowledge of its own beyond the configured tokens.
pub trait SyntaxProvider {
	/// Classifies every comment in `text` under `language`.
	///
	/// # Errors
	///
	/// Any error means "treat as not a comment"; callers never propagate it
	/// to the user.
	fn classify(&self, language: &LanguageConfig, text: RopeSlice) -> Result<CommentMap, SyntaxError>;
}

/// Classifies comments with [`CommentScanner`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LexicalSyntax;

impl SyntaxProvider for LexicalSyntax {
	fn classify(&self, language: &LanguageConfig, text: RopeSlice) -> Result<CommentMap, SyntaxError> {
		if !language.has_comments() {
			return Err(SyntaxError::NoCommentSyntax(language.language_id.clone()));
		}
		Ok(CommentScanner::new(language).scan(text))
	}
}

#[cfg(test)]
mod tests {
	use ropey::Rope;

	use super::*;

	#[test]
	fn test_language_without_comments_errors() {
		let plain = LanguageConfig::new("plain");
		let text = Rope::from("// not a comment here");
		assert_eq!(
			LexicalSyntax.classify(&plain, text.slice(..)),
			Err(SyntaxError::NoCommentSyntax("plain".into()))
		);
	}

	#[test]
	fn test_lexical_classification() {
		let lang = LanguageConfig::new("sh").with_comment_tokens(["#"]);
		let text = Rope::from("echo hi # there");
		let map = LexicalSyntax.classify(&lang, text.slice(..)).unwrap();
		assert_eq!(map.is_comment(4), Ok(false));
		assert_eq!(map.is_comment(8), Ok(true));
	}
}
