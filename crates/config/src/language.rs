//! Language comment syntax configuration.

use kdl::KdlNode;
use tern_language::LanguageConfig;

use crate::error::{ConfigError, ConfigWarning, Result};
use crate::kdl_util;
use crate::options::{ParseContext, check_scope};

/// KDL keys accepted inside a `language` block.
pub const LANGUAGE_KEYS: [&str; 9] = [
	"extensions",
	"filenames",
	"shebangs",
	"comment-tokens",
	"block-comment",
	"nested-blocks",
	"doc-token",
	"string-delimiters",
	"char-literals",
];

/// Overrides for one language. Unset fields keep the built-in value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageOverrides {
	pub name: String,
	pub extensions: Option<Vec<String>>,
	pub filenames: Option<Vec<String>>,
	pub shebangs: Option<Vec<String>>,
	pub comment_tokens: Option<Vec<String>>,
	/// `Some(None)` removes block comments.
	pub block_comment: Option<Option<(String, String)>>,
	pub nested_blocks: Option<bool>,
	pub doc_token: Option<String>,
	pub string_delimiters: Option<Vec<char>>,
	pub char_literals: Option<bool>,
}

impl LanguageOverrides {
	/// Applies the overrides on top of `base`, or on an empty language.
	pub fn apply(&self, base: Option<&LanguageConfig>) -> LanguageConfig {
		let mut config = base
			.cloned()
			.unwrap_or_else(|| LanguageConfig::new(self.name.clone()));

		if let Some(extensions) = &self.extensions {
			config = config.with_extensions(extensions.clone());
		}
		if let Some(filenames) = &self.filenames {
			config = config.with_filenames(filenames.clone());
		}
		if let Some(shebangs) = &self.shebangs {
			config = config.with_shebangs(shebangs.clone());
		}
		if let Some(tokens) = &self.comment_tokens {
			config = config.with_comment_tokens(tokens.clone());
		}
		match &self.block_comment {
			Some(Some((start, end))) => config = config.with_block_comment(start.clone(), end.clone()),
			Some(None) => config = config.without_block_comment(),
			None => {}
		}
		if let Some(nested) = self.nested_blocks {
			config = config.with_nested_blocks(nested);
		}
		if let Some(token) = &self.doc_token {
			config = config.with_doc_token(token.clone());
		}
		if let Some(delimiters) = &self.string_delimiters {
			config = config.with_string_delimiters(delimiters.iter().copied());
		}
		if let Some(enabled) = self.char_literals {
			config = config.with_char_literals(enabled);
		}
		config
	}
}

/// Parses a `language "name" { }` block.
///
/// # Errors
///
/// Returns [`ConfigError::MissingField`] without a language name,
/// [`ConfigError::UnknownOption`] for unknown keys, and
/// [`ConfigError::OptionTypeMismatch`] for mistyped values.
pub fn parse_language(node: &KdlNode, warnings: &mut Vec<ConfigWarning>) -> Result<LanguageOverrides> {
	let name = node
		.get(0)
		.and_then(|v| v.as_string())
		.ok_or_else(|| ConfigError::MissingField("language name".to_string()))?;

	let mut overrides = LanguageOverrides {
		name: name.to_string(),
		..Default::default()
	};

	let Some(children) = node.children() else {
		return Ok(overrides);
	};

	for field in children.nodes() {
		let key = field.name().value();
		if check_scope(key, ParseContext::Language, warnings) {
			continue;
		}

		match key {
			"extensions" => overrides.extensions = Some(kdl_util::string_arguments(field)?),
			"filenames" => overrides.filenames = Some(kdl_util::string_arguments(field)?),
			"shebangs" => overrides.shebangs = Some(kdl_util::string_arguments(field)?),
			"comment-tokens" => overrides.comment_tokens = Some(kdl_util::string_arguments(field)?),
			"block-comment" => {
				let tokens = kdl_util::string_arguments(field)?;
				overrides.block_comment = Some(match tokens.as_slice() {
					[] => None,
					[start, end] => Some((start.clone(), end.clone())),
					_ => {
						warnings.push(ConfigWarning::InvalidValue {
							option: key.to_string(),
							reason: format!("expected an opener and a closer, got {} values", tokens.len()),
						});
						continue;
					}
				});
			}
			"nested-blocks" => overrides.nested_blocks = Some(kdl_util::bool_argument(field)?),
			"doc-token" => overrides.doc_token = Some(kdl_util::string_argument(field)?),
			"string-delimiters" => {
				let mut delimiters = Vec::new();
				for value in kdl_util::string_arguments(field)? {
					let mut chars = value.chars();
					match (chars.next(), chars.next()) {
						(Some(c), None) => delimiters.push(c),
						_ => warnings.push(ConfigWarning::InvalidValue {
							option: key.to_string(),
							reason: format!("'{value}' is not a single character"),
						}),
					}
				}
				overrides.string_delimiters = Some(delimiters);
			}
			"char-literals" => overrides.char_literals = Some(kdl_util::bool_argument(field)?),
			_ => {
				return Err(ConfigError::UnknownOption {
					key: key.to_string(),
					suggestion: kdl_util::suggest(key, &LANGUAGE_KEYS),
				});
			}
		}
	}

	Ok(overrides)
}

#[cfg(test)]
mod tests {
	use kdl::KdlDocument;
	use pretty_assertions::assert_eq;

	use super::*;

	fn parse(src: &str) -> (Result<LanguageOverrides>, Vec<ConfigWarning>) {
		let doc: KdlDocument = src.parse().unwrap();
		let mut warnings = Vec::new();
		let result = parse_language(doc.get("language").unwrap(), &mut warnings);
		(result, warnings)
	}

	#[test]
	fn test_parse_language_block() {
		let (parsed, warnings) = parse(
			r###"
language "nix" {
	extensions "nix"
	comment-tokens "#"
	block-comment "/*" "*/"
	doc-token "##"
	string-delimiters "\""
}
"###,
		);
		let parsed = parsed.unwrap();
		assert!(warnings.is_empty());

		let config = parsed.apply(None);
		assert_eq!(config.language_id, "nix");
		assert_eq!(config.extensions, vec!["nix"]);
		assert_eq!(config.comment_tokens, vec!["#"]);
		assert_eq!(config.block_comment, Some(("/*".into(), "*/".into())));
		assert_eq!(config.doc_token(), Some("##"));
		assert_eq!(config.string_delimiters, vec!['"']);
		assert!(!config.char_literals);
	}

	#[test]
	fn test_char_literals_override() {
		let (parsed, warnings) = parse("language \"c\" {\n\tchar-literals #true\n}");
		assert!(warnings.is_empty());
		let config = parsed.unwrap().apply(Some(&LanguageConfig::new("c")));
		assert!(config.char_literals);
	}

	#[test]
	fn test_overrides_keep_base_fields() {
		let (parsed, _) = parse("language \"rust\" {\n\tdoc-token \"///\"\n}");
		let base = LanguageConfig::new("rust")
			.with_extensions(["rs"])
			.with_comment_tokens(["//"]);
		let config = parsed.unwrap().apply(Some(&base));
		assert_eq!(config.extensions, vec!["rs"]);
		assert_eq!(config.doc_token(), Some("///"));
	}

	#[test]
	fn test_empty_block_comment_removes_it() {
		let (parsed, _) = parse("language \"c\" {\n\tblock-comment\n}");
		let base = LanguageConfig::new("c").with_block_comment("/*", "*/");
		assert_eq!(parsed.unwrap().apply(Some(&base)).block_comment, None);
	}

	#[test]
	fn test_missing_name() {
		let (parsed, _) = parse("language {\n}");
		assert!(matches!(parsed, Err(ConfigError::MissingField(_))));
	}

	#[test]
	fn test_engine_option_in_language_block_warns() {
		let (parsed, warnings) = parse("language \"c\" {\n\tkeep-suffix #true\n}");
		assert!(parsed.is_ok());
		assert_eq!(
			warnings,
			vec![ConfigWarning::ScopeMismatch {
				option: "keep-suffix".into(),
				found_in: "language block",
				expected: "global options block",
			}]
		);
	}

	#[test]
	fn test_unknown_field_suggests() {
		let (parsed, _) = parse("language \"c\" {\n\tcomment-token \"//\"\n}");
		assert!(matches!(
			parsed,
			Err(ConfigError::UnknownOption { suggestion: Some(ref s), .. }) if s == "comment-tokens"
		));
	}

	#[test]
	fn test_bad_block_comment_warns() {
		let (parsed, warnings) = parse("language \"c\" {\n\tblock-comment \"/*\"\n}");
		assert_eq!(parsed.unwrap().block_comment, None);
		assert_eq!(warnings.len(), 1);
	}
}
