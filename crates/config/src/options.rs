//! Options configuration parsing.

use std::collections::BTreeSet;

use kdl::KdlNode;
use tern_comment::Options;

use crate::error::{ConfigError, ConfigWarning, Result};
use crate::kdl_util;
use crate::language::LANGUAGE_KEYS;

/// KDL keys of every engine option.
pub const OPTION_KEYS: [&str; 5] = ["inhibit-prefixes", "keep-suffix", "cancel-after", "tab-width", "use-tabs"];

/// Context for option parsing - indicates where options are being parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseContext {
	/// Inside a global `options { }` block.
	Global,
	/// Inside a `language "foo" { }` block.
	Language,
}

/// Option overrides; `None` leaves the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionOverrides {
	pub inhibit_prefixes: Option<BTreeSet<String>>,
	pub keep_suffix: Option<bool>,
	pub cancel_after: Option<bool>,
	pub tab_width: Option<usize>,
	pub use_tabs: Option<bool>,
}

impl OptionOverrides {
	/// Returns true if no option is set.
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}

	/// Merges `other` into `self`; values from `other` win.
	pub fn merge(&mut self, other: OptionOverrides) {
		if other.inhibit_prefixes.is_some() {
			self.inhibit_prefixes = other.inhibit_prefixes;
		}
		self.keep_suffix = other.keep_suffix.or(self.keep_suffix);
		self.cancel_after = other.cancel_after.or(self.cancel_after);
		self.tab_width = other.tab_width.or(self.tab_width);
		self.use_tabs = other.use_tabs.or(self.use_tabs);
	}

	/// Writes the set values into `options`.
	pub fn apply(&self, options: &mut Options) {
		if let Some(prefixes) = &self.inhibit_prefixes {
			options.inhibit_prefixes = prefixes.clone();
		}
		if let Some(keep) = self.keep_suffix {
			options.keep_suffix = keep;
		}
		if let Some(cancel) = self.cancel_after {
			options.cancel_after = cancel;
		}
		if let Some(width) = self.tab_width {
			options.tab_width = width;
		}
		if let Some(tabs) = self.use_tabs {
			options.use_tabs = tabs;
		}
	}

	/// Returns [`Options::default`] with these overrides applied.
	pub fn to_options(&self) -> Options {
		let mut options = Options::default();
		self.apply(&mut options);
		options
	}
}

/// Result of parsing options, including any non-fatal warnings.
#[derive(Debug)]
pub struct ParsedOptions {
	pub overrides: OptionOverrides,
	/// Non-fatal warnings encountered during parsing.
	pub warnings: Vec<ConfigWarning>,
}

/// Parses the children of an `options { }` block.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownOption`] for unrecognized option keys, or
/// [`ConfigError::OptionTypeMismatch`] when a value doesn't match the expected type.
pub fn parse_options(node: &KdlNode) -> Result<ParsedOptions> {
	let mut overrides = OptionOverrides::default();
	let mut warnings = Vec::new();

	let Some(children) = node.children() else {
		return Ok(ParsedOptions { overrides, warnings });
	};

	for opt_node in children.nodes() {
		let key = opt_node.name().value();
		if check_scope(key, ParseContext::Global, &mut warnings) {
			continue;
		}

		match key {
			"inhibit-prefixes" => {
				let prefixes = kdl_util::string_arguments(opt_node)?;
				overrides.inhibit_prefixes = Some(prefixes.into_iter().map(|p| p.trim().to_string()).collect());
			}
			"keep-suffix" => overrides.keep_suffix = Some(kdl_util::bool_argument(opt_node)?),
			"cancel-after" => overrides.cancel_after = Some(kdl_util::bool_argument(opt_node)?),
			"use-tabs" => overrides.use_tabs = Some(kdl_util::bool_argument(opt_node)?),
			"tab-width" => {
				let width = kdl_util::integer_argument(opt_node)?;
				match usize::try_from(width) {
					Ok(width) if (1..=16).contains(&width) => overrides.tab_width = Some(width),
					_ => warnings.push(ConfigWarning::InvalidValue {
						option: key.to_string(),
						reason: format!("{width} is not between 1 and 16"),
					}),
				}
			}
			_ => {
				return Err(ConfigError::UnknownOption {
					key: key.to_string(),
					suggestion: kdl_util::suggest(key, &OPTION_KEYS),
				});
			}
		}
	}

	Ok(ParsedOptions { overrides, warnings })
}

/// Records a key that belongs to the other kind of block: an engine option
/// inside a language block, or a language setting inside `options`.
///
/// Returns `true` if a warning was pushed and the key should be skipped.
pub fn check_scope(key: &str, context: ParseContext, warnings: &mut Vec<ConfigWarning>) -> bool {
	let (misplaced, found_in, expected) = match context {
		ParseContext::Language => (OPTION_KEYS.contains(&key), "language block", "global options block"),
		ParseContext::Global => (LANGUAGE_KEYS.contains(&key), "global options block", "language block"),
	};
	if !misplaced {
		return false;
	}
	tracing::debug!(option = key, found_in, "option in the wrong block");
	warnings.push(ConfigWarning::ScopeMismatch {
		option: key.to_string(),
		found_in,
		expected,
	});
	true
}

#[cfg(test)]
mod tests {
	use kdl::KdlDocument;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	fn parse(src: &str) -> Result<ParsedOptions> {
		let doc: KdlDocument = src.parse().unwrap();
		parse_options(doc.get("options").unwrap())
	}

	#[test]
	fn test_parse_all_options() {
		let parsed = parse(
			r##"
options {
	inhibit-prefixes "//" "#"
	keep-suffix #true
	cancel-after #true
	tab-width 8
	use-tabs #true
}
"##,
		)
		.unwrap();

		let options = parsed.overrides.to_options();
		assert_eq!(
			options.inhibit_prefixes,
			BTreeSet::from(["//".to_string(), "#".to_string()])
		);
		assert!(options.keep_suffix);
		assert!(options.cancel_after);
		assert_eq!(options.tab_width, 8);
		assert!(options.use_tabs);
		assert!(parsed.warnings.is_empty());
	}

	#[test]
	fn test_empty_inhibit_list() {
		let parsed = parse("options {\n\tinhibit-prefixes\n}").unwrap();
		assert!(parsed.overrides.to_options().inhibit_prefixes.is_empty());
	}

	#[test]
	fn test_unknown_option_suggests() {
		let err = parse("options {\n\tkeep-sufix #true\n}").unwrap_err();
		assert!(matches!(
			err,
			ConfigError::UnknownOption { ref key, suggestion: Some(ref s) } if key == "keep-sufix" && s == "keep-suffix"
		));
	}

	#[test]
	fn test_type_mismatch() {
		let err = parse("options {\n\tcancel-after \"yes\"\n}").unwrap_err();
		assert!(matches!(
			err,
			ConfigError::OptionTypeMismatch { expected: "bool", got: "string", .. }
		));
	}

	#[rstest]
	#[case(0, None)]
	#[case(1, Some(1))]
	#[case(16, Some(16))]
	#[case(17, None)]
	fn test_tab_width_range(#[case] width: i64, #[case] expected: Option<usize>) {
		let parsed = parse(&format!("options {{\n\ttab-width {width}\n}}")).unwrap();
		assert_eq!(parsed.overrides.tab_width, expected);
		assert_eq!(parsed.warnings.is_empty(), expected.is_some());
	}

	#[test]
	fn test_language_key_in_options_warns() {
		let parsed = parse("options {\n\tcomment-tokens \"//\"\n\tkeep-suffix #true\n}").unwrap();
		assert!(parsed.overrides.keep_suffix.is_some());
		assert_eq!(
			parsed.warnings,
			vec![ConfigWarning::ScopeMismatch {
				option: "comment-tokens".into(),
				found_in: "global options block",
				expected: "language block",
			}]
		);
	}

	#[test]
	fn test_merge_prefers_other() {
		let mut base = OptionOverrides {
			keep_suffix: Some(true),
			tab_width: Some(2),
			..Default::default()
		};
		base.merge(OptionOverrides {
			tab_width: Some(8),
			..Default::default()
		});
		assert_eq!(base.keep_suffix, Some(true));
		assert_eq!(base.tab_width, Some(8));
	}
}
