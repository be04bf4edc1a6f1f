//! Configuration for comment continuation.
//!
//! Configuration is written in KDL (v2) format:
//!
//! ```kdl
//! // Engine options (global scope)
//! options {
//!     inhibit-prefixes "//" "--" "#"
//!     keep-suffix #false
//!     cancel-after #true
//!     tab-width 4
//!     use-tabs #false
//! }
//!
//! // Comment syntax. Blocks for built-in languages override only the
//! // fields they set.
//! language "rust" {
//!     doc-token "//"
//! }
//!
//! language "nix" {
//!     extensions "nix"
//!     comment-tokens "#"
//!     block-comment "/*" "*/"
//! }
//! ```
//!
//! # Scope Validation
//!
//! Engine options inside a language block generate warnings:
//!
//! ```text
//! Warning: 'keep-suffix' in language block will be ignored (should be in global options block)
//! ```
//!
//! Language settings inside `options` are reported the same way.
//!
//! Warnings are collected in [`Config::warnings`] for the host to display.

pub mod error;
pub mod kdl_util;
pub mod language;
pub mod options;

use std::path::Path;

pub use error::{ConfigError, ConfigWarning, Result};
pub use language::LanguageOverrides;
pub use options::{OptionOverrides, ParseContext};
use tern_comment::Options;
use tern_language::LanguageLoader;

/// Parsed configuration from a KDL file.
#[derive(Debug, Clone, Default)]
pub struct Config {
	/// Engine option overrides.
	pub options: OptionOverrides,
	/// Per-language comment syntax overrides.
	pub languages: Vec<LanguageOverrides>,
	/// Non-fatal warnings encountered during parsing.
	pub warnings: Vec<ConfigWarning>,
}

impl Config {
	/// Parse a KDL string into a [`Config`].
	///
	/// Non-fatal warnings (e.g., scope mismatches) are collected in `Config::warnings`
	/// rather than causing parse failure. Callers should check and display these.
	pub fn parse(input: &str) -> Result<Self> {
		let doc: kdl::KdlDocument = input.parse()?;
		let mut warnings = Vec::new();

		let options = if let Some(opts_node) = doc.get("options") {
			let parsed = options::parse_options(opts_node)?;
			warnings.extend(parsed.warnings);
			parsed.overrides
		} else {
			OptionOverrides::default()
		};

		let mut languages = Vec::new();
		for node in doc.nodes().iter().filter(|n| n.name().value() == "language") {
			languages.push(language::parse_language(node, &mut warnings)?);
		}

		for node in doc.nodes() {
			let name = node.name().value();
			if name != "options" && name != "language" {
				return Err(ConfigError::UnknownOption {
					key: name.to_string(),
					suggestion: kdl_util::suggest(name, &["options", "language"]),
				});
			}
		}

		tracing::debug!(
			options = !options.is_empty(),
			languages = languages.len(),
			warnings = warnings.len(),
			"parsed configuration"
		);

		Ok(Config {
			options,
			languages,
			warnings,
		})
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// Merge another config into this one.
	///
	/// Values from `other` override values in `self`.
	pub fn merge(&mut self, other: Config) {
		self.options.merge(other.options);
		self.languages.extend(other.languages);
		self.warnings.extend(other.warnings);
	}

	/// Returns the engine options this config describes.
	pub fn engine_options(&self) -> Options {
		self.options.to_options()
	}

	/// Registers the configured languages with `loader`.
	///
	/// Blocks naming an existing language override its fields; others define
	/// a new language. Returns warnings for languages left without comments.
	pub fn apply_languages(&self, loader: &mut LanguageLoader) -> Vec<ConfigWarning> {
		let mut warnings = Vec::new();
		for overrides in &self.languages {
			let base = loader
				.language_for_name(&overrides.name)
				.and_then(|id| loader.get(id))
				.map(|config| (**config).clone());
			let config = overrides.apply(base.as_ref());
			if !config.has_comments() {
				tracing::warn!(language = %config.language_id, "language has no comment tokens");
				warnings.push(ConfigWarning::NoCommentSyntax {
					language: config.language_id.clone(),
				});
			}
			loader.register(config);
		}
		warnings
	}
}
