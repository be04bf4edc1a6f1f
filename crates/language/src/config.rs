//! Language comment configuration and lookup.
//!
//! A [`LanguageConfig`] carries everything the comment engine knows about a
//! language: its line comment tokens, its block comment pair, the base token
//! used to recognise doc markers, and the string delimiters the scanner must
//! skip over.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use regex::Regex;

/// Unique identifier for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LanguageId(pub u32);

impl LanguageId {
	#[inline]
	pub fn idx(self) -> usize {
		self.0 as usize
	}
}

/// Comment syntax for a single language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
	/// Language identifier (e.g., "rust", "python").
	pub language_id: String,

	/// File extensions associated with this language.
	pub extensions: Vec<String>,

	/// Exact filenames (e.g., "Makefile").
	pub filenames: Vec<String>,

	/// Shebang interpreters (e.g., "python", "bash").
	pub shebangs: Vec<String>,

	/// Line comment token(s) for the language.
	pub comment_tokens: Vec<String>,

	/// Block comment tokens (start, end).
	pub block_comment: Option<(String, String)>,

	/// Whether block comments nest (Haskell, OCaml).
	pub nested_blocks: bool,

	/// Base comment-start token for doc-marker classification.
	///
	/// Falls back to the first line token, then the block opener.
	pub doc_token: Option<String>,

	/// Characters that open and close string literals.
	pub string_delimiters: Vec<char>,

	/// Whether `'x'` is a char literal and a lone `'` a lifetime or label.
	///
	/// Takes precedence over `'` in [`Self::string_delimiters`].
	pub char_literals: bool,

	opener_pattern: OnceCell<Option<Regex>>,
}

/// An opener recognised at the start of some text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenerMatch<'a> {
	/// The configured token that matched.
	pub token: &'a str,
	/// Chars covered by the token and any repetitions of its last char.
	pub len: usize,
}

impl LanguageConfig {
	/// Creates a language with no comment syntax and `"` as its only string delimiter.
	pub fn new(language_id: impl Into<String>) -> Self {
		Self {
			language_id: language_id.into(),
			extensions: Vec::new(),
			filenames: Vec::new(),
			shebangs: Vec::new(),
			comment_tokens: Vec::new(),
			block_comment: None,
			nested_blocks: false,
			doc_token: None,
			string_delimiters: vec!['"'],
			char_literals: false,
			opener_pattern: OnceCell::new(),
		}
	}

	pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.extensions = extensions.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_filenames<I, S>(mut self, filenames: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.filenames = filenames.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_shebangs<I, S>(mut self, shebangs: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.shebangs = shebangs.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_comment_tokens<I, S>(mut self, tokens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.comment_tokens = tokens.into_iter().map(Into::into).collect();
		self.opener_pattern = OnceCell::new();
		self
	}

	pub fn with_block_comment(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
		self.block_comment = Some((start.into(), end.into()));
		self.opener_pattern = OnceCell::new();
		self
	}

	/// Removes block comment support.
	pub fn without_block_comment(mut self) -> Self {
		self.block_comment = None;
		self.opener_pattern = OnceCell::new();
		self
	}

	pub fn with_nested_blocks(mut self, nested: bool) -> Self {
		self.nested_blocks = nested;
		self
	}

	pub fn with_doc_token(mut self, token: impl Into<String>) -> Self {
		self.doc_token = Some(token.into());
		self
	}

	pub fn with_string_delimiters(mut self, delimiters: impl IntoIterator<Item = char>) -> Self {
		self.string_delimiters = delimiters.into_iter().collect();
		self
	}

	pub fn with_char_literals(mut self, enabled: bool) -> Self {
		self.char_literals = enabled;
		self
	}

	/// Returns true if the language has any comment syntax at all.
	pub fn has_comments(&self) -> bool {
		!self.comment_tokens.is_empty() || self.block_comment.is_some()
	}

	/// Returns the block opener, if any.
	pub fn block_start(&self) -> Option<&str> {
		self.block_comment.as_ref().map(|(start, _)| start.as_str())
	}

	/// Returns the block closer, if any.
	pub fn block_end(&self) -> Option<&str> {
		self.block_comment.as_ref().map(|(_, end)| end.as_str())
	}

	/// Returns the base comment-start token used for doc classification.
	pub fn doc_token(&self) -> Option<&str> {
		self.doc_token
			.as_deref()
			.or_else(|| self.comment_tokens.first().map(String::as_str))
			.or_else(|| self.block_start())
	}

	/// Returns every comment opener, longest first.
	pub fn openers(&self) -> Vec<&str> {
		let mut openers: Vec<&str> = self
			.comment_tokens
			.iter()
			.map(String::as_str)
			.chain(self.block_start())
			.filter(|t| !t.is_empty())
			.collect();
		openers.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));
		openers
	}

	/// Returns the anchored comment-start pattern.
	///
	/// Each opener may be followed by repetitions of its last char, so `//`
	/// also covers `///` and `/*` covers `/**`.
	pub fn opener_pattern(&self) -> Option<&Regex> {
		self.opener_pattern
			.get_or_init(|| {
				let alternatives: Vec<String> = self
					.openers()
					.into_iter()
					.filter_map(|token| {
						let last = token.chars().last()?;
						Some(format!(
							"{}(?:{})*",
							regex::escape(token),
							regex::escape(&last.to_string())
						))
					})
					.collect();
				if alternatives.is_empty() {
					return None;
				}
				let pattern = format!("^(?:{})", alternatives.join("|"));
				Regex::new(&pattern)
					.map_err(|e| {
						tracing::warn!(language = %self.language_id, error = %e, "invalid comment-start pattern");
					})
					.ok()
			})
			.as_ref()
	}

	/// Matches a comment opener at the very start of `text`.
	pub fn match_opener<'a>(&'a self, text: &str) -> Option<OpenerMatch<'a>> {
		let token = self
			.openers()
			.into_iter()
			.find(|token| text.starts_with(token))?;
		let len = self
			.opener_pattern()
			.and_then(|re| re.find(text))
			.map_or_else(|| token.chars().count(), |m| text[..m.end()].chars().count());
		Some(OpenerMatch { token, len })
	}
}

/// Registry of language comment configurations.
#[derive(Debug, Default)]
pub struct LanguageLoader {
	languages: Vec<Arc<LanguageConfig>>,
	by_extension: HashMap<String, LanguageId>,
	by_filename: HashMap<String, LanguageId>,
	by_shebang: HashMap<String, LanguageId>,
}

impl LanguageLoader {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a loader pre-populated with [`crate::builtin_languages`].
	pub fn with_builtins() -> Self {
		let mut loader = Self::new();
		for config in crate::builtin::builtin_languages() {
			loader.register(config);
		}
		loader
	}

	/// Registers a language, replacing any existing one with the same id.
	pub fn register(&mut self, config: LanguageConfig) -> LanguageId {
		let id = match self.language_for_name(&config.language_id) {
			Some(existing) => {
				self.by_extension.retain(|_, v| *v != existing);
				self.by_filename.retain(|_, v| *v != existing);
				self.by_shebang.retain(|_, v| *v != existing);
				existing
			}
			None => LanguageId(self.languages.len() as u32),
		};

		for ext in &config.extensions {
			self.by_extension.insert(ext.clone(), id);
		}

		for name in &config.filenames {
			self.by_filename.insert(name.clone(), id);
		}

		for shebang in &config.shebangs {
			self.by_shebang.insert(shebang.clone(), id);
		}

		let config = Arc::new(config);
		if id.idx() < self.languages.len() {
			tracing::debug!(language = %config.language_id, "replacing language configuration");
			self.languages[id.idx()] = config;
		} else {
			self.languages.push(config);
		}
		id
	}

	/// Gets a language configuration by ID.
	pub fn get(&self, id: LanguageId) -> Option<&Arc<LanguageConfig>> {
		self.languages.get(id.idx())
	}

	/// Finds a language by name.
	pub fn language_for_name(&self, name: &str) -> Option<LanguageId> {
		self.languages
			.iter()
			.position(|config| config.language_id == name)
			.map(|idx| LanguageId(idx as u32))
	}

	/// Finds a language by file path (exact filename first, then extension).
	pub fn language_for_path(&self, path: &Path) -> Option<LanguageId> {
		if let Some(name) = path.file_name().and_then(|n| n.to_str())
			&& let Some(id) = self.by_filename.get(name)
		{
			return Some(*id);
		}

		path.extension()
			.and_then(|ext| ext.to_str())
			.and_then(|ext| self.by_extension.get(ext).copied())
	}

	/// Finds a language by shebang line.
	pub fn language_for_shebang(&self, first_line: &str) -> Option<LanguageId> {
		let line = first_line.strip_prefix("#!")?;
		let parts: Vec<&str> = line.split_whitespace().collect();

		// Handle /usr/bin/env python style
		let interpreter = if parts.first() == Some(&"/usr/bin/env") || parts.first() == Some(&"env")
		{
			parts.get(1).copied()
		} else {
			parts.first().and_then(|p| p.rsplit('/').next())
		};

		interpreter.and_then(|interp| {
			// Strip version numbers (python3 -> python)
			let base = interp.trim_end_matches(|c: char| c.is_ascii_digit());
			self.by_shebang.get(base).copied()
		})
	}

	/// Returns all registered languages.
	pub fn languages(&self) -> impl Iterator<Item = (LanguageId, &Arc<LanguageConfig>)> {
		self.languages
			.iter()
			.enumerate()
			.map(|(idx, config)| (LanguageId(idx as u32), config))
	}
}
