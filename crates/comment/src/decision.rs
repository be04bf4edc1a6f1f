//! Deciding whether a line break continues a comment.

use ropey::RopeSlice;
use tern_language::{CommentMap, LanguageConfig};
use tern_primitives::{CharIdx, line_start, line_text};

use crate::options::Options;
use crate::prefix::{LinePrefix, classify_doc, extract_prefix, is_empty_comment, mutually_match, shorter};
use crate::span::CommentSpan;

/// A line break the host has already performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBreak {
	/// Where the break was inserted.
	pub origin: CharIdx,
	/// Cursor after the break.
	pub cursor: CharIdx,
	/// The comment the cursor was in before the break, mapped past it.
	pub span: Option<CommentSpan>,
}

/// What the formatter should do after a line break.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContinuationDecision {
	pub should_continue: bool,
	/// Trimmed prefix to insert on the new line (single-line comments).
	pub chosen_prefix: Option<String>,
	/// Display column the prefix goes at (single-line comments).
	pub align_column: Option<usize>,
	/// True for a `/*`-style multi-line comment.
	pub c_like_block: bool,
	pub span: Option<CommentSpan>,
	/// True if the line below the new one already held a comment.
	pub comment_below: bool,
}

impl ContinuationDecision {
	fn stop(span: Option<CommentSpan>) -> Self {
		Self {
			span,
			..Self::default()
		}
	}
}

/// Decides how to continue the comment a line break happened in.
///
/// `text` and `map` describe the buffer after the break.
pub fn decide(
	language: &LanguageConfig,
	options: &Options,
	text: RopeSlice,
	map: &CommentMap,
	brk: &LineBreak,
) -> ContinuationDecision {
	let Some(span) = brk.span else {
		return ContinuationDecision::default();
	};

	if span.multiline {
		let c_like = is_c_like_block(language, text, span.start, brk.origin);
		tracing::trace!(c_like, "multi-line comment break");
		return ContinuationDecision {
			should_continue: c_like,
			c_like_block: c_like,
			..ContinuationDecision::stop(Some(span))
		};
	}

	let line = text.char_to_line(brk.cursor);
	let at_indent = text
		.slice(line_start(text, line)..brk.cursor)
		.chars()
		.all(char::is_whitespace);
	if !at_indent || line == 0 {
		return ContinuationDecision::stop(Some(span));
	}

	let above = text.char_to_line(brk.origin);
	let Some(prefix) = extract_prefix(language, text, map, above, options.tab_width) else {
		return ContinuationDecision::stop(Some(span));
	};
	let next = (line + 1 < text.len_lines())
		.then(|| extract_prefix(language, text, map, line + 1, options.tab_width))
		.flatten();

	let doc = classify_doc(language, &prefix);
	let empty = is_empty_comment(&prefix, &line_text(text, above));
	let next_doc = next.as_ref().is_some_and(|n| classify_doc(language, n));

	let paragraph = doc
		&& next_doc
		&& next
			.as_ref()
			.is_some_and(|n| n.column.is_some() && mutually_match(&prefix, n));
	let end_of_paragraph = doc && !empty && !options.is_inhibited(&prefix.trimmed);
	let fire = prefix.column.is_some() && (paragraph || end_of_paragraph);

	tracing::trace!(
		prefix = %prefix.trimmed,
		doc,
		empty,
		next_doc,
		paragraph,
		end_of_paragraph,
		"single-line comment break"
	);

	if !fire {
		return ContinuationDecision::stop(Some(span));
	}

	let chosen: &LinePrefix = match (&next, paragraph) {
		(Some(n), true) => shorter(&prefix, n),
		_ => &prefix,
	};

	ContinuationDecision {
		should_continue: true,
		chosen_prefix: Some(chosen.trimmed.clone()),
		align_column: prefix.column,
		c_like_block: false,
		span: Some(span),
		comment_below: next.is_some(),
	}
}

/// Returns true if the nearest opener at or before `pos` within the span is
/// a `/*`-style block opener.
fn is_c_like_block(language: &LanguageConfig, text: RopeSlice, start: CharIdx, pos: CharIdx) -> bool {
	let Some(block) = language.block_start() else {
		return false;
	};
	let region: String = text.slice(start..pos.max(start)).chars().collect();
	region
		.char_indices()
		.rev()
		.filter_map(|(idx, _)| language.match_opener(&region[idx..]))
		.find(|opener| opener.token == block)
		.is_some_and(|opener| opener.token.starts_with("/*"))
}
