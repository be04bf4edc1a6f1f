//! Applying a continuation decision to the buffer.

use tern_language::{Indenter, LanguageConfig};
use tern_primitives::{
	Bias, Change, EditError, Transaction, first_non_whitespace, indentation, leading_whitespace,
	line_end, line_start,
};

use crate::buffer::Buffer;
use crate::options::Options;
use crate::span::CommentSpan;

/// Replaces the indentation of the cursor line with `column` columns of
/// whitespace followed by `prefix` and a space.
///
/// Returns the inserted text.
///
/// # Errors
///
/// Propagates [`EditError`] from the edit.
pub fn continue_line(
	buffer: &mut Buffer,
	prefix: &str,
	column: usize,
	options: &Options,
) -> Result<String, EditError> {
	let text = buffer.text();
	let line = buffer.cursor_line();
	let start = line_start(text, line);
	let end = first_non_whitespace(text, line).max(buffer.cursor());

	let inserted = format!(
		"{}{prefix} ",
		indentation(column, options.tab_width, options.use_tabs)
	);
	let tx = Transaction::change(text, [Change::replace(start, end, inserted.clone())])?;
	buffer.apply(&tx, Bias::Left)?;
	buffer.set_cursor(start + inserted.chars().count());
	Ok(inserted)
}

/// Continues a `/*`-style block comment on the cursor line.
///
/// The line gets a `* ` leader, every line of the comment is re-indented, and
/// unless `options.keep_suffix` is set a closer on the cursor line moves to
/// its own line.
///
/// # Errors
///
/// Propagates [`EditError`] from any of the edits.
pub fn continue_block(
	buffer: &mut Buffer,
	span: CommentSpan,
	indenter: &dyn Indenter,
	options: &Options,
) -> Result<(), EditError> {
	let language = buffer.language().clone();
	let mut span = span;

	let text = buffer.text();
	let line = buffer.cursor_line();
	let start = line_start(text, line);
	let limit = line_end(text, line);
	let mut end = buffer.cursor().max(start);
	while end < limit && matches!(text.char(end), ' ' | '\t') {
		end += 1;
	}

	let tx = Transaction::change(text, [Change::replace(start, end, "* ")])?;
	buffer.apply(&tx, Bias::Left)?;
	buffer.set_cursor(start + 2);
	span = span.map(&tx);

	let text = buffer.text();
	let first = text.char_to_line(span.start.min(buffer.cursor()));
	let last = text.char_to_line(span.end.max(buffer.cursor()).min(text.len_chars()));
	if let Some(tx) = reindent(buffer, &language, indenter, first..=last, options)? {
		span = span.map(&tx);
	}

	if !options.keep_suffix {
		split_closer(buffer, &language, span, indenter, options)?;
	}
	Ok(())
}

/// Moves a closer that follows the cursor on the same line to a line of its own.
fn split_closer(
	buffer: &mut Buffer,
	language: &LanguageConfig,
	span: CommentSpan,
	indenter: &dyn Indenter,
	options: &Options,
) -> Result<(), EditError> {
	let Some(closer) = language.block_end() else {
		return Ok(());
	};

	let text = buffer.text();
	let cursor = buffer.cursor();
	let line = text.char_to_line(cursor);
	let rest: String = text.slice(cursor..line_end(text, line)).chars().collect();
	let Some(byte) = rest.find(closer) else {
		return Ok(());
	};
	let at = cursor + rest[..byte].chars().count();
	if at >= span.end {
		return Ok(());
	}

	let mut from = at;
	while from > cursor && matches!(text.char(from - 1), ' ' | '\t') {
		from -= 1;
	}

	let tx = Transaction::change(text, [Change::replace(from, at, "\n")])?;
	buffer.apply(&tx, Bias::Left)?;
	reindent(buffer, language, indenter, line + 1..=line + 1, options)?;
	tracing::trace!(line = line + 1, "moved block closer to its own line");
	Ok(())
}

/// Re-indents `lines` with `indenter`, returning the edit if anything changed.
fn reindent(
	buffer: &mut Buffer,
	language: &LanguageConfig,
	indenter: &dyn Indenter,
	lines: std::ops::RangeInclusive<usize>,
	options: &Options,
) -> Result<Option<Transaction>, EditError> {
	let text = buffer.text();
	let changes: Vec<Change> = lines
		.filter(|line| *line < text.len_lines())
		.filter_map(|line| {
			let column = indenter.indent_column(language, text, line, options.tab_width)?;
			let current = leading_whitespace(text, line);
			let wanted = indentation(column, options.tab_width, options.use_tabs);
			(current != wanted).then(|| {
				let start = line_start(text, line);
				Change::replace(start, start + current.chars().count(), wanted)
			})
		})
		.collect();

	if changes.is_empty() {
		return Ok(None);
	}

	let tx = Transaction::change(text, changes)?;
	buffer.apply(&tx, Bias::Right)?;
	Ok(Some(tx))
}
