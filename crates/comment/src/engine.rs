//! The line-break handler.

use tern_language::{CommentIndenter, Indenter, LexicalSyntax, SyntaxProvider};
use tern_primitives::{Bias, EditError};

use crate::buffer::Buffer;
use crate::cancel::{Command, retract};
use crate::decision::{ContinuationDecision, LineBreak, decide};
use crate::format::{continue_block, continue_line};
use crate::host::{CopyIndent, LineBreaker};
use crate::options::Options;
use crate::span::locate;

/// What a line break did beyond the plain newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakOutcome {
	/// Only the host's line break happened.
	Passthrough,
	/// A single-line comment was continued with `prefix` (indentation included).
	Continued { prefix: String },
	/// A block comment was continued with a `* ` leader.
	Block,
	/// The previous continuation line was removed again.
	Retracted,
}

/// Continues comments across line breaks.
///
/// One engine serves any number of buffers; per-buffer state lives in
/// [`Buffer`].
pub struct Engine {
	options: Options,
	syntax: Box<dyn SyntaxProvider + Send + Sync>,
	breaker: Box<dyn LineBreaker + Send + Sync>,
	indenter: Box<dyn Indenter + Send + Sync>,
}

impl std::fmt::Debug for Engine {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Engine").field("options", &self.options).finish_non_exhaustive()
	}
}

impl Default for Engine {
	fn default() -> Self {
		Self::new(Options::default())
	}
}

impl Engine {
	/// Creates an engine with lexical classification, indentation-copying
	/// line breaks and `*`-aligning block indentation.
	pub fn new(options: Options) -> Self {
		Self {
			options,
			syntax: Box::new(LexicalSyntax),
			breaker: Box::new(CopyIndent),
			indenter: Box::new(CommentIndenter),
		}
	}

	#[must_use]
	pub fn with_syntax(mut self, syntax: impl SyntaxProvider + Send + Sync + 'static) -> Self {
		self.syntax = Box::new(syntax);
		self
	}

	#[must_use]
	pub fn with_line_breaker(mut self, breaker: impl LineBreaker + Send + Sync + 'static) -> Self {
		self.breaker = Box::new(breaker);
		self
	}

	#[must_use]
	pub fn with_indenter(mut self, indenter: impl Indenter + Send + Sync + 'static) -> Self {
		self.indenter = Box::new(indenter);
		self
	}

	pub fn options(&self) -> &Options {
		&self.options
	}

	pub fn set_options(&mut self, options: Options) {
		self.options = options;
	}

	/// Reports a host command. A line break is handled as by
	/// [`Engine::line_break`]; anything else disarms a pending retraction.
	pub fn observe_command(&self, buffer: &mut Buffer, command: Command) {
		match command {
			Command::LineBreak => {
				self.line_break(buffer);
			}
			Command::Other => buffer.cancel.disarm(),
		}
	}

	/// Performs a line break at the cursor and continues the comment it
	/// happened in.
	///
	/// Never fails: when anything goes wrong the plain line break stands.
	pub fn line_break(&self, buffer: &mut Buffer) -> BreakOutcome {
		let armed = buffer.cancel.take();

		let language = buffer.language().clone();
		let origin = buffer.cursor();
		let span = if buffer.is_active() {
			locate(self.syntax.as_ref(), &language, buffer.text(), origin)
		} else {
			None
		};

		let tx = match self.breaker.line_break(buffer.text(), origin) {
			Ok(tx) => tx,
			Err(e) => {
				tracing::warn!(error = %e, "line break could not be built");
				return BreakOutcome::Passthrough;
			}
		};
		if let Err(e) = buffer.apply(&tx, Bias::Right) {
			tracing::warn!(error = %e, "line break could not be applied");
			return BreakOutcome::Passthrough;
		}

		if !buffer.is_active() {
			return BreakOutcome::Passthrough;
		}

		let brk = LineBreak {
			origin,
			cursor: buffer.cursor(),
			span: span.map(|s| s.map(&tx)),
		};
		let decision = match self.syntax.classify(&language, buffer.text()) {
			Ok(map) => decide(&language, &self.options, buffer.text(), &map, &brk),
			Err(e) => {
				tracing::trace!(error = %e, "post-break classification failed");
				ContinuationDecision::default()
			}
		};
		let comment_below = decision.comment_below;

		let outcome = match self.apply(buffer, decision) {
			Ok(outcome) => outcome,
			Err(e) => {
				tracing::warn!(error = %e, "comment continuation failed");
				BreakOutcome::Passthrough
			}
		};

		match &outcome {
			BreakOutcome::Passthrough => {
				if let Some(prefix) = armed {
					match retract(buffer, &prefix) {
						Ok(true) => return BreakOutcome::Retracted,
						Ok(false) => {}
						Err(e) => tracing::warn!(error = %e, "retraction failed"),
					}
				}
			}
			BreakOutcome::Continued { prefix } if self.options.cancel_after && !comment_below => {
				buffer.cancel.arm(prefix.trim());
			}
			_ => {}
		}

		outcome
	}

	/// Applies a decision, consuming it.
	fn apply(&self, buffer: &mut Buffer, decision: ContinuationDecision) -> Result<BreakOutcome, EditError> {
		if !decision.should_continue {
			return Ok(BreakOutcome::Passthrough);
		}

		if decision.c_like_block {
			let Some(span) = decision.span else {
				return Ok(BreakOutcome::Passthrough);
			};
			continue_block(buffer, span, self.indenter.as_ref(), &self.options)?;
			tracing::debug!(cursor = buffer.cursor(), "continued block comment");
			return Ok(BreakOutcome::Block);
		}

		let (Some(prefix), Some(column)) = (decision.chosen_prefix, decision.align_column) else {
			return Ok(BreakOutcome::Passthrough);
		};
		let inserted = continue_line(buffer, &prefix, column, &self.options)?;
		tracing::debug!(prefix = %prefix, column, "continued line comment");
		Ok(BreakOutcome::Continued { prefix: inserted })
	}
}
