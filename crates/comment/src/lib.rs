// Library code reports through tracing; stderr belongs to the host.
#![deny(clippy::print_stderr)]

//! Comment continuation on line break.
//!
//! When the user breaks a line inside a comment, the [`Engine`] lets the
//! host's ordinary line break happen and then, if the comment should carry
//! on, writes the right comment leader on the new line:
//!
//! ```text
//! /// Frobnicates.|       /// Frobnicates.
//!                    ->   /// |
//!
//! /**|                    /**
//!                    ->    * |
//!                          */
//! ```
//!
//! # Architecture
//!
//! * [`span`]: finds the comment around the cursor before the break
//! * [`prefix`]: analyses the comment prefix of a single line
//! * [`decision`]: decides whether and how to continue
//! * [`format`]: edits the buffer according to a decision
//! * [`cancel`]: retracts a continuation the user did not want
//! * [`engine`]: runs the above for each line break
//!
//! Comment classification and block indentation come from
//! [`tern_language::SyntaxProvider`] and [`tern_language::Indenter`]; the
//! plain line break comes from [`LineBreaker`]. Each can be swapped for a
//! host implementation.

pub mod buffer;
pub mod cancel;
pub mod decision;
pub mod engine;
pub mod format;
pub mod host;
pub mod options;
pub mod prefix;
pub mod span;

pub use buffer::Buffer;
pub use cancel::{CancelState, Command};
pub use decision::{ContinuationDecision, LineBreak, decide};
pub use engine::{BreakOutcome, Engine};
pub use host::{CopyIndent, LineBreaker};
pub use options::{DEFAULT_INHIBIT_PREFIXES, DEFAULT_TAB_WIDTH, Options};
pub use prefix::{LinePrefix, classify_doc, column_of, extract_prefix, is_empty_comment, mutually_match};
pub use span::{CommentSpan, locate};
