// Library code reports through tracing; stderr belongs to the host.
#![deny(clippy::print_stderr)]

//! Language comment syntax and lexical comment classification.
//!
//! # Architecture
//!
//! * [`config`]: per-language comment tokens and the registry that looks them up
//! * [`builtin`]: the language table available without any configuration
//! * [`scanner`]: a lexical scanner producing a [`CommentMap`] for a text snapshot
//! * [`syntax`]: the [`SyntaxProvider`] seam hosts implement to classify comments
//! * [`indent`]: the [`Indenter`] seam used to re-indent block comment lines
//!
//! The scanner knows nothing beyond the configured comment tokens and string
//! delimiters. Hosts with a real parse tree implement [`SyntaxProvider`] on top
//! of it instead.

pub mod builtin;
pub mod config;
pub mod indent;
pub mod scanner;
pub mod syntax;

pub use builtin::builtin_languages;
pub use config::{LanguageConfig, LanguageId, LanguageLoader};
pub use indent::{CommentIndenter, Indenter};
pub use scanner::{CommentKind, CommentMap, CommentScanner, CommentToken};
pub use syntax::{LexicalSyntax, SyntaxError, SyntaxProvider};
