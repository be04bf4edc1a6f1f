//! Engine options.

use std::collections::BTreeSet;

/// Prefixes that never continue when the comment is a single-line comment
/// outside a paragraph of doc comments.
pub const DEFAULT_INHIBIT_PREFIXES: [&str; 3] = ["//", "--", "#"];

/// Width of a tab when computing comment columns.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Tunables for comment continuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
	/// Trimmed prefixes for which plain single-line comments do not continue.
	pub inhibit_prefixes: BTreeSet<String>,
	/// Leave a block closer on the cursor line instead of moving it down.
	pub keep_suffix: bool,
	/// Retract a bare continuation line when the next command is another break.
	pub cancel_after: bool,
	pub tab_width: usize,
	/// Indent with tabs where possible.
	pub use_tabs: bool,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			inhibit_prefixes: DEFAULT_INHIBIT_PREFIXES.iter().map(|p| (*p).to_string()).collect(),
			keep_suffix: false,
			cancel_after: false,
			tab_width: DEFAULT_TAB_WIDTH,
			use_tabs: false,
		}
	}
}

impl Options {
	/// Returns true if continuation of `trimmed` is suppressed.
	pub fn is_inhibited(&self, trimmed: &str) -> bool {
		self.inhibit_prefixes.contains(trimmed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_inhibits_plain_line_comments() {
		let options = Options::default();
		assert!(options.is_inhibited("//"));
		assert!(options.is_inhibited("--"));
		assert!(options.is_inhibited("#"));
		assert!(!options.is_inhibited("///"));
		assert!(!options.is_inhibited(";"));
	}
}
