//! Languages available without a configuration file.

use crate::config::LanguageConfig;

/// Returns the built-in language table.
///
/// Configuration `language` blocks with the same name replace these entries.
pub fn builtin_languages() -> Vec<LanguageConfig> {
	vec![
		LanguageConfig::new("rust")
			.with_extensions(["rs"])
			.with_comment_tokens(["//"])
			.with_block_comment("/*", "*/")
			.with_nested_blocks(true)
			.with_char_literals(true),
		LanguageConfig::new("c")
			.with_extensions(["c", "h", "cc", "cpp", "hpp"])
			.with_comment_tokens(["//"])
			.with_block_comment("/*", "*/")
			.with_string_delimiters(['"', '\'']),
		LanguageConfig::new("javascript")
			.with_extensions(["js", "mjs", "cjs", "ts", "tsx", "jsx"])
			.with_comment_tokens(["//"])
			.with_block_comment("/*", "*/")
			.with_string_delimiters(['"', '\'', '`']),
		LanguageConfig::new("lua")
			.with_extensions(["lua"])
			.with_shebangs(["lua"])
			.with_comment_tokens(["--"])
			.with_block_comment("--[[", "]]")
			.with_string_delimiters(['"', '\'']),
		LanguageConfig::new("sql")
			.with_extensions(["sql"])
			.with_comment_tokens(["--"])
			.with_block_comment("/*", "*/")
			.with_string_delimiters(['\'']),
		LanguageConfig::new("haskell")
			.with_extensions(["hs"])
			.with_comment_tokens(["--"])
			.with_block_comment("{-", "-}")
			.with_nested_blocks(true),
		LanguageConfig::new("python")
			.with_extensions(["py", "pyi"])
			.with_shebangs(["python"])
			.with_comment_tokens(["#"])
			.with_string_delimiters(['"', '\'']),
		LanguageConfig::new("bash")
			.with_extensions(["sh", "bash", "zsh"])
			.with_filenames([".bashrc", ".zshrc"])
			.with_shebangs(["sh", "bash", "zsh"])
			.with_comment_tokens(["#"])
			.with_string_delimiters(['"', '\'']),
		LanguageConfig::new("toml")
			.with_extensions(["toml"])
			.with_filenames(["Cargo.lock"])
			.with_comment_tokens(["#"])
			.with_string_delimiters(['"', '\'']),
		LanguageConfig::new("lisp")
			.with_extensions(["el", "lisp", "scm"])
			.with_comment_tokens([";"]),
	]
}
