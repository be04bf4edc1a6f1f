//! KDL parsing utilities shared across config modules.

use kdl::{KdlNode, KdlValue};

use crate::error::{ConfigError, Result};

/// Returns a human-readable name for a KDL value's type.
pub fn type_name(value: &KdlValue) -> &'static str {
	if value.as_bool().is_some() {
		"bool"
	} else if value.as_integer().is_some() {
		"int"
	} else if value.as_string().is_some() {
		"string"
	} else if value.is_null() {
		"null"
	} else {
		"float"
	}
}

/// Returns the positional arguments of `node`, skipping properties.
pub fn arguments(node: &KdlNode) -> impl Iterator<Item = &KdlValue> {
	node.entries()
		.iter()
		.filter(|entry| entry.name().is_none())
		.map(|entry| entry.value())
}

/// Returns the first argument of `node`, or `None` if it has none.
pub fn first_argument(node: &KdlNode) -> Option<&KdlValue> {
	arguments(node).next()
}

/// Reads every argument of `node` as a string.
///
/// # Errors
///
/// Returns [`ConfigError::OptionTypeMismatch`] for any non-string argument.
pub fn string_arguments(node: &KdlNode) -> Result<Vec<String>> {
	arguments(node)
		.map(|value| {
			value
				.as_string()
				.map(str::to_string)
				.ok_or_else(|| mismatch(node, "string", value))
		})
		.collect()
}

/// Reads the first argument of `node` as a bool.
///
/// # Errors
///
/// Returns [`ConfigError::MissingField`] without an argument and
/// [`ConfigError::OptionTypeMismatch`] for a non-bool one.
pub fn bool_argument(node: &KdlNode) -> Result<bool> {
	let value = required(node)?;
	value.as_bool().ok_or_else(|| mismatch(node, "bool", value))
}

/// Reads the first argument of `node` as an integer.
///
/// # Errors
///
/// Returns [`ConfigError::MissingField`] without an argument and
/// [`ConfigError::OptionTypeMismatch`] for a non-integer one.
pub fn integer_argument(node: &KdlNode) -> Result<i128> {
	let value = required(node)?;
	value.as_integer().ok_or_else(|| mismatch(node, "int", value))
}

/// Reads the first argument of `node` as a string.
///
/// # Errors
///
/// Returns [`ConfigError::MissingField`] without an argument and
/// [`ConfigError::OptionTypeMismatch`] for a non-string one.
pub fn string_argument(node: &KdlNode) -> Result<String> {
	let value = required(node)?;
	value
		.as_string()
		.map(str::to_string)
		.ok_or_else(|| mismatch(node, "string", value))
}

/// Suggests the closest of `known` to a misspelled `key`.
pub fn suggest(key: &str, known: &[&str]) -> Option<String> {
	known
		.iter()
		.min_by_key(|k| strsim::levenshtein(key, k))
		.filter(|k| strsim::levenshtein(key, k) <= 3)
		.map(|k| (*k).to_string())
}

fn required(node: &KdlNode) -> Result<&KdlValue> {
	first_argument(node).ok_or_else(|| ConfigError::MissingField(node.name().value().to_string()))
}

fn mismatch(node: &KdlNode, expected: &'static str, value: &KdlValue) -> ConfigError {
	ConfigError::OptionTypeMismatch {
		option: node.name().value().to_string(),
		expected,
		got: type_name(value),
	}
}

#[cfg(test)]
mod tests {
	use kdl::KdlDocument;

	use super::*;

	fn node(src: &str) -> KdlNode {
		let doc: KdlDocument = src.parse().unwrap();
		doc.nodes()[0].clone()
	}

	#[test]
	fn test_string_arguments_skip_properties() {
		let n = node(r##"tokens "//" key="x" "#""##);
		assert_eq!(string_arguments(&n).unwrap(), vec!["//", "#"]);
	}

	#[test]
	fn test_bool_argument_type_mismatch() {
		let n = node("keep-suffix 1");
		assert!(matches!(
			bool_argument(&n),
			Err(ConfigError::OptionTypeMismatch { expected: "bool", got: "int", .. })
		));
	}

	#[test]
	fn test_missing_argument() {
		let n = node("tab-width");
		assert!(matches!(integer_argument(&n), Err(ConfigError::MissingField(f)) if f == "tab-width"));
	}

	#[test]
	fn test_suggest() {
		let known = ["keep-suffix", "cancel-after"];
		assert_eq!(suggest("keep-sufix", &known).as_deref(), Some("keep-suffix"));
		assert_eq!(suggest("zzzzzzzzzz", &known), None);
	}
}
