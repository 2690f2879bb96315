use std::fmt;

use regex::Regex;

use crate::error::{CorpusError, Result};

/// Default sentence splitter: a period followed by whitespace.
pub const DEFAULT_SPLITTER: &str = r"\.\s+";

/// Default generation terminator: a token ending with a period.
pub const DEFAULT_TERMINATOR: &str = r"\.\s*?$";

/// Delimiter used both to split text into sentences and to detect
/// a terminating token during generation.
///
/// - `Literal` splits on an exact substring and matches tokens ending with it.
/// - `Regex` splits on every match and matches tokens where the pattern is found.
#[derive(Clone, Debug)]
pub enum Pattern {
	Literal(String),
	Regex(Regex),
}

impl Pattern {
	/// Creates a literal pattern.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `literal` is empty.
	pub fn literal(literal: impl Into<String>) -> Result<Self> {
		let literal = literal.into();
		if literal.is_empty() {
			return Err(CorpusError::invalid("literal pattern cannot be empty"));
		}
		Ok(Self::Literal(literal))
	}

	/// Compiles a regular expression pattern.
	pub fn regex(source: &str) -> Result<Self> {
		Ok(Self::Regex(Regex::new(source)?))
	}

	pub fn default_splitter() -> Self {
		// Constant pattern, always compiles
		Self::Regex(Regex::new(DEFAULT_SPLITTER).expect("default splitter is a valid regex"))
	}

	pub fn default_terminator() -> Self {
		Self::Regex(Regex::new(DEFAULT_TERMINATOR).expect("default terminator is a valid regex"))
	}

	/// Splits `text` on every occurrence of the pattern.
	pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
		match self {
			Self::Literal(literal) => text.split(literal.as_str()).collect(),
			Self::Regex(regex) => regex.split(text).collect(),
		}
	}

	/// Whether `token` ends a generated sentence.
	pub fn terminates(&self, token: &str) -> bool {
		match self {
			Self::Literal(literal) => token.ends_with(literal.as_str()),
			Self::Regex(regex) => regex.is_match(token),
		}
	}
}

impl fmt::Display for Pattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(literal) => write!(f, "{literal:?}"),
			Self::Regex(regex) => write!(f, "/{}/", regex.as_str()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_splitter_cuts_on_period_and_space() {
		let parts = Pattern::default_splitter().split("One two. Three four.\nFive.");
		assert_eq!(parts, vec!["One two", "Three four", "Five."]);
	}

	#[test]
	fn literal_splitter_cuts_on_substring() {
		let pattern = Pattern::literal("|").unwrap();
		assert_eq!(pattern.split("a b|c d"), vec!["a b", "c d"]);
		assert!(pattern.terminates("end|"));
		assert!(!pattern.terminates("|end"));
	}

	#[test]
	fn default_terminator_matches_trailing_period() {
		let pattern = Pattern::default_terminator();
		assert!(pattern.terminates("sat."));
		assert!(!pattern.terminates("e.g"));
		assert!(!pattern.terminates("word"));
	}

	#[test]
	fn invalid_patterns_are_invalid_arguments() {
		assert!(Pattern::literal("").unwrap_err().is_invalid_argument());
		assert!(Pattern::regex("(").unwrap_err().is_invalid_argument());
	}

	#[test]
	fn display_describes_the_pattern() {
		assert_eq!(Pattern::default_splitter().to_string(), r"/\.\s+/");
		assert_eq!(Pattern::literal("|").unwrap().to_string(), "\"|\"");
	}
}
