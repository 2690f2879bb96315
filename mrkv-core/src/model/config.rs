use std::fmt;
use std::sync::Arc;

use super::pattern::Pattern;
use crate::error::{CorpusError, Result};

/// Hard cap on the number of tokens a single generation may produce.
pub const MAX_TOKENS: usize = 10_000;

/// Predicate deciding whether a candidate sentence is learned.
pub type Filter = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Transform applied to every accepted sentence before tokenization.
pub type Replace = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Construction-time settings of a corpus.
///
/// # Responsibilities
/// - Window width (`state_length`, default 2)
/// - Sentence splitter for text blocks (default: period followed by whitespace)
/// - Sentence filter (default: accept all) and replace (default: identity)
/// - Extra char appended to sentences missing it (default `"."`, empty disables)
///
/// Callbacks are shared (`Arc`) so the configuration can be cloned into
/// worker threads during a file load.
#[derive(Clone)]
pub struct CorpusConfig {
	state_length: usize,
	splitter: Pattern,
	filter: Filter,
	replace: Replace,
	extra_char: String,
}

impl Default for CorpusConfig {
	fn default() -> Self {
		Self {
			state_length: 2,
			splitter: Pattern::default_splitter(),
			filter: Arc::new(|_: &str| true),
			replace: Arc::new(|sentence: &str| sentence.to_owned()),
			extra_char: ".".to_owned(),
		}
	}
}

impl CorpusConfig {
	/// Sets the window width.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `state_length < 1`.
	pub fn with_state_length(mut self, state_length: usize) -> Result<Self> {
		if state_length < 1 {
			return Err(CorpusError::invalid("state length must be >= 1"));
		}
		self.state_length = state_length;
		Ok(self)
	}

	pub fn with_splitter(mut self, splitter: Pattern) -> Self {
		self.splitter = splitter;
		self
	}

	pub fn with_filter<F>(mut self, filter: F) -> Self
	where
		F: Fn(&str) -> bool + Send + Sync + 'static,
	{
		self.filter = Arc::new(filter);
		self
	}

	pub fn with_replace<F>(mut self, replace: F) -> Self
	where
		F: Fn(&str) -> String + Send + Sync + 'static,
	{
		self.replace = Arc::new(replace);
		self
	}

	pub fn with_extra_char(mut self, extra_char: impl Into<String>) -> Self {
		self.extra_char = extra_char.into();
		self
	}

	pub fn state_length(&self) -> usize {
		self.state_length
	}

	pub fn splitter(&self) -> &Pattern {
		&self.splitter
	}

	pub fn extra_char(&self) -> &str {
		&self.extra_char
	}

	pub(crate) fn accepts(&self, sentence: &str) -> bool {
		(self.filter)(sentence)
	}

	pub(crate) fn rewrite(&self, sentence: &str) -> String {
		(self.replace)(sentence)
	}
}

impl fmt::Debug for CorpusConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CorpusConfig")
			.field("state_length", &self.state_length)
			.field("splitter", &self.splitter.to_string())
			.field("extra_char", &self.extra_char)
			.finish_non_exhaustive()
	}
}

/// Where a generation starts.
///
/// # Variants
/// - `Marker`: the beginning of a learned sentence.
/// - `Phrase(String)`: a caller phrase; its words are kept in the output and
///   its last `state_length` words form the first lookup key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Start {
	#[default]
	Marker,
	Phrase(String),
}

impl From<&str> for Start {
	fn from(phrase: &str) -> Self {
		Self::Phrase(phrase.to_owned())
	}
}

impl From<String> for Start {
	fn from(phrase: String) -> Self {
		Self::Phrase(phrase)
	}
}

/// Per-call generation parameters.
#[derive(Clone, Debug)]
pub struct GenerateOptions {
	/// Starting point of the walk.
	pub start: Start,

	/// Maximum number of output tokens, `None` for the safety cap only.
	max_length: Option<usize>,

	/// Stops the walk once a produced token matches, `None` disables it.
	pub terminator: Option<Pattern>,
}

impl Default for GenerateOptions {
	fn default() -> Self {
		Self {
			start: Start::Marker,
			max_length: None,
			terminator: Some(Pattern::default_terminator()),
		}
	}
}

impl GenerateOptions {
	pub fn with_start(mut self, start: impl Into<Start>) -> Self {
		self.start = start.into();
		self
	}

	pub fn with_terminator(mut self, terminator: Option<Pattern>) -> Self {
		self.terminator = terminator;
		self
	}

	/// Sets the maximum output length in tokens.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `max_length` is `Some(0)`.
	pub fn with_max_length(mut self, max_length: Option<usize>) -> Result<Self> {
		if max_length == Some(0) {
			return Err(CorpusError::invalid("max length must be >= 1"));
		}
		self.max_length = max_length;
		Ok(self)
	}

	/// Effective bound, never above `MAX_TOKENS`.
	pub fn max_length(&self) -> usize {
		self.max_length.map_or(MAX_TOKENS, |max| max.min(MAX_TOKENS))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_documented_values() {
		let config = CorpusConfig::default();
		assert_eq!(config.state_length(), 2);
		assert_eq!(config.extra_char(), ".");
		assert!(config.accepts("anything"));
		assert_eq!(config.rewrite("same"), "same");
	}

	#[test]
	fn zero_state_length_is_invalid() {
		assert!(CorpusConfig::default().with_state_length(0).unwrap_err().is_invalid_argument());
	}

	#[test]
	fn callbacks_are_applied() {
		let config = CorpusConfig::default()
			.with_filter(|s| !s.starts_with('#'))
			.with_replace(|s| s.to_lowercase());
		assert!(!config.accepts("# comment"));
		assert_eq!(config.rewrite("The Cat"), "the cat");
	}

	#[test]
	fn max_length_is_capped() {
		let options = GenerateOptions::default();
		assert_eq!(options.max_length(), MAX_TOKENS);

		let options = options.with_max_length(Some(MAX_TOKENS * 2)).unwrap();
		assert_eq!(options.max_length(), MAX_TOKENS);

		let options = GenerateOptions::default().with_max_length(Some(3)).unwrap();
		assert_eq!(options.max_length(), 3);

		assert!(GenerateOptions::default().with_max_length(Some(0)).is_err());
	}
}
