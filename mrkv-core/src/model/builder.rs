use log::trace;

use super::chain::Chain;
use super::config::CorpusConfig;
use super::token::{StateKey, Token};
use crate::error::Result;

/// Input of a load operation.
///
/// # Variants
/// - `Text`: a block of text, split into sentences by the configured splitter.
/// - `Sentences`: sentences already split by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
	Text(String),
	Sentences(Vec<String>),
}

impl From<&str> for Source {
	fn from(text: &str) -> Self {
		Self::Text(text.to_owned())
	}
}

impl From<String> for Source {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<Vec<String>> for Source {
	fn from(sentences: Vec<String>) -> Self {
		Self::Sentences(sentences)
	}
}

impl From<Vec<&str>> for Source {
	fn from(sentences: Vec<&str>) -> Self {
		Self::Sentences(sentences.into_iter().map(str::to_owned).collect())
	}
}

impl From<&[&str]> for Source {
	fn from(sentences: &[&str]) -> Self {
		Self::Sentences(sentences.iter().map(|s| (*s).to_owned()).collect())
	}
}

impl<const N: usize> From<[&str; N]> for Source {
	fn from(sentences: [&str; N]) -> Self {
		Self::from(&sentences[..])
	}
}

/// Outcome of a load operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
	/// Sentences that contributed observations.
	pub learned: usize,
	/// Sentences dropped (empty, filtered out or too short).
	pub skipped: usize,
}

impl LoadReport {
	pub(crate) fn absorb(&mut self, other: LoadReport) {
		self.learned += other.learned;
		self.skipped += other.skipped;
	}
}

/// Turns sentences into a batch chain, following a `CorpusConfig`.
///
/// The batch is a standalone `Chain` that the caller merges into its model,
/// so a half-built batch is never visible through the model.
pub(crate) struct Builder<'c> {
	config: &'c CorpusConfig,
}

impl<'c> Builder<'c> {
	pub(crate) fn new(config: &'c CorpusConfig) -> Self {
		Self { config }
	}

	/// Normalizes a source into sentences.
	///
	/// - Text is trimmed and split by the splitter.
	/// - The extra char is appended to every sentence not ending with it.
	pub(crate) fn sentences(&self, source: Source) -> Vec<String> {
		let sentences = match source {
			Source::Text(text) => self
				.config
				.splitter()
				.split(text.trim())
				.into_iter()
				.map(str::to_owned)
				.collect(),
			Source::Sentences(sentences) => sentences,
		};

		let extra_char = self.config.extra_char();
		sentences
			.into_iter()
			.map(|mut sentence| {
				if !extra_char.is_empty() && !sentence.ends_with(extra_char) {
					sentence.push_str(extra_char);
				}
				sentence
			})
			.collect()
	}

	/// Builds a batch chain from normalized sentences.
	pub(crate) fn build(&self, sentences: &[String]) -> Result<(Chain, LoadReport)> {
		let mut batch = Chain::new(self.config.state_length())?;
		let mut report = LoadReport::default();

		for sentence in sentences {
			if self.learn_sentence(&mut batch, sentence) {
				report.learned += 1;
			} else {
				report.skipped += 1;
			}
		}

		Ok((batch, report))
	}

	/// Adds the observations of one sentence to `batch`.
	///
	/// Returns `false` if the sentence was dropped.
	fn learn_sentence(&self, batch: &mut Chain, sentence: &str) -> bool {
		if sentence.is_empty() || !self.config.accepts(sentence) {
			return false;
		}

		let sentence = self.config.rewrite(sentence);
		let words: Vec<&str> = sentence.split_whitespace().collect();
		let state_length = self.config.state_length();

		// Not enough words for one window plus a follower
		if words.len() <= state_length {
			trace!("skipping short sentence {sentence:?}");
			return false;
		}

		batch.observe(StateKey::Start, Token::Word(words[..state_length].join(" ")));

		for i in state_length..words.len() {
			let key = StateKey::from_window(&words[i - state_length..i]);
			batch.observe(key, Token::word(words[i]));
		}

		let last = StateKey::from_window(&words[words.len() - state_length..]);
		batch.observe(last, Token::End);

		true
	}
}
