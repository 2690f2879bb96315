use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info};
use rand::Rng;

use super::builder::{Builder, LoadReport, Source};
use super::chain::Chain;
use super::config::{CorpusConfig, GenerateOptions};
use super::generator::Generator;
use super::snapshot::Snapshot;
use crate::error::{CorpusError, Result};
use crate::io::{build_output_path, get_filename, read_file};

/// A configured word-level Markov chain and the operations around it.
///
/// This struct manages:
/// - `config`: how sentences are split, filtered, rewritten and windowed.
/// - `chain`: the learned state -> transition table.
/// - `sources`: names of the files loaded into the chain.
///
/// Every load merges a fully built batch into the chain, generation only
/// reads it.
#[derive(Debug, Clone)]
pub struct Corpus {
	config: CorpusConfig,
	chain: Chain,
	sources: Vec<String>,
}

impl Corpus {
	/// Creates an empty corpus.
	pub fn new(config: CorpusConfig) -> Result<Self> {
		let chain = Chain::new(config.state_length())?;
		Ok(Self { config, chain, sources: Vec::new() })
	}

	/// Creates a corpus with the default configuration and loads a text block.
	pub fn from_text(text: &str) -> Result<Self> {
		let mut corpus = Self::new(CorpusConfig::default())?;
		corpus.load(text)?;
		Ok(corpus)
	}

	/// Creates a corpus with the default configuration and loads sentences.
	pub fn from_sentences<I, S>(sentences: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut corpus = Self::new(CorpusConfig::default())?;
		corpus.load(Source::Sentences(sentences.into_iter().map(Into::into).collect()))?;
		Ok(corpus)
	}

	/// Wraps an already built chain.
	///
	/// # Errors
	/// Returns `StateLengthMismatch` if the chain was built with another
	/// window width than `config`.
	pub fn with_chain(config: CorpusConfig, chain: Chain) -> Result<Self> {
		if config.state_length() != chain.state_length() {
			return Err(CorpusError::StateLengthMismatch {
				expected: config.state_length(),
				found: chain.state_length(),
			});
		}
		Ok(Self { config, chain, sources: Vec::new() })
	}

	/// Opens the corpus file `filepath`, using a
	/// binary cache next to it when present.
	///
	/// - The cache is `<stem>.<state_length>.bin` in the same folder.
	/// - Without cache, the text file is loaded with `load_file` and the
	///   resulting chain is written to the cache for the next call.
	///
	/// # Notes
	/// The cache does not track the filter, replace or splitter settings:
	/// delete it after changing them.
	pub fn open_cached<P: AsRef<Path>>(filepath: P, config: CorpusConfig) -> Result<Self> {
		let extension = format!("{}.bin", config.state_length());
		let cache_path = build_output_path(&filepath, &extension)?;

		let mut corpus = if cache_path.exists() {
			debug!("reading chain cache {}", cache_path.display());
			let bytes = std::fs::read(&cache_path)?;
			Self::with_chain(config, Chain::from_bytes(&bytes)?)?
		} else {
			let mut corpus = Self::new(config)?;
			corpus.load_file(&filepath)?;
			std::fs::write(&cache_path, corpus.chain.to_bytes()?)?;
			debug!("wrote chain cache {}", cache_path.display());
			corpus
		};

		corpus.sources.push(get_filename(&filepath)?);
		Ok(corpus)
	}

	pub fn config(&self) -> &CorpusConfig {
		&self.config
	}

	pub fn chain(&self) -> &Chain {
		&self.chain
	}

	/// Number of distinct learned states, `Start` included.
	pub fn size(&self) -> usize {
		self.chain.len()
	}

	/// Names of the files loaded into this corpus, in load order.
	pub fn sources(&self) -> &[String] {
		&self.sources
	}

	/// Loads a text block or a list of sentences.
	///
	/// The batch is built in full before being merged, then every touched
	/// transition is re-sorted. Loading in several calls gives the same
	/// counts as one call with the concatenated input.
	pub fn load<S: Into<Source>>(&mut self, source: S) -> Result<LoadReport> {
		let builder = Builder::new(&self.config);
		let sentences = builder.sentences(source.into());
		let (batch, report) = builder.build(&sentences)?;
		self.merge_batch(&batch, report)
	}

	/// Asynchronous flavour of `load`, with identical results.
	pub async fn load_async<S: Into<Source>>(&mut self, source: S) -> Result<LoadReport> {
		self.load(source)
	}

	/// Loads a newline-delimited file, one sentence per line.
	///
	/// # Behavior
	/// - Splits the lines into chunks (based on CPU cores * factor).
	/// - Builds a partial chain per chunk on scoped threads.
	/// - Merges all partial chains sequentially.
	///
	/// The result is the same as `load` with the list of lines.
	pub fn load_file<P: AsRef<Path>>(&mut self, filepath: P) -> Result<LoadReport> {
		let lines = read_file(&filepath)?;
		let builder = Builder::new(&self.config);
		let sentences = builder.sentences(Source::Sentences(lines));
		if sentences.is_empty() {
			return Ok(LoadReport::default());
		}

		let chunks = num_cpus::get() * 8;
		let chunk_size = sentences.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		let config = &self.config;
		thread::scope(|scope| {
			for chunk in sentences.chunks(chunk_size) {
				let tx = tx.clone();
				scope.spawn(move || {
					// The receiver outlives the scope, sending cannot fail
					let _ = tx.send(Builder::new(config).build(chunk));
				});
			}
		});
		drop(tx);

		let mut batch = Chain::new(self.config.state_length())?;
		let mut report = LoadReport::default();
		for partial in rx.iter() {
			let (partial_chain, partial_report) = partial?;
			batch.merge(&partial_chain)?;
			report.absorb(partial_report);
		}

		info!(
			"loaded {} ({} sentences learned, {} skipped)",
			filepath.as_ref().display(),
			report.learned,
			report.skipped
		);
		self.merge_batch(&batch, report)
	}

	/// Merges another corpus' chain and sources into this one.
	///
	/// # Errors
	/// Returns `StateLengthMismatch` if the window widths differ.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		self.chain.merge(&other.chain)?;
		self.sources.extend(other.sources.iter().cloned());
		Ok(())
	}

	/// Merges a batch built for this corpus' configuration.
	pub(crate) fn merge_batch(&mut self, batch: &Chain, report: LoadReport) -> Result<LoadReport> {
		let before = self.chain.len();
		self.chain.merge(batch)?;
		debug!(
			"merged batch: {} learned, {} skipped, {} new states",
			report.learned,
			report.skipped,
			self.chain.len() - before
		);
		Ok(report)
	}

	/// Generates one sentence using the thread-local random generator.
	pub fn generate(&self, options: &GenerateOptions) -> String {
		self.generate_with_rng(options, &mut rand::rng())
	}

	/// Generates one sentence drawing from `rng`.
	///
	/// For a fixed chain and a fixed sequence of draws the output is fully
	/// deterministic.
	pub fn generate_with_rng<R: Rng + ?Sized>(&self, options: &GenerateOptions, rng: &mut R) -> String {
		Generator::new(&self.chain).generate(options, rng)
	}

	/// Structural snapshot for inspection.
	pub fn snapshot(&self) -> Snapshot {
		Snapshot::new(&self.config, &self.chain)
	}

	/// Snapshot rendered as pretty-printed JSON.
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(&self.snapshot())?)
	}
}
