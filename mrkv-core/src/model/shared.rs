use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::builder::{Builder, LoadReport, Source};
use super::config::GenerateOptions;
use super::corpus::Corpus;
use super::snapshot::Snapshot;
use crate::error::{CorpusError, Result};

/// Thread-safe handle on a `Corpus`.
///
/// - Loads are serialized behind the write lock. The batch is tokenized
///   before the lock is taken and merged in one step, so readers never
///   observe a partial merge.
/// - Generations share the read lock and run concurrently.
#[derive(Debug, Clone)]
pub struct SharedCorpus {
	inner: Arc<RwLock<Corpus>>,
}

impl SharedCorpus {
	pub fn new(corpus: Corpus) -> Self {
		Self { inner: Arc::new(RwLock::new(corpus)) }
	}

	fn read(&self) -> Result<RwLockReadGuard<'_, Corpus>> {
		self.inner.read().map_err(|_| CorpusError::LockPoisoned)
	}

	fn write(&self) -> Result<RwLockWriteGuard<'_, Corpus>> {
		self.inner.write().map_err(|_| CorpusError::LockPoisoned)
	}

	/// Loads a source into the shared corpus.
	///
	/// # Errors
	/// Returns `StateLengthMismatch` if the corpus was replaced by one with
	/// another window width while the batch was being built.
	pub fn load<S: Into<Source>>(&self, source: S) -> Result<LoadReport> {
		let config = self.read()?.config().clone();
		let builder = Builder::new(&config);
		let sentences = builder.sentences(source.into());
		let (batch, report) = builder.build(&sentences)?;
		self.write()?.merge_batch(&batch, report)
	}

	/// Asynchronous flavour of `load`, with identical results.
	pub async fn load_async<S: Into<Source>>(&self, source: S) -> Result<LoadReport> {
		self.load(source)
	}

	/// Swaps the whole corpus.
	pub fn replace(&self, corpus: Corpus) -> Result<()> {
		*self.write()? = corpus;
		Ok(())
	}

	pub fn generate(&self, options: &GenerateOptions) -> Result<String> {
		Ok(self.read()?.generate(options))
	}

	pub fn size(&self) -> Result<usize> {
		Ok(self.read()?.size())
	}

	pub fn sources(&self) -> Result<Vec<String>> {
		Ok(self.read()?.sources().to_vec())
	}

	pub fn snapshot(&self) -> Result<Snapshot> {
		Ok(self.read()?.snapshot())
	}
}

#[cfg(test)]
mod tests {
	use std::thread;

	use super::*;
	use crate::model::config::CorpusConfig;

	#[test]
	fn concurrent_loads_are_all_merged() {
		let shared = SharedCorpus::new(Corpus::new(CorpusConfig::default()).unwrap());

		thread::scope(|scope| {
			for i in 0..8 {
				let shared = shared.clone();
				scope.spawn(move || {
					shared.load(vec![format!("worker {i} says hello")]).unwrap();
				});
			}
		});

		let snapshot = shared.snapshot().unwrap();
		assert_eq!(snapshot.data["[START]"].total, 8);
		assert!(shared.read().unwrap().chain().is_consistent());
	}

	#[test]
	fn generation_reads_the_shared_corpus() {
		let shared = SharedCorpus::new(Corpus::new(CorpusConfig::default()).unwrap());
		shared.load("the cat sat.").unwrap();
		assert_eq!(shared.generate(&GenerateOptions::default()).unwrap(), "the cat sat.");
		assert_eq!(shared.size().unwrap(), 3);
	}

	#[test]
	fn replace_swaps_the_configuration() {
		let shared = SharedCorpus::new(Corpus::new(CorpusConfig::default()).unwrap());
		let wider = CorpusConfig::default().with_state_length(3).unwrap();
		shared.replace(Corpus::new(wider).unwrap()).unwrap();
		shared.load("one two three four.").unwrap();
		assert_eq!(shared.read().unwrap().chain().state_length(), 3);
	}
}
