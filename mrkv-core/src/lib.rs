//! Word-level Markov chain text generation library.
//!
//! This crate provides:
//! - A frequency model of word sequences learned from sentences
//! - Cumulative merging of several loads into the same model
//! - Frequency-weighted random generation with configurable termination
//! - File loading with a binary cache, and a lock-guarded shared handle
//!
//! ```no_run
//! use mrkv_core::model::config::GenerateOptions;
//! use mrkv_core::model::corpus::Corpus;
//!
//! let corpus = Corpus::from_text("The cat sat on the mat. The dog sat on the rug.")?;
//! println!("{}", corpus.generate(&GenerateOptions::default()));
//! # Ok::<(), mrkv_core::error::CorpusError>(())
//! ```

/// Markov chain model, configuration and generation.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
pub mod io;

pub use error::{CorpusError, Result};
pub use model::builder::{LoadReport, Source};
pub use model::config::{CorpusConfig, GenerateOptions, Start};
pub use model::corpus::Corpus;
pub use model::pattern::Pattern;
pub use model::shared::SharedCorpus;
