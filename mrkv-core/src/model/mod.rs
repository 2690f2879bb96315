//! Top-level module for the word-level Markov chain.
//!
//! This module provides:
//! - State keys and tokens with out-of-band markers (`StateKey`, `Token`)
//! - Frequency distributions and the learned table (`Transition`, `Chain`)
//! - Corpus configuration and generation options (`CorpusConfig`, `GenerateOptions`)
//! - Batch construction from sentences (`Source`, `LoadReport`)
//! - The weighted random walk (`Generator`)
//! - The high-level entry points (`Corpus`, `SharedCorpus`, `Snapshot`)

/// `Start`/`End` markers kept outside the word space.
pub mod token;

/// Literal or regex delimiter, used to split text and to stop generation.
pub mod pattern;

/// Frequency distribution of the tokens following one state.
///
/// Supports accumulation, merging and weighted sampling.
pub mod transition;

/// State -> transition table with merge and binary cache support.
pub mod chain;

/// Corpus settings and per-call generation options.
pub mod config;

/// Sentence normalization and windowing into batch chains.
///
/// Not exposed beyond the input and report types.
pub mod builder;

/// Weighted random walk producing one sentence.
pub mod generator;

/// Configured chain: load, generate, inspect.
pub mod corpus;

/// Lock-guarded corpus handle for concurrent callers.
pub mod shared;

/// Diagnostic structural view of a corpus.
pub mod snapshot;
