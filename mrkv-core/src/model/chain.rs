use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::token::{StateKey, Token};
use super::transition::Transition;
use crate::error::{CorpusError, Result};

/// Word-level Markov chain: every state (window of `state_length` words,
/// or `Start`) mapped to the distribution of tokens that followed it.
///
/// # Responsibilities
/// - Accumulate observations for a batch of sentences
/// - Merge with another chain of the same `state_length`
/// - Provide deterministic (sorted) iteration over states
///
/// # Invariants
/// - `state_length` is always >= 1
/// - Every `Words` key holds exactly `state_length` words
/// - The `Start` transition never holds `End`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Chain {
	state_length: usize,
	states: BTreeMap<StateKey, Transition>,
}

impl Chain {
	/// Creates an empty chain with windows of `state_length` words.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `state_length < 1`.
	pub fn new(state_length: usize) -> Result<Self> {
		if state_length < 1 {
			return Err(CorpusError::invalid("state length must be >= 1"));
		}
		Ok(Self { state_length, states: BTreeMap::new() })
	}

	pub fn state_length(&self) -> usize {
		self.state_length
	}

	/// Number of distinct states, `Start` included.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	pub fn get(&self, key: &StateKey) -> Option<&Transition> {
		self.states.get(key)
	}

	/// Iterates over states in key order, `Start` first.
	pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &Transition)> {
		self.states.iter()
	}

	/// Records one occurrence of `token` after `key`.
	///
	/// Used while building a batch; the pair order is only canonical
	/// once the batch has been merged.
	pub(crate) fn observe(&mut self, key: StateKey, token: Token) {
		self.states.entry(key).or_default().add(token, 1);
	}

	#[cfg(test)]
	pub(crate) fn insert(&mut self, key: StateKey, transition: Transition) {
		self.states.insert(key, transition);
	}

	/// Merges another chain into this one.
	///
	/// # Notes
	/// - Both chains must have the same `state_length`.
	/// - Counts for matching states and tokens are summed.
	/// - Every touched transition is re-sorted by token.
	///
	/// # Errors
	/// Returns `StateLengthMismatch` if the window widths differ.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.state_length != other.state_length {
			return Err(CorpusError::StateLengthMismatch {
				expected: self.state_length,
				found: other.state_length,
			});
		}

		for (key, transition) in &other.states {
			if let Some(existing) = self.states.get_mut(key) {
				existing.merge(transition);
			} else {
				let mut transition = transition.clone();
				transition.sort();
				self.states.insert(key.clone(), transition);
			}
		}

		Ok(())
	}

	/// Checks `total == sum(counts)` for every state.
	pub fn is_consistent(&self) -> bool {
		self.states.values().all(Transition::is_consistent)
	}

	/// Encodes the chain in a compact binary form (postcard).
	///
	/// The layout is a cache format only and may change between versions.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		Ok(postcard::to_stdvec(self)?)
	}

	/// Decodes a chain produced by `to_bytes`.
	///
	/// # Errors
	/// Returns `Encoding` on malformed input and `InvalidArgument` if the
	/// decoded chain breaks the state length invariant.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		let chain: Self = postcard::from_bytes(bytes)?;
		if chain.state_length < 1 {
			return Err(CorpusError::invalid("decoded chain has a state length of 0"));
		}
		Ok(chain)
	}
}
