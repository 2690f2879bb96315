use std::collections::BTreeMap;

use serde::Serialize;

use super::chain::Chain;
use super::config::CorpusConfig;

/// Plain structural view of a corpus, for inspection and debugging.
///
/// Markers are rendered by their display names (`[START]`, `[END]`), so a
/// snapshot cannot be told apart from a chain holding those literal words.
/// It is diagnostic output, not an interchange format.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
	pub state_length: usize,
	pub splitter: String,
	pub extra_char: String,
	pub data: BTreeMap<String, TransitionSnapshot>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TransitionSnapshot {
	pub total: u64,
	pub cumulative: Vec<(String, u64)>,
}

impl Snapshot {
	pub(crate) fn new(config: &CorpusConfig, chain: &Chain) -> Self {
		let data = chain
			.iter()
			.map(|(key, transition)| {
				let cumulative = transition
					.cumulative()
					.iter()
					.map(|(token, count)| (token.to_string(), *count))
					.collect();
				(key.to_string(), TransitionSnapshot { total: transition.total(), cumulative })
			})
			.collect();

		Self {
			state_length: chain.state_length(),
			splitter: config.splitter().to_string(),
			extra_char: config.extra_char().to_owned(),
			data,
		}
	}
}
