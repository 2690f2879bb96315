use rand::Rng;

use serde::{Deserialize, Serialize};

use super::token::Token;

/// Frequency distribution of the tokens observed after one state.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Invariants
/// - `total` is the sum of all counts in `cumulative`
/// - Each token appears at most once, with a count >= 1
/// - Once merged into a chain, `cumulative` is sorted by token
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Transition {
	total: u64,
	/// Example: [("cat", 42), ("dog", 3), (End, 7)]
	cumulative: Vec<(Token, u64)>,
}

impl Transition {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sum of all observation counts.
	pub fn total(&self) -> u64 {
		self.total
	}

	/// Observed `(token, count)` pairs in scan order.
	pub fn cumulative(&self) -> &[(Token, u64)] {
		&self.cumulative
	}

	/// Number of times `token` was observed, 0 if never.
	pub fn count(&self, token: &Token) -> u64 {
		self.cumulative
			.iter()
			.find(|(t, _)| t == token)
			.map_or(0, |(_, count)| *count)
	}

	/// Records `count` more occurrences of `token`.
	///
	/// - If the token already exists, its count is increased.
	/// - Otherwise, a new pair is appended (order is restored by `sort`).
	pub fn add(&mut self, token: Token, count: u64) {
		if count == 0 {
			return;
		}
		match self.cumulative.iter_mut().find(|(t, _)| *t == token) {
			Some((_, existing)) => *existing += count,
			None => self.cumulative.push((token, count)),
		}
		self.total += count;
	}

	/// Restores the canonical token order.
	pub fn sort(&mut self) {
		self.cumulative.sort_by(|a, b| a.0.cmp(&b.0));
	}

	/// Merges another distribution for the same state into this one.
	///
	/// Counts are summed and the result is sorted.
	pub fn merge(&mut self, other: &Self) {
		for (token, count) in &other.cumulative {
			self.add(token.clone(), *count);
		}
		self.sort();
	}

	/// Selects the token whose cumulative range contains `draw`.
	///
	/// `draw` is expected in `[0, total)`. The first pair whose running sum
	/// reaches `draw` wins, so a draw of 0 always selects the first pair.
	///
	/// Returns `None` if no pair is reached (only possible on an
	/// inconsistent distribution).
	pub fn select(&self, draw: f64) -> Option<&Token> {
		let mut running = 0u64;
		for (token, count) in &self.cumulative {
			running += count;
			if running as f64 >= draw {
				return Some(token);
			}
		}
		None
	}

	/// Draws a token with a probability proportional to its count.
	///
	/// Returns `None` if the distribution is empty.
	pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Token> {
		if self.total == 0 {
			// Should not happen due to invariants, but kept for safety
			return None;
		}
		let draw = rng.random::<f64>() * self.total as f64;
		self.select(draw)
	}

	/// Builds a distribution without checking the invariants.
	#[cfg(test)]
	pub(crate) fn from_parts(total: u64, cumulative: Vec<(Token, u64)>) -> Self {
		Self { total, cumulative }
	}

	/// Checks that `total` matches the sum of the counts.
	pub fn is_consistent(&self) -> bool {
		self.total == self.cumulative.iter().map(|(_, count)| count).sum::<u64>()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> Transition {
		let mut transition = Transition::new();
		transition.add(Token::word("dog"), 1);
		transition.add(Token::End, 1);
		transition.add(Token::word("cat"), 2);
		transition.sort();
		transition
	}

	#[test]
	fn add_accumulates_counts_and_total() {
		let transition = sample();
		assert_eq!(transition.total(), 4);
		assert_eq!(transition.count(&Token::word("cat")), 2);
		assert_eq!(transition.count(&Token::word("bird")), 0);
		assert!(transition.is_consistent());
	}

	#[test]
	fn sort_puts_end_last() {
		let transition = sample();
		let tokens: Vec<&Token> = transition.cumulative().iter().map(|(t, _)| t).collect();
		assert_eq!(tokens, vec![&Token::word("cat"), &Token::word("dog"), &Token::End]);
	}

	#[test]
	fn select_scans_running_sum() {
		let transition = sample();
		assert_eq!(transition.select(0.0), Some(&Token::word("cat")));
		assert_eq!(transition.select(2.0), Some(&Token::word("cat")));
		assert_eq!(transition.select(2.5), Some(&Token::word("dog")));
		assert_eq!(transition.select(3.9), Some(&Token::End));
		assert_eq!(transition.select(4.5), None);
	}

	#[test]
	fn merge_sums_counts() {
		let mut left = sample();
		let mut right = Transition::new();
		right.add(Token::word("ant"), 3);
		right.add(Token::word("cat"), 1);
		left.merge(&right);

		assert_eq!(left.total(), 8);
		assert_eq!(left.count(&Token::word("cat")), 3);
		assert_eq!(left.cumulative()[0], (Token::word("ant"), 3));
		assert!(left.is_consistent());
	}

	#[test]
	fn empty_transition_never_picks() {
		assert_eq!(Transition::new().pick(&mut rand::rng()), None);
	}
}
