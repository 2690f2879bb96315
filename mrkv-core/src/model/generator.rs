use log::{trace, warn};
use rand::Rng;

use super::chain::Chain;
use super::config::{GenerateOptions, Start};
use super::token::{StateKey, Token};

/// Weighted random walk over a `Chain`.
///
/// # Responsibilities
/// - Resolve the starting key (`Start` marker or caller phrase)
/// - Draw each next token proportionally to its observed count
/// - Slide the window and stop on `End`, unknown state, max length or terminator
///
/// The generator only reads the chain, any number of them may walk the
/// same chain at once.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'m> {
	chain: &'m Chain,
}

impl<'m> Generator<'m> {
	pub fn new(chain: &'m Chain) -> Self {
		Self { chain }
	}

	/// Generates one sentence.
	///
	/// # Returns
	/// The produced words joined by single spaces. An unknown starting
	/// state yields an empty string.
	///
	/// # Notes
	/// - A phrase start keeps all of its words in the output, only the last
	///   `state_length` words are used as the first key.
	/// - The output never exceeds `options.max_length()` tokens, unless the
	///   starting phrase is already longer.
	pub fn generate<R: Rng + ?Sized>(&self, options: &GenerateOptions, rng: &mut R) -> String {
		let state_length = self.chain.state_length();
		let max_length = options.max_length();

		let (mut key, mut output) = match &options.start {
			Start::Marker => (StateKey::Start, Vec::new()),
			Start::Phrase(phrase) => {
				let words: Vec<&str> = phrase.split_whitespace().collect();
				if words.len() < state_length {
					trace!("start phrase {phrase:?} is shorter than the state length");
					return String::new();
				}
				let key = StateKey::from_window(&words[words.len() - state_length..]);
				if self.chain.get(&key).is_none() {
					trace!("start phrase {phrase:?} is not a known state");
					return String::new();
				}
				(key, words.into_iter().map(str::to_owned).collect::<Vec<_>>())
			}
		};

		while output.len() < max_length {
			let Some(transition) = self.chain.get(&key) else {
				break;
			};

			let word = match transition.pick(rng) {
				Some(Token::Word(word)) => word.clone(),
				Some(Token::End) => break,
				None => {
					warn!("state {key} has no selectable token (total {})", transition.total());
					break;
				}
			};
			trace!("{key} -> {word}");

			key = Self::next_key(&key, &word, state_length);
			let terminated = options
				.terminator
				.as_ref()
				.is_some_and(|terminator| terminator.terminates(&word));
			output.push(word);

			if terminated {
				break;
			}
		}

		output.join(" ")
	}

	/// Shifts the window: the key's words plus `word`, keeping the last
	/// `state_length` words.
	fn next_key(key: &StateKey, word: &str, state_length: usize) -> StateKey {
		let mut words = key.words();
		words.extend(word.split(' '));
		let from = words.len().saturating_sub(state_length);
		StateKey::from_window(&words[from..])
	}
}
