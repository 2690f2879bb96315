use std::fmt;

use serde::{Deserialize, Serialize};

/// Lookup key of a transition table entry.
///
/// `Start` lives outside the word space, so a literal word such as
/// `"[START]"` can never collide with it.
///
/// ## Ordering
/// `Start` sorts before every `Words` key, words compare byte-wise.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StateKey {
	/// Beginning of a sentence.
	Start,
	/// `state_length` words joined by a single space.
	Words(String),
}

impl StateKey {
	/// Builds a key from a window of words.
	pub fn from_window<S: AsRef<str>>(window: &[S]) -> Self {
		let words: Vec<&str> = window.iter().map(AsRef::as_ref).collect();
		Self::Words(words.join(" "))
	}

	/// Words of the key, empty for `Start`.
	pub fn words(&self) -> Vec<&str> {
		match self {
			Self::Start => Vec::new(),
			Self::Words(key) => key.split(' ').collect(),
		}
	}

	pub fn is_start(&self) -> bool {
		matches!(self, Self::Start)
	}
}

impl fmt::Display for StateKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Start => f.write_str("[START]"),
			Self::Words(key) => f.write_str(key),
		}
	}
}

/// A value that can follow a state.
///
/// ## Ordering
/// `End` sorts after every `Word`, so a transition scan visits words first.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token {
	Word(String),
	/// End of a sentence. Never used as a state.
	End,
}

impl Token {
	pub fn word(word: impl Into<String>) -> Self {
		Self::Word(word.into())
	}

	pub fn as_word(&self) -> Option<&str> {
		match self {
			Self::Word(word) => Some(word),
			Self::End => None,
		}
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Word(word) => f.write_str(word),
			Self::End => f.write_str("[END]"),
		}
	}
}
