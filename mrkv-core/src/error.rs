use thiserror::Error;

/// Errors raised by corpus construction, loading and generation.
///
/// Generating from an unknown start is not an error: it yields an
/// empty string.
#[derive(Debug, Error)]
pub enum CorpusError {
	/// Malformed configuration or call argument.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// A splitter or terminator pattern failed to compile.
	#[error("invalid pattern: {0}")]
	Pattern(#[from] regex::Error),

	/// Two chains with different window widths cannot be combined.
	#[error("state length mismatch: expected {expected}, found {found}")]
	StateLengthMismatch { expected: usize, found: usize },

	/// A thread panicked while holding a shared corpus lock.
	#[error("corpus lock poisoned")]
	LockPoisoned,

	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// Binary chain cache could not be encoded or decoded.
	#[error("encoding error: {0}")]
	Encoding(#[from] postcard::Error),

	#[error("json error: {0}")]
	Json(#[from] serde_json::Error),
}

impl CorpusError {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		Self::InvalidArgument(message.into())
	}

	/// Whether the error comes from a bad caller-supplied value.
	pub fn is_invalid_argument(&self) -> bool {
		matches!(self, Self::InvalidArgument(_) | Self::Pattern(_))
	}
}

pub type Result<T> = std::result::Result<T, CorpusError>;
