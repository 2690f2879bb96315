use mrkv_core::io::list_stems;
use mrkv_core::{Corpus, CorpusConfig, GenerateOptions, Pattern, Start};

const SAMPLE: &str = "The cat sat on the mat. The dog sat on the rug. \
	The cat chased the dog around the garden. The dog chased the ball. \
	A bird sat on the fence and watched the cat. The bird flew over the garden.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	// Two previous words are considered for the next word,
	// lines starting with '#' are ignored and everything is lowercased
	let config = CorpusConfig::default()
		.with_state_length(2)?
		.with_filter(|sentence| !sentence.trim_start().starts_with('#'))
		.with_replace(|sentence| sentence.to_lowercase());
	let mut corpus = Corpus::new(config.clone())?;

	// Load every .txt from the "data" directory (one sentence per line),
	// a binary cache is written next to each file
	let names = list_stems("./data", "txt").unwrap_or_default();
	for name in &names {
		let partial = Corpus::open_cached(format!("./data/{name}.txt"), config.clone())?;
		corpus.merge(&partial)?;
	}

	// Fallback to a built-in text, split on ". "
	if corpus.size() == 0 {
		let report = corpus.load(SAMPLE)?;
		println!("Sample text: {} sentences learned, {} skipped", report.learned, report.skipped);
	} else {
		println!("Loaded: {}", corpus.sources().join(", "));
	}
	println!("{} states", corpus.size());

	// Generate 10 sentences from the beginning of a sentence
	let options = GenerateOptions::default().with_max_length(Some(40))?;
	for i in 0..10 {
		println!("Generated sentence {}: {}", i + 1, corpus.generate(&options));
	}

	// Start from a phrase, the phrase is kept in the output
	let options = GenerateOptions::default().with_start(Start::from("once upon a time the cat"));
	println!("Seeded: {}", corpus.generate(&options));

	// Stop at the first word ending with a comma or a period
	let options = GenerateOptions::default().with_terminator(Some(Pattern::regex(r"[,.]$")?));
	println!("Short: {}", corpus.generate(&options));

	// A phrase shorter than the state length gives an empty string
	let options = GenerateOptions::default().with_start("cat");
	println!("Too short start: {:?}", corpus.generate(&options));

	Ok(())
}
