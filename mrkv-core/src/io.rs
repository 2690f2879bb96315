use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads a text file and returns its lines, one sentence per line.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let contents = fs::read_to_string(filename)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Builds a sibling path: the input's stem followed by a new extension.
///
/// Examples:
/// - `data/input.txt` + `"2.bin"` → `data/input.2.bin`
/// - `data/tales.cats.txt` + `"2.bin"` → `data/tales.cats.2.bin`
pub fn build_output_path<P: AsRef<Path>>(input_path: P, output_extension: &str) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	Ok(parent.join(format!("{}.{output_extension}", file_stem.to_string_lossy())))
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/fables.txt"` → `"fables"`
/// - `"fables.txt"` → `"fables"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().into_owned())
}

/// Lists the stems of the files with a given extension in a directory.
///
/// Subdirectories are ignored. Names are sorted.
pub fn list_stems<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut stems = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
			stems.push(get_filename(&path)?);
		}
	}

	stems.sort();
	Ok(stems)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn output_path_replaces_extension() {
		let path = build_output_path("data/fables.txt", "2.bin").unwrap();
		assert_eq!(path, PathBuf::from("data/fables.2.bin"));
		assert!(build_output_path("", "bin").is_err());
	}

	#[test]
	fn output_path_keeps_dotted_stems() {
		let cats = build_output_path("data/tales.cats.txt", "2.bin").unwrap();
		let dogs = build_output_path("data/tales.dogs.txt", "2.bin").unwrap();
		assert_eq!(cats, PathBuf::from("data/tales.cats.2.bin"));
		assert_eq!(dogs, PathBuf::from("data/tales.dogs.2.bin"));
	}

	#[test]
	fn filename_strips_folder_and_extension() {
		assert_eq!(get_filename("./data/fables.txt").unwrap(), "fables");
		assert_eq!(get_filename("fables").unwrap(), "fables");
	}

	#[test]
	fn stems_are_filtered_and_sorted() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("b.txt"), "b").unwrap();
		fs::write(dir.path().join("a.txt"), "a").unwrap();
		fs::write(dir.path().join("a.2.bin"), [0u8]).unwrap();
		fs::create_dir(dir.path().join("c.txt")).unwrap();

		assert_eq!(list_stems(dir.path(), "txt").unwrap(), vec!["a", "b"]);
	}

	#[test]
	fn lines_become_sentences() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("lines.txt");
		fs::write(&path, "first line\r\nsecond line\n").unwrap();
		assert_eq!(read_file(&path).unwrap(), vec!["first line", "second line"]);
	}
}
