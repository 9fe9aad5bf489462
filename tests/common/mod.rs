use std::fs;
use std::path::PathBuf;

/// Path to the test data directory.
pub fn fixture_dir() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.push("fixture");
    dir
}

/// Path to a file within the test data directory.
pub fn fixture_filename(filename: &str) -> String {
    let mut dir = fixture_dir();
    dir.push(filename);
    dir.to_str().unwrap().to_owned()
}

/// Loads a fixture file as a `String`.
pub fn fixture_as_string(resource: &str) -> String {
    fs::read_to_string(fixture_filename(resource)).unwrap()
}
