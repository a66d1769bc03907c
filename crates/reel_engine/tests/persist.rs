use std::fs;

use pretty_assertions::assert_eq;
use reel_engine::{ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn rewrite_of_same_item_replaces_previous_record() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer
        .write("1009.txt", "Title: Old cut\n\nfirst body")
        .unwrap();
    assert_eq!(first.file_name().unwrap(), "1009.txt");

    // A full re-run of the same id overwrites in place.
    let second = writer
        .write("1009.txt", "Title: New cut\n\nsecond body")
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(
        fs::read_to_string(&second).unwrap(),
        "Title: New cut\n\nsecond body"
    );
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("1009.txt", "data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("1009.txt").exists());
}
