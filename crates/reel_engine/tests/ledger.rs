use std::fs;

use reel_core::ItemId;
use reel_engine::is_already_processed;
use tempfile::TempDir;

#[test]
fn existing_item_directory_means_processed() {
    let output = TempDir::new().unwrap();
    fs::create_dir_all(output.path().join("1009")).unwrap();

    let id = ItemId::from_raw(Some("1009"), 0);
    assert!(is_already_processed(&id, output.path()));
}

#[test]
fn absent_directory_means_unprocessed() {
    let output = TempDir::new().unwrap();
    let id = ItemId::from_raw(Some("1009"), 0);
    assert!(!is_already_processed(&id, output.path()));
}

#[test]
fn a_plain_file_is_not_a_processed_marker() {
    let output = TempDir::new().unwrap();
    fs::write(output.path().join("1009"), b"stray").unwrap();

    let id = ItemId::from_raw(Some("1009"), 0);
    assert!(!is_already_processed(&id, output.path()));
}

#[test]
fn placeholders_never_resume_even_with_matching_directory() {
    let output = TempDir::new().unwrap();
    let id = ItemId::placeholder(123);
    fs::create_dir_all(output.path().join(id.as_str())).unwrap();

    assert!(!is_already_processed(&id, output.path()));
}
