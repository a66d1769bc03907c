use reel_core::ItemId;

#[test]
fn numeric_text_is_genuine() {
    let id = ItemId::from_raw(Some("1009"), 42);
    assert_eq!(id, ItemId::Genuine("1009".to_string()));
    assert!(id.is_genuine());
    assert_eq!(id.as_str(), "1009");
    assert_eq!(id.debug_bucket(), Some("1009"));
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    let id = ItemId::from_raw(Some("  20417 \n"), 42);
    assert_eq!(id, ItemId::Genuine("20417".to_string()));
}

#[test]
fn non_numeric_text_synthesizes_placeholder() {
    let id = ItemId::from_raw(Some("—"), 1_700_000_000_123);
    assert_eq!(
        id,
        ItemId::Placeholder("unknown_1700000000123".to_string())
    );
    assert!(!id.is_genuine());
    assert_eq!(id.debug_bucket(), None);
}

#[test]
fn empty_or_missing_text_synthesizes_placeholder() {
    assert!(!ItemId::from_raw(Some("   "), 7).is_genuine());
    assert!(!ItemId::from_raw(None, 7).is_genuine());
    assert_eq!(ItemId::from_raw(None, 7).as_str(), "unknown_7");
}

#[test]
fn mixed_digits_and_letters_are_not_genuine() {
    assert!(!ItemId::from_raw(Some("1009a"), 7).is_genuine());
    assert!(!ItemId::from_raw(Some("id-1009"), 7).is_genuine());
}
