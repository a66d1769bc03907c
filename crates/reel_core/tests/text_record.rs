use reel_core::compose_text_record;

#[test]
fn title_and_body_compose_record() {
    let record = compose_text_record(Some("Flood recovery"), Some("Crews worked overnight."), None);
    assert_eq!(
        record.as_deref(),
        Some("Title: Flood recovery\n\nCrews worked overnight.")
    );
}

#[test]
fn leading_duplicate_title_line_is_stripped() {
    let body = "Flood recovery\nCrews worked overnight.\nMore to come.";
    let record = compose_text_record(Some("Flood recovery"), Some(body), None);
    assert_eq!(
        record.as_deref(),
        Some("Title: Flood recovery\n\nCrews worked overnight.\nMore to come.")
    );
}

#[test]
fn body_is_cut_at_section_separator() {
    let body = "Main story text.\n\nSHOTLIST:\ninternal editorial notes";
    let record = compose_text_record(Some("T"), Some(body), Some("SHOTLIST:"));
    assert_eq!(record.as_deref(), Some("Title: T\n\nMain story text."));
}

#[test]
fn missing_title_falls_back_to_placeholder_line() {
    let record = compose_text_record(None, Some("Body only."), None);
    assert_eq!(record.as_deref(), Some("Title: N/A\n\nBody only."));
}

#[test]
fn missing_body_keeps_title_record() {
    let record = compose_text_record(Some("Just a title"), None, None);
    assert_eq!(record.as_deref(), Some("Title: Just a title\n\n"));
}

#[test]
fn nothing_available_skips_persistence() {
    assert_eq!(compose_text_record(None, None, None), None);
    assert_eq!(compose_text_record(Some("  "), Some(" \n "), None), None);
}
