use crate::item::UNKNOWN_TITLE;

/// Composes the durable text record for one item.
///
/// Returns `None` only when both the title and the body are unavailable.
/// The body drops a leading duplicate of the title line and is cut at the
/// section-separator marker when one is configured and present.
pub fn compose_text_record(
    title: Option<&str>,
    body: Option<&str>,
    section_separator: Option<&str>,
) -> Option<String> {
    let title = title.map(str::trim).filter(|value| !value.is_empty());
    let body = body
        .map(|raw| clean_body(raw, title, section_separator))
        .filter(|value| !value.is_empty());

    if title.is_none() && body.is_none() {
        return None;
    }

    Some(format!(
        "Title: {}\n\n{}",
        title.unwrap_or(UNKNOWN_TITLE),
        body.unwrap_or_default()
    ))
}

fn clean_body(raw: &str, title: Option<&str>, section_separator: Option<&str>) -> String {
    let mut text = raw.trim().to_string();

    // Detail views commonly repeat the title as the first body line.
    if let Some(title) = title {
        let mut parts = text.splitn(2, '\n');
        let first = parts.next().unwrap_or("").trim();
        if first == title {
            text = parts.next().unwrap_or("").trim_start().to_string();
        }
    }

    if let Some(separator) = section_separator.filter(|marker| !marker.is_empty()) {
        if let Some(position) = text.find(separator) {
            text.truncate(position);
        }
    }

    text.trim().to_string()
}
