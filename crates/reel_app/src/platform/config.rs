use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use reel_engine::SiteProfile;

/// Loads the named site profile from the RON profiles file.
///
/// Selectors and entry URLs are volatile, site-specific data; keeping them
/// in an operator-editable file means selector churn never touches code.
pub fn load_site_profile(path: &Path, site: &str) -> anyhow::Result<SiteProfile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("could not read profiles file {path:?}"))?;
    let mut profiles: HashMap<String, SiteProfile> = ron::from_str(&content)
        .with_context(|| format!("could not parse profiles file {path:?}"))?;
    let Some(profile) = profiles.remove(site) else {
        bail!("no profile named {site:?} in {path:?}");
    };
    profile.validate()?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "ap": (
            entry_url: "https://videos.example.com/search?feed=world",
            listing_ready_selector: ".search-results",
            first_item_selector: ".search-results .tile a",
            detail_ready_selector: ".asset-detail",
            id_selector: ".asset-detail .asset-id",
            title_selector: ".asset-detail h1",
            body_selector: ".asset-detail .story-text",
            download_trigger_selector: ".asset-detail .download i",
            next_item_selector: ".asset-detail .pager-next",
            section_separator: Some("SHOTLIST:"),
        ),
    }"#;

    fn write_profiles(content: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profiles.ron");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_named_profile() {
        let (_dir, path) = write_profiles(SAMPLE);
        let profile = load_site_profile(&path, "ap").unwrap();
        assert_eq!(profile.title_selector, ".asset-detail h1");
        assert_eq!(profile.id_attribute, None);
        assert_eq!(profile.section_separator.as_deref(), Some("SHOTLIST:"));
    }

    #[test]
    fn unknown_site_is_an_error() {
        let (_dir, path) = write_profiles(SAMPLE);
        let err = load_site_profile(&path, "reuters").unwrap_err();
        assert!(err.to_string().contains("no profile named"));
    }

    #[test]
    fn invalid_entry_url_is_rejected() {
        let broken = SAMPLE.replace(
            "https://videos.example.com/search?feed=world",
            "not a url",
        );
        let (_dir, path) = write_profiles(&broken);
        assert!(load_site_profile(&path, "ap").is_err());
    }
}
