use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Everything site-specific the pipeline needs, expressed as data.
///
/// Selector upkeep is operational configuration, not code; profiles are
/// loaded from a RON file by the operator binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteProfile {
    /// Search or listing URL the run starts from.
    pub entry_url: String,
    /// Element that signals the listing view is usable.
    pub listing_ready_selector: String,
    /// First item tile in the listing.
    pub first_item_selector: String,
    /// Element that signals one item's detail view is usable.
    pub detail_ready_selector: String,
    /// Element holding the source-assigned item identifier.
    pub id_selector: String,
    /// Attribute on `id_selector` holding the id; element text when absent.
    #[serde(default)]
    pub id_attribute: Option<String>,
    /// Element holding the item title.
    pub title_selector: String,
    /// Element holding the item's full text body.
    pub body_selector: String,
    /// Control that starts the artifact download.
    pub download_trigger_selector: String,
    /// Control that advances to the next item.
    pub next_item_selector: String,
    /// Marker after which body text is editorial noise and gets cut.
    #[serde(default)]
    pub section_separator: Option<String>,
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid entry url {url:?}: {source}")]
    InvalidEntryUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl SiteProfile {
    /// Validates the parts of the profile the pipeline depends on before a
    /// run starts.
    pub fn validate(&self) -> Result<(), ProfileError> {
        Url::parse(&self.entry_url).map_err(|source| ProfileError::InvalidEntryUrl {
            url: self.entry_url.clone(),
            source,
        })?;
        Ok(())
    }
}
