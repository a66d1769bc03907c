use std::fmt;

/// Title recorded when the detail view yields no readable title.
pub const UNKNOWN_TITLE: &str = "N/A";

/// Identifier for one harvested item.
///
/// A genuine id is the source-assigned numeric identifier read from the
/// detail view. When extraction fails or yields a non-numeric value, a
/// placeholder is synthesized instead. Placeholders never count as already
/// processed and are never used as a relocation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemId {
    Genuine(String),
    Placeholder(String),
}

impl ItemId {
    /// Builds an id from the raw text read off the page.
    ///
    /// Only a non-empty, all-ASCII-digit value is genuine; anything else
    /// yields a placeholder stamped with the supplied wall-clock millis.
    pub fn from_raw(raw: Option<&str>, now_millis: u64) -> Self {
        match raw.map(str::trim) {
            Some(value) if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => {
                ItemId::Genuine(value.to_string())
            }
            _ => Self::placeholder(now_millis),
        }
    }

    /// Synthesizes a placeholder id for an item whose identifier could not
    /// be extracted.
    pub fn placeholder(now_millis: u64) -> Self {
        ItemId::Placeholder(format!("unknown_{now_millis}"))
    }

    /// The directory and file key this id maps to on disk.
    pub fn as_str(&self) -> &str {
        match self {
            ItemId::Genuine(value) | ItemId::Placeholder(value) => value,
        }
    }

    /// True for source-assigned numeric identifiers.
    pub fn is_genuine(&self) -> bool {
        matches!(self, ItemId::Genuine(_))
    }

    /// Debug captures for genuine ids get a per-item bucket; placeholders
    /// share the general-errors bucket.
    pub fn debug_bucket(&self) -> Option<&str> {
        match self {
            ItemId::Genuine(value) => Some(value),
            ItemId::Placeholder(_) => None,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata extracted from one item's detail view. Materialized transiently
/// per loop iteration; only its derived artifacts are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMetadata {
    pub id: ItemId,
    pub title: String,
    pub sequence_index: usize,
}
