use std::path::Path;

use reel_core::ItemId;

/// Whether an item was already fully processed by a previous run.
///
/// The output tree itself is the durable processed-set: a genuine id counts
/// as processed iff its per-item directory exists. No separate index is
/// maintained. Placeholders are never resumable.
pub fn is_already_processed(id: &ItemId, output_base: &Path) -> bool {
    match id {
        ItemId::Placeholder(_) => false,
        ItemId::Genuine(value) => output_base.join(value).is_dir(),
    }
}
