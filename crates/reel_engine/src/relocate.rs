use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use reel_logging::reel_warn;

#[derive(Debug, Error)]
pub enum RelocateError {
    #[error("staging file vanished before relocation: {0:?}")]
    SourceMissing(PathBuf),
    #[error("could not move artifact to {target:?}: {source}")]
    Move {
        target: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Moves a completed download into `{output_base}/{item_id}/`, renamed to
/// the item id with the source's extension preserved.
///
/// On failure the source file is left where it was; the caller logs the
/// error and the run continues without the artifact.
pub fn relocate(
    source: &Path,
    item_id: &str,
    output_base: &Path,
) -> Result<PathBuf, RelocateError> {
    if !source.is_file() {
        return Err(RelocateError::SourceMissing(source.to_path_buf()));
    }

    let item_dir = output_base.join(item_id);
    let file_name = match source.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{item_id}.{ext}"),
        None => item_id.to_string(),
    };
    let target = item_dir.join(file_name);

    fs::create_dir_all(&item_dir).map_err(|err| RelocateError::Move {
        target: target.clone(),
        source: err,
    })?;

    if fs::rename(source, &target).is_err() {
        // Staging and output may sit on different filesystems.
        fs::copy(source, &target).map_err(|err| RelocateError::Move {
            target: target.clone(),
            source: err,
        })?;
        if let Err(err) = fs::remove_file(source) {
            reel_warn!("Artifact copied but staging copy remains at {source:?}: {err}");
        }
    }

    Ok(target)
}
