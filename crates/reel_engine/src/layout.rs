use std::fs;
use std::io;
use std::path::PathBuf;

/// Directory raw downloads land in before relocation.
pub const STAGING_DIR_NAME: &str = "temp_videos";

/// On-disk layout for one site's harvest output.
///
/// Staging, per-item output directories and the run summary all hang off
/// `{download_base}/{site}`.
#[derive(Debug, Clone)]
pub struct HarvestLayout {
    download_base: PathBuf,
    site: String,
}

impl HarvestLayout {
    pub fn new(download_base: impl Into<PathBuf>, site: impl Into<String>) -> Self {
        Self {
            download_base: download_base.into(),
            site: site.into(),
        }
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    /// `{download_base}/{site}` - the base every per-item directory lives in.
    pub fn site_dir(&self) -> PathBuf {
        self.download_base.join(&self.site)
    }

    /// `{download_base}/{site}/temp_videos` - where in-progress downloads land.
    pub fn staging_dir(&self) -> PathBuf {
        self.site_dir().join(STAGING_DIR_NAME)
    }

    /// `{download_base}/{site}/{id}` - the durable per-item directory.
    pub fn item_dir(&self, id: &str) -> PathBuf {
        self.site_dir().join(id)
    }

    /// Creates the site and staging directories if absent.
    pub fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(self.staging_dir())
    }
}
