use std::path::PathBuf;

use clap::Parser;

/// Harvests a bounded run of media items from a configured site.
#[derive(Debug, Parser)]
#[command(name = "reel", version, about = "Sequential media-item harvester")]
pub struct Cli {
    /// Site to harvest, as named in the profiles file.
    #[arg(long)]
    pub site: String,

    /// Maximum number of items to process this run.
    #[arg(long, default_value_t = 5)]
    pub limit: usize,

    /// Trigger the artifact download for each item.
    #[arg(long)]
    pub download: bool,

    /// RON file holding the per-site profiles.
    #[arg(long, default_value = "profiles.ron")]
    pub profiles: PathBuf,

    /// Base directory the per-site output trees live in.
    #[arg(long, default_value = "Download")]
    pub download_base: PathBuf,

    /// Base directory for debug captures.
    #[arg(long, default_value = "debug")]
    pub debug_base: PathBuf,

    /// Overrides the profile's entry URL for this run.
    #[arg(long)]
    pub entry_url: Option<String>,

    /// Seconds between staging-directory polls.
    #[arg(long, default_value_t = 2)]
    pub poll_interval_secs: u64,

    /// Consecutive unchanged-size polls before a download counts as done.
    #[arg(long, default_value_t = 5)]
    pub stability_threshold: u32,

    /// Seconds to wait for each item's artifact download to settle.
    #[arg(long, default_value_t = 2 * 60 * 60)]
    pub download_timeout_secs: u64,

    /// Seconds to wait for an item's detail view to become ready.
    #[arg(long, default_value_t = 30)]
    pub verify_timeout_secs: u64,

    /// Run the browser with a visible window instead of headless.
    #[arg(long)]
    pub headed: bool,
}
