use std::collections::HashMap;

/// Suffixes browsers append to files that are still being written.
pub const IN_PROGRESS_SUFFIXES: &[&str] = &[".crdownload", ".part", ".download", ".tmp"];

/// True when `name` carries a suffix used for in-flight downloads.
pub fn has_in_progress_suffix(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    IN_PROGRESS_SUFFIXES
        .iter()
        .any(|suffix| lower.ends_with(suffix))
}

/// One `(name, size)` pair from a staging directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileObservation {
    pub name: String,
    pub size_bytes: u64,
}

impl FileObservation {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }
}

#[derive(Debug, Clone)]
struct TrackedFile {
    size_bytes: u64,
    stable_observations: u32,
    last_seen_millis: u64,
}

/// Decides when a file in the staging directory has finished downloading.
///
/// Fed one directory listing per poll. A file is promoted once its size has
/// held steady, and nonzero, for `stability_threshold` consecutive polls;
/// any size change resets the count. Entries not seen within the eviction
/// window are dropped from tracking, never from disk.
#[derive(Debug)]
pub struct StagingTracker {
    entries: HashMap<String, TrackedFile>,
    stability_threshold: u32,
    eviction_window_millis: u64,
}

impl StagingTracker {
    pub fn new(stability_threshold: u32, eviction_window_millis: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stability_threshold,
            eviction_window_millis,
        }
    }

    /// Applies one poll's directory listing and returns the name of the
    /// first file promoted as complete, if any. A promoted name leaves
    /// tracking so it cannot be promoted twice.
    pub fn observe(&mut self, listing: &[FileObservation], now_millis: u64) -> Option<String> {
        let mut promoted: Option<String> = None;

        for obs in listing {
            if has_in_progress_suffix(&obs.name) {
                // Still being written by the browser; accrued stability is void.
                let entry = self
                    .entries
                    .entry(obs.name.clone())
                    .or_insert(TrackedFile {
                        size_bytes: obs.size_bytes,
                        stable_observations: 0,
                        last_seen_millis: now_millis,
                    });
                entry.size_bytes = obs.size_bytes;
                entry.stable_observations = 0;
                entry.last_seen_millis = now_millis;
                continue;
            }

            match self.entries.get_mut(&obs.name) {
                None => {
                    let stable_observations = u32::from(obs.size_bytes > 0);
                    self.entries.insert(
                        obs.name.clone(),
                        TrackedFile {
                            size_bytes: obs.size_bytes,
                            stable_observations,
                            last_seen_millis: now_millis,
                        },
                    );
                    if promoted.is_none()
                        && obs.size_bytes > 0
                        && stable_observations >= self.stability_threshold
                    {
                        promoted = Some(obs.name.clone());
                    }
                }
                Some(entry) => {
                    entry.last_seen_millis = now_millis;
                    if entry.size_bytes == obs.size_bytes && obs.size_bytes > 0 {
                        entry.stable_observations += 1;
                        if promoted.is_none()
                            && entry.stable_observations >= self.stability_threshold
                        {
                            promoted = Some(obs.name.clone());
                        }
                    } else {
                        entry.size_bytes = obs.size_bytes;
                        entry.stable_observations = 0;
                    }
                }
            }
        }

        if let Some(name) = &promoted {
            self.entries.remove(name);
        }
        self.evict_stale(now_millis);
        promoted
    }

    /// Number of files currently under observation.
    pub fn tracked_len(&self) -> usize {
        self.entries.len()
    }

    fn evict_stale(&mut self, now_millis: u64) {
        let window = self.eviction_window_millis;
        self.entries
            .retain(|_, entry| now_millis.saturating_sub(entry.last_seen_millis) <= window);
    }
}
