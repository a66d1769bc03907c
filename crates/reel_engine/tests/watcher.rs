use std::fs;
use std::time::Duration;

use reel_engine::{DownloadWatcher, WatchError, WatchSettings};
use tempfile::TempDir;

fn fast_settings(stability_threshold: u32) -> WatchSettings {
    WatchSettings {
        poll_interval: Duration::from_millis(10),
        stability_threshold,
        cleanup_margin: 3,
    }
}

#[tokio::test]
async fn promotes_a_stable_file() {
    let staging = TempDir::new().unwrap();
    fs::write(staging.path().join("1234_XYZ_HD.mp4"), vec![0u8; 1024]).unwrap();

    let watcher = DownloadWatcher::new(staging.path(), fast_settings(2));
    let path = watcher
        .await_completed(Duration::from_secs(2))
        .await
        .expect("stable file promoted");
    assert_eq!(path, staging.path().join("1234_XYZ_HD.mp4"));
}

#[tokio::test]
async fn in_progress_file_promotes_only_after_rename() {
    let staging = TempDir::new().unwrap();
    let part = staging.path().join("foo.part");
    fs::write(&part, vec![0u8; 512]).unwrap();

    let final_path = staging.path().join("foo.mp4");
    let rename_target = final_path.clone();
    let rename_source = part.clone();
    let rename = tokio::spawn(async move {
        // Let a few polls see only the in-progress name first.
        tokio::time::sleep(Duration::from_millis(60)).await;
        fs::rename(&rename_source, &rename_target).unwrap();
    });

    let watcher = DownloadWatcher::new(staging.path(), fast_settings(3));
    let promoted = watcher
        .await_completed(Duration::from_secs(5))
        .await
        .expect("renamed file promoted");
    assert_eq!(promoted, final_path);
    rename.await.unwrap();
}

#[tokio::test]
async fn times_out_when_nothing_settles() {
    let staging = TempDir::new().unwrap();
    let watcher = DownloadWatcher::new(staging.path(), fast_settings(2));

    let err = watcher
        .await_completed(Duration::from_millis(80))
        .await
        .unwrap_err();
    assert!(matches!(err, WatchError::TimedOut(_)));
}

#[tokio::test]
async fn missing_staging_directory_fails_fast() {
    let staging = TempDir::new().unwrap();
    let gone = staging.path().join("never_created");

    let watcher = DownloadWatcher::new(&gone, fast_settings(2));
    let err = watcher
        .await_completed(Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(matches!(err, WatchError::DirMissing { .. }));
}

#[tokio::test]
async fn promoted_name_is_never_certified_twice() {
    let staging = TempDir::new().unwrap();
    fs::write(staging.path().join("8888_A_B.mp4"), vec![0u8; 256]).unwrap();

    let watcher = DownloadWatcher::new(staging.path(), fast_settings(2));
    let first = watcher
        .await_completed(Duration::from_secs(2))
        .await
        .expect("first certification");
    assert!(first.ends_with("8888_A_B.mp4"));

    // The file is intentionally left in place, as after a failed
    // relocation. A second watch must not hand it out again.
    let err = watcher
        .await_completed(Duration::from_millis(100))
        .await
        .unwrap_err();
    assert!(matches!(err, WatchError::TimedOut(_)));
}

#[tokio::test]
async fn zero_byte_files_are_ignored() {
    let staging = TempDir::new().unwrap();
    fs::write(staging.path().join("empty.mp4"), b"").unwrap();

    let watcher = DownloadWatcher::new(staging.path(), fast_settings(2));
    let err = watcher
        .await_completed(Duration::from_millis(100))
        .await
        .unwrap_err();
    assert!(matches!(err, WatchError::TimedOut(_)));
}
