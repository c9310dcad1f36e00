use crate::git::{self, Repo};
use crate::manifest::{self, Manifest};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tokio::time::Instant;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct CommitSettings {
    pub repo: Repo,
    pub push: bool,
}

#[derive(Debug, Clone)]
pub struct WatchSettings {
    pub content_dir: PathBuf,
    pub manifest: PathBuf,
    pub debounce: Duration,
    pub commit: Option<CommitSettings>,
}

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

/// Relative paths touched since the last flush.
#[derive(Debug, Default)]
pub struct PendingChanges {
    paths: BTreeSet<PathBuf>,
}

impl PendingChanges {
    /// Returns false for paths under a dotfile or dot-directory.
    pub fn record(&mut self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let hidden = relative
            .components()
            .any(|c| c.as_os_str().to_str().is_some_and(manifest::is_hidden));
        if hidden {
            return false;
        }
        self.paths.insert(relative.to_path_buf());
        true
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn drain(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.paths).into_iter().collect()
    }
}

fn is_meaningful(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

/// Paths handed to `git -C <repo> add`. Git resolves relative paths against
/// the repository, not our working directory.
fn git_targets(settings: &WatchSettings) -> std::io::Result<[PathBuf; 2]> {
    Ok([
        std::path::absolute(&settings.content_dir)?,
        std::path::absolute(&settings.manifest)?,
    ])
}

/// Regenerates the manifest and, when configured, commits and pushes it.
pub fn flush(settings: &WatchSettings, changes: &[PathBuf]) {
    log::info!("{} change(s) detected", changes.len());
    for change in changes {
        log::info!("  - {}", change.display());
    }

    let manifest = match Manifest::scan(&settings.content_dir) {
        Ok(m) => m,
        Err(e) => {
            log::error!("Failed to scan {}: {}", settings.content_dir.display(), e);
            return;
        }
    };
    if let Err(e) = manifest.write(&settings.manifest) {
        log::error!("Failed to write {}: {}", settings.manifest.display(), e);
        return;
    }
    log::info!(
        "Regenerated {} with {} folders",
        settings.manifest.display(),
        manifest.len()
    );

    let Some(commit) = &settings.commit else {
        return;
    };

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let message = git::auto_commit_message(changes.len(), timestamp);

    let targets = match git_targets(settings) {
        Ok(targets) => targets,
        Err(e) => {
            log::error!("Auto-commit failed: cannot resolve paths: {}", e);
            return;
        }
    };
    let result = commit
        .repo
        .add(&[targets[0].as_path(), targets[1].as_path()])
        .and_then(|_| commit.repo.commit(&message))
        .and_then(|_| if commit.push { commit.repo.push() } else { Ok(()) });

    match result {
        Ok(()) => log::info!("Committed: {}", message),
        Err(e) => log::error!("Auto-commit failed: {}", e),
    }
}

/// Watches the content directory and flushes once no change has arrived for
/// `settings.debounce`. Runs until the notify backend goes away.
pub async fn run(settings: WatchSettings) -> Result<(), WatchError> {
    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(&settings.content_dir, RecursiveMode::Recursive)?;
    log::info!("Watching {} for content changes", settings.content_dir.display());

    let mut pending = PendingChanges::default();
    // Set by recorded changes only; reads and other noise never move it.
    let mut deadline: Option<Instant> = None;

    loop {
        let next = match deadline {
            None => bridge_rx.recv().await.map(Some),
            Some(at) => match tokio::time::timeout_at(at, bridge_rx.recv()).await {
                Ok(res) => res.map(Some),
                Err(_) => Ok(None),
            },
        };

        match next {
            Ok(Some(Ok(event))) => {
                if !is_meaningful(&event.kind) {
                    continue;
                }
                let mut changed = false;
                for path in &event.paths {
                    if pending.record(&settings.content_dir, path) {
                        log::debug!("Changed: {}", path.display());
                        changed = true;
                    }
                }
                if changed {
                    deadline = Some(Instant::now() + settings.debounce);
                }
            }
            Ok(Some(Err(e))) => log::error!("Watch error: {}", e),
            Ok(None) => {
                deadline = None;
                let changes = pending.drain();
                let settings = settings.clone();
                if let Err(e) =
                    tokio::task::spawn_blocking(move || flush(&settings, &changes)).await
                {
                    log::error!("Flush task failed: {}", e);
                }
            }
            Err(_) => break,
        }
    }

    Ok(())
}
