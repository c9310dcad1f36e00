use crate::events::AppEvent;
use async_channel::Sender;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;

/// Posts `event` whenever `path` is created, modified or removed. Watches the
/// parent directory so editors that replace the file are still seen.
pub async fn watch_file(path: PathBuf, event: AppEvent, tx: Sender<AppEvent>) {
    let path = if path.is_relative() {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(e) => {
                log::error!("Cannot resolve {}: {}", path.display(), e);
                return;
            }
        }
    } else {
        path
    };
    let dir = match path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&dir) {
        log::error!("Failed to create {} for watching: {}", dir.display(), e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch {}: {}", dir.display(), e);
        return;
    }
    log::debug!("Watching {}", path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(ev) => {
                let meaningful_event = matches!(
                    ev.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && ev.paths.iter().any(|p| p == &path)
                    && tx.send(event.clone()).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
