use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::sys::feed::FrameFeed;
use async_channel::Sender;
use std::thread;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::time::MissedTickBehavior;

async fn run_frame_clock(interval: Duration, tx: Sender<AppEvent>) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        if tx.send(AppEvent::Tick).await.is_err() {
            break;
        }
    }
}

pub fn start_background_services(tx: Sender<AppEvent>, feed: FrameFeed, config: &Config) {
    let socket = config.daemon.socket.clone();
    let manifest = config.content.manifest.clone();
    let interval = Duration::from_millis(config.daemon.frame_interval_ms.max(1));

    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::server::run_server(socket, tx, feed).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    run_frame_clock(interval, tx).await;
                });
            }

            match config::get_config_path() {
                Ok(path) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::sys::watcher::watch_file(path, AppEvent::ConfigReload, tx).await;
                    });
                }
                Err(e) => log::error!("Config watcher error: {}", e),
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::watcher::watch_file(manifest, AppEvent::ContentReload, tx).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}
