use crate::events::AppEvent;
use crate::sys::feed::FrameFeed;
use crate::sys::protocol::{self, Request};
use async_channel::Sender;
use std::path::PathBuf;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;

pub async fn run_server(socket: PathBuf, tx: Sender<AppEvent>, feed: FrameFeed) {
    // Cleanup old socket if it exists
    if std::fs::metadata(&socket).is_ok() {
        let _ = std::fs::remove_file(&socket);
    }

    let listener = match UnixListener::bind(&socket) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", socket.display(), e);
            return;
        }
    };
    log::info!("Listening on {}", socket.display());

    let clock = Instant::now();

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                let feed = feed.clone();
                tokio::spawn(async move {
                    let (reader, mut writer) = stream.into_split();
                    let mut lines = BufReader::new(reader).lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        let now_ms = clock.elapsed().as_secs_f64() * 1000.0;
                        let reply = match protocol::parse_line(&line, now_ms) {
                            Ok(Request::Event(event)) => {
                                if tx.send(event).await.is_err() {
                                    break;
                                }
                                continue;
                            }
                            Ok(Request::Frame) => feed.frame_json(),
                            Ok(Request::Modal) => feed.modal_json(),
                            Err(e) => {
                                log::warn!("Rejected control line {:?}: {}", line, e);
                                continue;
                            }
                        };

                        let reply = match reply {
                            Ok(json) => json,
                            Err(e) => {
                                log::error!("Failed to encode reply: {}", e);
                                "null".to_string()
                            }
                        };
                        if writer.write_all(format!("{}\n", reply).as_bytes()).await.is_err() {
                            break;
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
