use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/folio.sock";

/// Commands the daemon answers with a single JSON line.
pub const QUERIES: &[&str] = &["frame", "modal"];

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("Failed to connect to folio daemon at {path}: {source}. Is folio running?")]
    Connect {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Empty command")]
    Empty,
}

pub fn expects_reply(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|cmd| QUERIES.contains(&cmd))
}

/// Sends one command line; returns the reply for query commands.
pub fn send(socket: &Path, line: &str) -> Result<Option<String>, ControlError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ControlError::Empty);
    }

    let mut stream = UnixStream::connect(socket).map_err(|source| ControlError::Connect {
        path: socket.to_path_buf(),
        source,
    })?;
    writeln!(stream, "{}", line)?;

    if !expects_reply(line) {
        return Ok(None);
    }

    let mut reply = String::new();
    BufReader::new(stream).read_line(&mut reply)?;
    Ok(Some(reply.trim_end().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expects_reply_only_for_queries() {
        assert!(expects_reply("frame"));
        assert!(expects_reply("  modal "));
        assert!(!expects_reply("wheel 100"));
        assert!(!expects_reply(""));
    }

    #[test]
    fn test_send_reports_missing_daemon() {
        let path = std::env::temp_dir().join(format!("folio-missing-{}.sock", std::process::id()));
        assert!(matches!(
            send(&path, "drag-end"),
            Err(ControlError::Connect { .. })
        ));
        assert!(matches!(send(&path, "   "), Err(ControlError::Empty)));
    }
}
