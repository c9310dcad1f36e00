pub mod feed;
pub mod protocol;
pub mod runtime;
pub mod server;
pub mod watcher;
