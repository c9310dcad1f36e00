pub mod control;
pub mod git;
pub mod manifest;
pub mod version;
pub mod watch;
