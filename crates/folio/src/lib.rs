pub mod carousel;
pub mod config;
pub mod events;
pub mod gallery;
pub mod sys;
