//! CLI command implementations

pub mod cleanup;
pub mod config;
pub mod delete;
pub mod enforce;
pub mod export;
pub mod import;
pub mod init;
pub mod sessions;
pub mod stats;
pub mod watch;
