//! CLI command implementations.

pub mod browse;
pub mod delete;
pub mod draft;
pub mod init;
pub mod show;
