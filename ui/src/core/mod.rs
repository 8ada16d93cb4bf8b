//! Platform-agnostic building blocks: the snapshot model, loading, config, formatting and timers.

pub mod config;
pub mod format;
pub mod loader;
pub mod platform;
pub mod snapshot;
pub mod timing;
