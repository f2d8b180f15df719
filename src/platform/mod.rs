//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory natively and in tests)
//! - Wall-clock time

pub mod storage;
pub mod time;

pub use storage::{MemoryStorage, Storage};
pub use time::{format_relative, now_ms};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
