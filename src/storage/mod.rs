//! Storage for downloaded resource bytes
//!
//! The crawler core only needs "store these bytes under a stable key, tell me
//! the stored size". This module defines that trait and a filesystem
//! implementation that writes each resource into the configured download
//! directory.

mod fs;
mod traits;

pub use fs::FsStore;
pub use traits::{ResourceStore, StorageError, StorageResult};
