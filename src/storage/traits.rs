use crate::menu::ResourceKind;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for resource storage backends
///
/// Implementations derive a deterministic, collision-tolerant key from the
/// resource kind and selector, persist the bytes, and report the size that
/// actually landed in storage. Storing the same (kind, selector) twice must
/// be safe and leave the latest bytes in place.
pub trait ResourceStore {
    /// Persists one downloaded resource, returning the stored size in bytes
    fn store(&mut self, kind: ResourceKind, selector: &str, bytes: &[u8]) -> StorageResult<u64>;
}
