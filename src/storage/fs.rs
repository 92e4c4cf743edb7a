//! Filesystem storage backend
//!
//! Writes each downloaded resource into a flat download directory. The file
//! name is derived from the resource kind and selector: kind label, then the
//! selector with path separators flattened, capped at 50 characters, with the
//! kind's extension appended when missing. The derivation is deterministic so
//! re-storing a resource overwrites its earlier copy instead of piling up
//! duplicates.

use crate::menu::ResourceKind;
use crate::storage::traits::{ResourceStore, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Longest file name produced for a stored resource, before the extension
const MAX_STEM_CHARS: usize = 50;

/// Stores resources as files under a root directory
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Creates a store rooted at the given directory
    ///
    /// The directory is created lazily on the first store.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this store writes into
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Derives the file name for a (kind, selector) pair
    pub fn file_name_for(kind: ResourceKind, selector: &str) -> String {
        let flattened: String = selector
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();

        let mut name: String = format!("{}files{}", kind.label(), flattened)
            .chars()
            .take(MAX_STEM_CHARS)
            .collect();

        if !name.to_lowercase().ends_with(kind.extension()) {
            name.push_str(kind.extension());
        }

        name
    }
}

impl ResourceStore for FsStore {
    fn store(&mut self, kind: ResourceKind, selector: &str, bytes: &[u8]) -> StorageResult<u64> {
        fs::create_dir_all(&self.root)?;

        let path = self.root.join(Self::file_name_for(kind, selector));
        fs::write(&path, bytes)?;

        // Report what actually landed on disk, not what we were handed
        Ok(fs::metadata(&path)?.len())
    }
}
