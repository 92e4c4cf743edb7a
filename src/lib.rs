//! Spelunk: a gopherspace surveyor
//!
//! This crate implements a crawler for a single gopher service: it walks every
//! directory reachable from a root selector, downloads the text, binary and
//! image resources it discovers under size and time caps, and produces a
//! deduplicated summary of everything it saw.

pub mod config;
pub mod crawler;
pub mod menu;
pub mod report;
pub mod storage;

use thiserror::Error;

/// Main error type for Spelunk operations
#[derive(Debug, Error)]
pub enum SpelunkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] crawler::TransportError),

    #[error("Root menu for {host}:{port} is unreachable: {source}")]
    RootUnreachable {
        host: String,
        port: u16,
        source: crawler::TransportError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Spelunk operations
pub type Result<T> = std::result::Result<T, SpelunkError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlEngine, CrawlReport, Resource};
pub use menu::{ItemType, MenuLine, ResourceKind};
pub use report::ExtremaTable;
