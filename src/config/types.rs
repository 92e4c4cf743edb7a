use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Spelunk
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    pub output: OutputConfig,
}

/// Target gopher service
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Hostname of the gopher service
    pub host: String,

    /// TCP port of the gopher service
    pub port: u16,

    /// Selector the crawl starts from (the service root by default)
    #[serde(rename = "root-selector", default)]
    pub root_selector: String,
}

/// Resource bounds applied to every download
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Per-file byte cap; a body reaching this size is discarded
    #[serde(rename = "max-download-bytes", default = "default_max_download_bytes")]
    pub max_download_bytes: u64,

    /// Wall-clock deadline for the read phase of a download (seconds)
    #[serde(rename = "download-timeout-secs", default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,

    /// Connection attempts per request before giving up
    #[serde(rename = "request-retries", default = "default_request_retries")]
    pub request_retries: u32,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory downloaded resources are stored under
    #[serde(rename = "download-dir")]
    pub download_dir: String,

    /// Path to the markdown summary file
    #[serde(rename = "summary-path")]
    pub summary_path: String,
}

fn default_max_download_bytes() -> u64 {
    500_000
}

fn default_download_timeout_secs() -> u64 {
    5
}

fn default_request_retries() -> u32 {
    2
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_download_bytes: default_max_download_bytes(),
            download_timeout_secs: default_download_timeout_secs(),
            request_retries: default_request_retries(),
        }
    }
}

impl LimitsConfig {
    /// The download deadline as a [`Duration`]
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}
