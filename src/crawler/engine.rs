//! Crawl engine - main traversal orchestration logic
//!
//! This module contains the main crawl loop that coordinates one full
//! traversal of a gopher service, including:
//! - Owning the frontier queue and visited set for the run
//! - Fetching directory menus and reacting to each classified entry
//! - Invoking bounded downloads for file entries
//! - Maintaining the deduplicated resource registry and reference sets
//! - Exposing a read-only snapshot once the frontier is exhausted

use crate::config::Config;
use crate::crawler::downloader::{download_resource, DownloadError};
use crate::crawler::transport::Transport;
use crate::menu::{gopher_url, parse_menu, ItemType, MenuLine, ResourceKind};
use crate::report::{compute_extrema, ExtremaTable};
use crate::storage::{FsStore, ResourceStore};
use crate::{Result, SpelunkError};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A resource recorded after a successful download
///
/// Never mutated after creation; structural equality drives registry dedup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Derived gopher URL of the resource
    pub url: String,

    /// Stored size in bytes; absent only for resources whose size was never
    /// established
    pub size: Option<u64>,

    /// Tracked category of the resource
    pub kind: ResourceKind,
}

/// A reference pointing outside the configured service
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExternalRef {
    /// A well-formed directory entry naming a foreign host/port
    Remote { host: String, port: String },

    /// A directory entry without the conventional four fields
    Malformed { line: String },
}

/// An error entry reported by the service, keyed by the menu it came from
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct InvalidRef {
    /// Selector of the directory whose menu contained the error line
    pub origin: String,

    /// The error line's content, tag stripped
    pub detail: String,
}

/// An informational menu line worth surfacing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoMessage {
    /// Selector of the directory whose menu contained the line
    pub origin: String,

    /// The informational text, tag stripped
    pub text: String,
}

/// Read-only snapshot of everything one crawl run observed
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Visited directory selectors mapped to their derived URLs
    pub visited: BTreeMap<String, String>,

    /// Deduplicated references to foreign hosts and malformed entries
    pub external_refs: BTreeSet<ExternalRef>,

    /// Deduplicated error entries, keyed by (origin, detail)
    pub invalid_refs: BTreeSet<InvalidRef>,

    /// Every successfully downloaded resource, in discovery order
    pub resources: Vec<Resource>,

    /// Informational messages, in encounter order
    pub info_messages: Vec<InfoMessage>,

    /// Smallest/largest text and binary resources
    pub extrema: ExtremaTable,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the frontier emptied
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Number of directories fetched and parsed
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Resources of one tracked kind, in registry order
    pub fn resources_of_kind(&self, kind: ResourceKind) -> Vec<&Resource> {
        self.resources.iter().filter(|r| r.kind == kind).collect()
    }
}

/// Main crawl engine structure
///
/// Owns the frontier, visited set, resource registry and reference sets for
/// the lifetime of exactly one run; [`CrawlEngine::run`] consumes the engine
/// and yields the snapshot.
pub struct CrawlEngine {
    config: Config,
    transport: Transport,
    store: Box<dyn ResourceStore + Send>,
    stop: Arc<AtomicBool>,

    frontier: VecDeque<String>,
    visited: BTreeMap<String, String>,
    resources: Vec<Resource>,
    external_refs: BTreeSet<ExternalRef>,
    invalid_refs: BTreeSet<InvalidRef>,
    info_messages: Vec<InfoMessage>,
}

impl CrawlEngine {
    /// Creates an engine storing downloads on the filesystem per the config
    pub fn new(config: Config) -> Self {
        let store = Box::new(FsStore::new(config.output.download_dir.clone()));
        Self::with_store(config, store)
    }

    /// Creates an engine with a caller-provided storage backend
    pub fn with_store(config: Config, store: Box<dyn ResourceStore + Send>) -> Self {
        let transport = Transport::new(
            config.server.host.clone(),
            config.server.port,
            config.limits.request_retries,
            config.limits.download_timeout(),
        );

        Self {
            config,
            transport,
            store,
            stop: Arc::new(AtomicBool::new(false)),
            frontier: VecDeque::new(),
            visited: BTreeMap::new(),
            resources: Vec::new(),
            external_refs: BTreeSet::new(),
            invalid_refs: BTreeSet::new(),
            info_messages: Vec::new(),
        }
    }

    /// A handle that stops the engine between directory visits when set
    ///
    /// In-flight downloads still finish (or time out) before the engine
    /// checks the flag again, so already-recorded state stays consistent.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Runs the full traversal and returns the snapshot
    ///
    /// The frontier is seeded with the configured root selector. A fetch or
    /// parse failure for any directory after the root is logged and skipped;
    /// an unreachable root aborts the run, since no crawl can proceed
    /// without it.
    pub async fn run(mut self) -> Result<CrawlReport> {
        let started_at = Utc::now();
        tracing::info!(
            "Starting crawl of {}:{} from root selector {:?}",
            self.config.server.host,
            self.config.server.port,
            self.config.server.root_selector
        );

        self.frontier
            .push_back(self.config.server.root_selector.clone());
        let mut first = true;

        while let Some(selector) = self.frontier.pop_front() {
            if self.stop.load(Ordering::Relaxed) {
                tracing::info!(
                    "Stop requested, abandoning {} queued directories",
                    self.frontier.len() + 1
                );
                break;
            }

            // Defensive: enqueue-time dedup should make this unreachable,
            // but a duplicate must be discarded rather than re-fetched
            if self.visited.contains_key(&selector) {
                continue;
            }

            if let Err(e) = self.visit_directory(&selector).await {
                if first {
                    let transport_err = match e {
                        SpelunkError::Transport(t) => t,
                        other => return Err(other),
                    };
                    return Err(SpelunkError::RootUnreachable {
                        host: self.config.server.host.clone(),
                        port: self.config.server.port,
                        source: transport_err,
                    });
                }
                tracing::warn!("Skipping directory '{}': {}", selector, e);
            }
            first = false;
        }

        let extrema = compute_extrema(&self.resources);
        let finished_at = Utc::now();

        tracing::info!(
            "Crawl completed: {} directories visited, {} resources recorded",
            self.visited.len(),
            self.resources.len()
        );

        Ok(CrawlReport {
            visited: self.visited,
            external_refs: self.external_refs,
            invalid_refs: self.invalid_refs,
            resources: self.resources,
            info_messages: self.info_messages,
            extrema,
            started_at,
            finished_at,
        })
    }

    /// Fetches one directory menu and reacts to every entry
    async fn visit_directory(&mut self, selector: &str) -> Result<()> {
        let url = self.derived_url('1', selector);
        self.visited.insert(selector.to_string(), url);

        let menu = self.transport.fetch_menu(selector).await?;

        for line in parse_menu(&menu) {
            self.handle_entry(line, selector).await;
        }

        Ok(())
    }

    /// Dispatches one classified menu entry into its side effect
    async fn handle_entry(&mut self, line: MenuLine, context: &str) {
        match line.item_type {
            ItemType::Directory => self.handle_directory(&line),

            ItemType::TextFile => self.handle_file(&line, ResourceKind::Text).await,

            ItemType::BinaryFile => {
                let kind = if line.mentions_jpeg() {
                    ResourceKind::Image
                } else {
                    ResourceKind::Binary
                };
                self.handle_file(&line, kind).await;
            }

            ItemType::ErrorEntry => {
                self.invalid_refs.insert(InvalidRef {
                    origin: context.to_string(),
                    detail: line.rest,
                });
            }

            ItemType::InfoEntry => {
                let text = line.display.trim().to_string();
                // Some services emit their own error text as info lines
                if !text.starts_with("invalid") && !text.is_empty() {
                    self.info_messages.push(InfoMessage {
                        origin: context.to_string(),
                        text,
                    });
                }
            }

            // Out of scope for this service's dialect
            ItemType::Unknown => {}
        }
    }

    /// Records external references and enqueues local directories
    ///
    /// This is the sole mutation point for the frontier: a selector enters it
    /// only here, and only after checking both the visited set and the
    /// frontier itself.
    fn handle_directory(&mut self, line: &MenuLine) {
        if !line.is_well_formed() {
            tracing::debug!("Malformed directory line: {:?}", line.rest);
            self.external_refs.insert(ExternalRef::Malformed {
                line: line.rest.clone(),
            });
            return;
        }

        if !line.points_at(&self.config.server.host, self.config.server.port) {
            self.external_refs.insert(ExternalRef::Remote {
                host: line.host.clone(),
                port: line.port.clone(),
            });
            return;
        }

        let selector = &line.selector;
        if selector.is_empty() {
            return;
        }

        if !self.visited.contains_key(selector) && !self.frontier.contains(selector) {
            tracing::debug!("Queueing directory '{}'", selector);
            self.frontier.push_back(selector.clone());
        }
    }

    /// Downloads a file entry and records it in the registry on success
    async fn handle_file(&mut self, line: &MenuLine, kind: ResourceKind) {
        let selector = &line.selector;
        if selector.is_empty() {
            tracing::debug!("File entry without a selector: {:?}", line.rest);
            return;
        }

        let outcome = download_resource(
            &self.transport,
            self.store.as_mut(),
            &self.config.limits,
            selector,
            kind,
        )
        .await;

        let size = match outcome {
            Ok(size) => size,
            Err(e) => {
                self.log_download_failure(selector, &e);
                return;
            }
        };

        let resource = Resource {
            url: self.derived_url(kind.tag(), selector),
            size: Some(size),
            kind,
        };

        // Set-like dedup by structural equality
        if !self.resources.contains(&resource) {
            self.resources.push(resource);
        }
    }

    fn log_download_failure(&self, selector: &str, error: &DownloadError) {
        match error {
            DownloadError::SizeCapExceeded { .. } => {
                tracing::warn!("Excluding '{}': {}", selector, error)
            }
            DownloadError::Timeout { .. } => {
                tracing::warn!("Timed out while retrieving '{}': {}", selector, error)
            }
            DownloadError::EmptyResponse { .. } => {
                tracing::warn!("No data received for '{}'", selector)
            }
            _ => tracing::warn!("Download of '{}' failed: {}", selector, error),
        }
    }

    fn derived_url(&self, tag: char, selector: &str) -> String {
        gopher_url(
            &self.config.server.host,
            self.config.server.port,
            tag,
            selector,
        )
    }
}
