//! Bounded resource downloads
//!
//! A download reads the response body incrementally under two bounds: a byte
//! cap and a wall-clock deadline. Every failure mode is an explicit
//! [`DownloadError`] variant so the engine can log timeouts, cap hits and
//! empty responses distinctly, skip the resource, and keep crawling.

use crate::config::LimitsConfig;
use crate::crawler::transport::{Transport, TransportError};
use crate::menu::ResourceKind;
use crate::storage::{ResourceStore, StorageError};
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::time::{timeout, Instant};

/// Read granularity for the download loop
const CHUNK_SIZE: usize = 2048;

/// End-of-transmission artifact the service appends to text bodies
const TEXT_TERMINATOR: &[u8] = b"\n.\r\n";

/// Failure modes of a single download
///
/// All variants are terminal for the one resource and none abort the crawl.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Body reached the {limit}-byte cap")]
    SizeCapExceeded { limit: u64 },

    #[error("Read stalled past {timeout:?} with {received} bytes received")]
    Timeout { timeout: Duration, received: u64 },

    #[error("No data received before the {timeout:?} deadline")]
    EmptyResponse { timeout: Duration },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Downloads one resource and persists it through the store
///
/// # Behavior
///
/// 1. Any suffix after a literal backslash in the selector is stripped before
///    the request goes out (defensive trimming of malformed selectors).
/// 2. The body is read in chunks until the service closes the connection.
///    Reaching the byte cap or the deadline aborts with the matching error;
///    a deadline that expires with zero bytes received is reported as
///    [`DownloadError::EmptyResponse`].
/// 3. Text and non-image binary bodies have a trailing `\n.\r\n` terminator
///    stripped; image bodies are stored verbatim.
/// 4. The bytes are persisted and the *stored* size is re-checked against the
///    cap, so a boundary-exact oversize file never becomes a resource.
///
/// # Returns
///
/// * `Ok(u64)` - Stored size in bytes
/// * `Err(DownloadError)` - Why this resource was skipped
pub async fn download_resource(
    transport: &Transport,
    store: &mut dyn ResourceStore,
    limits: &LimitsConfig,
    selector: &str,
    kind: ResourceKind,
) -> Result<u64, DownloadError> {
    let selector = selector.split('\\').next().unwrap_or(selector);

    tracing::debug!(
        "Retrieving {} '{}' from {}:{}",
        kind,
        selector,
        transport.host(),
        transport.port()
    );

    let mut stream = transport.open(selector).await?;
    let body = read_bounded(&mut stream, limits).await?;

    let body = match kind.trims_terminator() {
        true => trim_terminator(body),
        false => body,
    };

    let stored = store.store(kind, selector, &body)?;

    // A stored size at or over the cap means an oversize body slipped through
    // to the boundary; the registry must not see it
    if stored >= limits.max_download_bytes {
        return Err(DownloadError::SizeCapExceeded {
            limit: limits.max_download_bytes,
        });
    }

    Ok(stored)
}

/// Reads the response body under the byte cap and wall-clock deadline
async fn read_bounded(
    stream: &mut tokio::net::TcpStream,
    limits: &LimitsConfig,
) -> Result<Vec<u8>, DownloadError> {
    let cap = limits.max_download_bytes;
    let deadline = Instant::now() + limits.download_timeout();
    let mut body: Vec<u8> = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        if body.len() as u64 >= cap {
            tracing::warn!("Download capped at {} bytes", cap);
            return Err(DownloadError::SizeCapExceeded { limit: cap });
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(stall_error(limits, body.len() as u64));
        }

        match timeout(remaining, stream.read(&mut chunk)).await {
            Ok(Ok(0)) => return Ok(body),
            Ok(Ok(n)) => body.extend_from_slice(&chunk[..n]),
            Ok(Err(e)) => return Err(DownloadError::Io(e)),
            Err(_) => return Err(stall_error(limits, body.len() as u64)),
        }
    }
}

/// A deadline expiry with nothing received reports distinctly from one that
/// interrupted a partial body
fn stall_error(limits: &LimitsConfig, received: u64) -> DownloadError {
    if received == 0 {
        DownloadError::EmptyResponse {
            timeout: limits.download_timeout(),
        }
    } else {
        DownloadError::Timeout {
            timeout: limits.download_timeout(),
            received,
        }
    }
}

/// Strips the trailing end-of-transmission artifact from a text body
fn trim_terminator(mut body: Vec<u8>) -> Vec<u8> {
    if body.ends_with(TEXT_TERMINATOR) {
        body.truncate(body.len() - TEXT_TERMINATOR.len());
    }
    body
}
