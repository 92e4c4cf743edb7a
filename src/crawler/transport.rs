//! TCP transport for the gopher protocol
//!
//! This module handles all network requests for the crawler:
//! - Opening a fresh connection per request (the protocol has no reuse)
//! - Sending the selector line terminated by CRLF
//! - Retrying failed connections up to a fixed limit, with no backoff
//! - Reading menu responses under a deadline
//!
//! A request that exhausts its connection attempts fails with
//! [`TransportError::RequestFailed`]; the caller treats that resource as
//! unreachable for the rest of the run.

use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Line terminator appended to every selector request
const CRLF: &[u8] = b"\r\n";

/// Errors produced by transport operations
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Could not connect to {host}:{port}: {source}")]
    Connection {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    #[error("Request for '{selector}' failed after {attempts} attempts")]
    RequestFailed { selector: String, attempts: u32 },

    #[error("Menu read for '{selector}' exceeded {timeout:?}")]
    MenuTimeout { selector: String, timeout: Duration },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Opens connections and issues selector requests against one service
#[derive(Debug, Clone)]
pub struct Transport {
    host: String,
    port: u16,
    retries: u32,
    read_timeout: Duration,
}

impl Transport {
    /// Creates a transport bound to a (host, port) pair
    ///
    /// # Arguments
    ///
    /// * `host` - Hostname of the service
    /// * `port` - TCP port of the service
    /// * `retries` - Connection attempts per request before giving up
    /// * `read_timeout` - Deadline applied to menu reads
    pub fn new(host: impl Into<String>, port: u16, retries: u32, read_timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            retries: retries.max(1),
            read_timeout,
        }
    }

    /// The hostname this transport talks to
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The port this transport talks to
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Single connection attempt, bounded by the read timeout
    async fn connect(&self) -> Result<TcpStream, TransportError> {
        let addr = (self.host.as_str(), self.port);
        match timeout(self.read_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(source)) => Err(TransportError::Connection {
                host: self.host.clone(),
                port: self.port,
                source,
            }),
            Err(_) => Err(TransportError::Connection {
                host: self.host.clone(),
                port: self.port,
                source: std::io::Error::new(std::io::ErrorKind::TimedOut, "connect timed out"),
            }),
        }
    }

    /// Opens a connection and sends the selector request line
    ///
    /// Connection attempts are retried up to the configured limit; after the
    /// limit the request is terminal for this run.
    ///
    /// # Returns
    ///
    /// * `Ok(TcpStream)` - Connected stream with the request already sent
    /// * `Err(TransportError::RequestFailed)` - All attempts exhausted
    pub async fn open(&self, selector: &str) -> Result<TcpStream, TransportError> {
        for attempt in 1..=self.retries {
            match self.connect().await {
                Ok(mut stream) => {
                    tracing::debug!(
                        "Requesting '{}' from {}:{} (attempt {})",
                        selector,
                        self.host,
                        self.port,
                        attempt
                    );
                    match self.send_selector(&mut stream, selector).await {
                        Ok(()) => return Ok(stream),
                        Err(e) => {
                            tracing::warn!(
                                "Request attempt {} for '{}' failed: {}",
                                attempt,
                                selector,
                                e
                            );
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Request attempt {} for '{}' failed: {}", attempt, selector, e);
                }
            }
        }

        Err(TransportError::RequestFailed {
            selector: selector.to_string(),
            attempts: self.retries,
        })
    }

    async fn send_selector(
        &self,
        stream: &mut TcpStream,
        selector: &str,
    ) -> Result<(), TransportError> {
        stream.write_all(selector.as_bytes()).await?;
        stream.write_all(CRLF).await?;
        stream.flush().await?;
        Ok(())
    }

    /// Fetches a directory menu as text
    ///
    /// The whole response is read until the service closes the connection,
    /// under the read deadline so one stalled directory cannot hang the
    /// crawl. Menus are text by contract; stray non-UTF-8 bytes are replaced
    /// rather than rejected.
    pub async fn fetch_menu(&self, selector: &str) -> Result<String, TransportError> {
        let mut stream = self.open(selector).await?;

        let mut body = Vec::new();
        match timeout(self.read_timeout, stream.read_to_end(&mut body)).await {
            Ok(Ok(_)) => Ok(String::from_utf8_lossy(&body).into_owned()),
            Ok(Err(e)) => Err(TransportError::Io(e)),
            Err(_) => Err(TransportError::MenuTimeout {
                selector: selector.to_string(),
                timeout: self.read_timeout,
            }),
        }
    }
}
