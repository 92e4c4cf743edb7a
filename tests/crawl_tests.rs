//! Integration tests for the crawler
//!
//! These tests run the full crawl cycle against a scripted in-process gopher
//! server: a TCP listener that reads the selector line and replies with a
//! canned menu or file body. Selectors without a canned response stall,
//! which exercises the read deadline.

use spelunk::config::{Config, LimitsConfig, OutputConfig, ServerConfig};
use spelunk::crawler::{crawl, CrawlEngine, ExternalRef};
use spelunk::menu::ResourceKind;
use spelunk::SpelunkError;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// Spawns a scripted gopher server on an ephemeral port.
///
/// The port is only known after binding, and menus need to embed it, so the
/// route table is built by a closure that receives the bound port.
async fn spawn_gopher_server<F>(build_routes: F) -> SocketAddr
where
    F: FnOnce(u16) -> HashMap<String, Vec<u8>>,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(build_routes(addr.port()));

    tokio::spawn(async move {
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let routes = Arc::clone(&routes);

            tokio::spawn(async move {
                let mut reader = BufReader::new(stream);
                let mut line = String::new();
                if reader.read_line(&mut line).await.is_err() {
                    return;
                }
                let selector = line.trim_end_matches(['\r', '\n']).to_string();

                let mut stream = reader.into_inner();
                match routes.get(&selector) {
                    Some(body) => {
                        let _ = stream.write_all(body).await;
                        let _ = stream.shutdown().await;
                    }
                    None => tokio::time::sleep(Duration::from_secs(10)).await,
                }
            });
        }
    });

    addr
}

fn create_test_config(addr: SocketAddr, download_dir: &std::path::Path) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: addr.port(),
            root_selector: String::new(),
        },
        limits: LimitsConfig {
            max_download_bytes: 10_000,
            download_timeout_secs: 1, // Very short for testing
            request_retries: 2,
        },
        output: OutputConfig {
            download_dir: download_dir.to_string_lossy().into_owned(),
            summary_path: download_dir
                .join("summary.md")
                .to_string_lossy()
                .into_owned(),
        },
    }
}

#[tokio::test]
async fn test_full_crawl_records_everything_once() {
    let addr = spawn_gopher_server(|port| {
        let root_menu = format!(
            "1Docs\t/docs\t127.0.0.1\t{port}\r\n\
             0Readme\t/readme.txt\t127.0.0.1\t{port}\r\n\
             1Offsite\t/other\texample.com\t70\r\n\
             3File not found\terror.host\t70\r\n\
             iWelcome to the archive\tfake\t(NULL)\t0\r\n\
             7Search\t/search\t127.0.0.1\t{port}\r\n\
             .\r\n"
        );
        let docs_menu = format!(
            "1Up\t/docs\t127.0.0.1\t{port}\r\n\
             0Readme\t/readme.txt\t127.0.0.1\t{port}\r\n\
             9Data\t/data.bin\t127.0.0.1\t{port}\r\n\
             9Photo jpeg\t/cat.jpeg\t127.0.0.1\t{port}\r\n\
             .\r\n"
        );

        let mut routes = HashMap::new();
        routes.insert(String::new(), root_menu.into_bytes());
        routes.insert("/docs".to_string(), docs_menu.into_bytes());
        routes.insert("/readme.txt".to_string(), b"hello gopher!\n.\r\n".to_vec());
        routes.insert("/data.bin".to_string(), vec![0xAB; 100]);
        routes.insert("/cat.jpeg".to_string(), b"\xff\xd8jpegdata".to_vec());
        routes
    })
    .await;
    let port = addr.port();

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(addr, dir.path());

    let report = CrawlEngine::new(config).run().await.expect("crawl failed");

    // Both directories visited exactly once despite the self-reference
    assert_eq!(report.visited_count(), 2);
    assert!(report.visited.contains_key(""));
    assert!(report.visited.contains_key("/docs"));

    // The readme appears in two menus but the registry holds it once
    let text_files = report.resources_of_kind(ResourceKind::Text);
    assert_eq!(text_files.len(), 1);
    assert_eq!(
        text_files[0].url,
        format!("gopher://127.0.0.1:{}/0/readme.txt", port)
    );
    // Terminator stripped: "hello gopher!" is 13 bytes
    assert_eq!(text_files[0].size, Some(13));

    let binary_files = report.resources_of_kind(ResourceKind::Binary);
    assert_eq!(binary_files.len(), 1);
    assert_eq!(binary_files[0].size, Some(100));

    // Image stored verbatim
    let images = report.resources_of_kind(ResourceKind::Image);
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].size, Some(10));

    // External reference recorded, never enqueued
    assert_eq!(report.external_refs.len(), 1);
    assert!(report.external_refs.contains(&ExternalRef::Remote {
        host: "example.com".to_string(),
        port: "70".to_string(),
    }));
    assert!(!report.visited.contains_key("/other"));

    // Error and info lines recorded, unknown item type ignored
    assert_eq!(report.invalid_refs.len(), 1);
    assert_eq!(report.info_messages.len(), 1);
    assert_eq!(report.info_messages[0].text, "Welcome to the archive");

    // Extrema over the two tracked kinds
    assert_eq!(report.extrema.smallest_text.as_ref().unwrap().size, Some(13));
    assert_eq!(
        report.extrema.largest_binary.as_ref().unwrap().size,
        Some(100)
    );

    // Downloaded bytes landed in the store under the derived names
    assert!(dir.path().join("textfiles_readme.txt").exists());
    assert!(dir.path().join("binaryfiles_data.bin.dat").exists());
    assert!(dir.path().join("imagefiles_cat.jpeg").exists());
}

#[tokio::test]
async fn test_cyclic_directory_graph_terminates() {
    let addr = spawn_gopher_server(|port| {
        let mut routes = HashMap::new();
        routes.insert(
            String::new(),
            format!("1A\t/a\t127.0.0.1\t{port}\r\n").into_bytes(),
        );
        routes.insert(
            "/a".to_string(),
            format!("1B\t/b\t127.0.0.1\t{port}\r\n").into_bytes(),
        );
        routes.insert(
            "/b".to_string(),
            format!("1A\t/a\t127.0.0.1\t{port}\r\n1B\t/b\t127.0.0.1\t{port}\r\n").into_bytes(),
        );
        routes
    })
    .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(addr, dir.path());

    // The convenience entry point drives the same engine end to end
    let report = crawl(config).await.expect("crawl failed");

    assert_eq!(report.visited_count(), 3);
}

#[tokio::test]
async fn test_unreachable_directory_does_not_abort_crawl() {
    let addr = spawn_gopher_server(|port| {
        let mut routes = HashMap::new();
        // "/missing" has no route: the server stalls and the menu read
        // deadline expires
        routes.insert(
            String::new(),
            format!(
                "1Missing\t/missing\t127.0.0.1\t{port}\r\n1Good\t/good\t127.0.0.1\t{port}\r\n"
            )
            .into_bytes(),
        );
        routes.insert(
            "/good".to_string(),
            format!("0Note\t/note.txt\t127.0.0.1\t{port}\r\n").into_bytes(),
        );
        routes.insert("/note.txt".to_string(), b"fine\n.\r\n".to_vec());
        routes
    })
    .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(addr, dir.path());

    let report = CrawlEngine::new(config).run().await.expect("crawl failed");

    // The stalled directory counts as visited; the good one still yields
    // its resource
    assert_eq!(report.visited_count(), 3);
    assert_eq!(report.resources.len(), 1);
    assert_eq!(report.resources[0].size, Some(4));
}

#[tokio::test]
async fn test_unreachable_root_is_fatal() {
    // Bind then drop so the port is very likely unused
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(addr, dir.path());

    let result = CrawlEngine::new(config).run().await;

    assert!(matches!(result, Err(SpelunkError::RootUnreachable { .. })));
}

#[tokio::test]
async fn test_stop_handle_halts_before_first_directory() {
    let addr = spawn_gopher_server(|port| {
        let mut routes = HashMap::new();
        routes.insert(
            String::new(),
            format!("1A\t/a\t127.0.0.1\t{port}\r\n").into_bytes(),
        );
        routes.insert("/a".to_string(), Vec::new());
        routes
    })
    .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(addr, dir.path());

    let engine = CrawlEngine::new(config);
    let stop = engine.stop_handle();
    stop.store(true, std::sync::atomic::Ordering::Relaxed);

    let report = engine.run().await.expect("crawl failed");

    // Stop was requested before the first dequeue
    assert_eq!(report.visited_count(), 0);
}
