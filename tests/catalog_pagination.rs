use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use bookscape::services::{collect_books, CatalogClient};

/// Spawn a stub catalog server that answers requests with the given
/// (status, body) pairs in order. Requests past the end get a 404.
fn spawn_catalog_stub(
    responses: Vec<(u16, String)>,
) -> (String, mpsc::Sender<()>, thread::JoinHandle<()>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
    let addr = server.server_addr();
    let base_url = format!("http://{addr}");

    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    let handle = thread::spawn(move || {
        let mut responses = responses.into_iter();
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            let request = match server.recv_timeout(Duration::from_millis(50)) {
                Ok(Some(req)) => req,
                Ok(None) => continue,
                Err(_) => break,
            };

            match responses.next() {
                Some((status, body)) => {
                    let header = tiny_http::Header::from_bytes(
                        &b"Content-Type"[..],
                        &b"application/json"[..],
                    )
                    .expect("valid header");
                    let _ = request.respond(
                        tiny_http::Response::from_string(body)
                            .with_status_code(status)
                            .with_header(header),
                    );
                }
                None => {
                    let _ = request
                        .respond(tiny_http::Response::from_string("").with_status_code(404));
                }
            }
        }
    });

    (base_url, shutdown_tx, handle)
}

/// A page body with `count` items whose ids start at `first_id`.
fn page_body(total_items: u64, first_id: usize, count: usize) -> String {
    let items: Vec<serde_json::Value> = (first_id..first_id + count)
        .map(|n| serde_json::json!({"id": format!("vol-{n}")}))
        .collect();
    serde_json::json!({"totalItems": total_items, "items": items}).to_string()
}

#[tokio::test]
async fn collector_truncates_final_page_to_the_cap() {
    let (base_url, shutdown, handle) = spawn_catalog_stub(vec![
        (200, page_body(1000, 0, 40)),
        (200, page_body(1000, 40, 40)),
    ]);
    let client = CatalogClient::with_base_url("test-key".to_string(), base_url);

    let records = collect_books(&client, "rust", 50).await;

    assert_eq!(records.len(), 50);
    assert_eq!(records[0].book_id, "vol-0");
    assert_eq!(records[49].book_id, "vol-49");
    // Missing optional fields still normalized with defaults.
    assert_eq!(records[0].book_title, "N/A");
    assert_eq!(records[0].search_key, "rust");

    let _ = shutdown.send(());
    let _ = handle.join();
}

#[tokio::test]
async fn collector_stops_at_reported_total() {
    let (base_url, shutdown, handle) = spawn_catalog_stub(vec![
        (200, page_body(45, 0, 40)),
        (200, page_body(45, 40, 5)),
    ]);
    let client = CatalogClient::with_base_url("test-key".to_string(), base_url);

    let records = collect_books(&client, "rust", 1000).await;

    assert_eq!(records.len(), 45);

    let _ = shutdown.send(());
    let _ = handle.join();
}

#[tokio::test]
async fn collector_stops_early_on_empty_page() {
    let (base_url, shutdown, handle) = spawn_catalog_stub(vec![
        (200, page_body(500, 0, 40)),
        (200, serde_json::json!({"totalItems": 500}).to_string()),
    ]);
    let client = CatalogClient::with_base_url("test-key".to_string(), base_url);

    let records = collect_books(&client, "rust", 1000).await;

    assert_eq!(records.len(), 40);

    let _ = shutdown.send(());
    let _ = handle.join();
}

#[tokio::test]
async fn collector_keeps_collected_records_on_fetch_failure() {
    let (base_url, shutdown, handle) = spawn_catalog_stub(vec![
        (200, page_body(500, 0, 40)),
        (429, "rate limited".to_string()),
    ]);
    let client = CatalogClient::with_base_url("test-key".to_string(), base_url);

    let records = collect_books(&client, "rust", 1000).await;

    assert_eq!(records.len(), 40);

    let _ = shutdown.send(());
    let _ = handle.join();
}

#[tokio::test]
async fn fetch_page_returns_none_on_non_200() {
    let (base_url, shutdown, handle) = spawn_catalog_stub(vec![(403, "forbidden".to_string())]);
    let client = CatalogClient::with_base_url("bad-key".to_string(), base_url);

    let page = client.fetch_page("rust", 0, 40).await;

    assert!(page.is_none());

    let _ = shutdown.send(());
    let _ = handle.join();
}
