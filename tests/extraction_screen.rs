use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use actix_web::{test, web, App};
use bookscape::{routes::extraction_route, services::CatalogClient};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

fn spawn_catalog_stub(body: String) -> (String, mpsc::Sender<()>, thread::JoinHandle<()>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
    let addr = server.server_addr();
    let base_url = format!("http://{addr}");

    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    let handle = thread::spawn(move || loop {
        if shutdown_rx.try_recv().is_ok() {
            break;
        }
        let request = match server.recv_timeout(Duration::from_millis(50)) {
            Ok(Some(req)) => req,
            Ok(None) => continue,
            Err(_) => break,
        };
        let header =
            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                .expect("valid header");
        let _ = request.respond(
            tiny_http::Response::from_string(body.clone()).with_header(header),
        );
    });

    (base_url, shutdown_tx, handle)
}

/// A pool whose every acquire fails fast: nothing listens on the target
/// port and the acquire timeout is tight.
fn unreachable_pool() -> PgPool {
    let options = PgConnectOptions::new()
        .host("127.0.0.1")
        .port(9)
        .username("nobody")
        .password("nothing")
        .database("nowhere");
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy_with(options)
}

#[actix_web::test]
async fn failed_upload_reports_error_and_offers_no_download() {
    let page = serde_json::json!({
        "totalItems": 2,
        "items": [
            {"id": "vol-0", "volumeInfo": {"title": "First"}},
            {"id": "vol-1", "volumeInfo": {"title": "Second"}}
        ]
    })
    .to_string();
    let (base_url, shutdown, handle) = spawn_catalog_stub(page);
    let catalog_client = CatalogClient::with_base_url("test-key".to_string(), base_url);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(unreachable_pool()))
            .app_data(web::Data::new(catalog_client))
            .service(web::scope("/extraction").service(extraction_route::search)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/extraction/search")
        .set_form([("query", "rust")])
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = String::from_utf8(body.to_vec()).expect("utf-8 page");

    // The collected batch is still previewed, the store failure is
    // surfaced, and no CSV download is offered (the table is not
    // guaranteed to hold the batch).
    assert!(html.contains("Collected 2 records"));
    assert!(html.contains("vol-0"));
    assert!(html.contains("Error uploading data to database"));
    assert!(!html.contains("/extraction/download"));

    let _ = shutdown.send(());
    let _ = handle.join();
}
