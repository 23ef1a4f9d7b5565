use actix_web::{get, post, web, HttpResponse};
use askama::Template;
use serde::Deserialize;
use sqlx::PgPool;

use crate::{
    dal::book_db::{self, WriteMode, EXTRACTED_BOOKS_TABLE},
    domain::book::{to_csv, COLUMNS},
    routes::render,
    services::{collect_books, CatalogClient, RECORD_CAP},
};

/// How many rows of the collected batch the preview table shows.
const PREVIEW_ROWS: usize = 100;

#[derive(Template)]
#[template(path = "extraction.html")]
struct ExtractionTemplate {
    query: String,
    message: String,
    error: String,
    columns: &'static [&'static str],
    rows: Vec<Vec<String>>,
    total: usize,
    uploaded: bool,
}

impl ExtractionTemplate {
    fn empty() -> Self {
        Self {
            query: String::new(),
            message: String::new(),
            error: String::new(),
            columns: &COLUMNS,
            rows: vec![],
            total: 0,
            uploaded: false,
        }
    }
}

#[get("")]
async fn extraction() -> HttpResponse {
    render(ExtractionTemplate::empty())
}

#[derive(Deserialize)]
struct SearchBody {
    query: String,
}

#[post("/search")]
async fn search(
    pool: web::Data<PgPool>,
    catalog_client: web::Data<CatalogClient>,
    body: web::Form<SearchBody>,
) -> HttpResponse {
    let query = body.query.trim().to_string();
    let mut page = ExtractionTemplate {
        query: query.clone(),
        ..ExtractionTemplate::empty()
    };

    if query.is_empty() {
        page.error = "Please enter a search query.".to_string();
        return render(page);
    }

    let records = collect_books(&catalog_client, &query, RECORD_CAP).await;
    if records.is_empty() {
        page.message = "No books found for the given query.".to_string();
        return render(page);
    }

    page.total = records.len();
    page.rows = records
        .iter()
        .take(PREVIEW_ROWS)
        .map(|record| record.fields())
        .collect();

    // The CSV download reads the batch back from the store, so it is only
    // offered once the upload went through; after a failed upload the
    // table holds nothing worth exporting.
    match book_db::write_books(&pool, EXTRACTED_BOOKS_TABLE, &records, WriteMode::FullRefresh)
        .await
    {
        Ok(()) => {
            page.message = "Data uploaded to the database successfully!".to_string();
            page.uploaded = true;
        }
        Err(e) => page.error = format!("Error uploading data to database: {}", e),
    }

    render(page)
}

#[derive(Deserialize)]
struct DownloadBody {
    query: String,
}

#[post("/download")]
async fn download(pool: web::Data<PgPool>, body: web::Form<DownloadBody>) -> HttpResponse {
    match book_db::fetch_books(&pool, EXTRACTED_BOOKS_TABLE).await {
        Ok(records) => {
            let filename = format!("{}_books.csv", body.query.trim().replace('"', ""));
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", filename),
                ))
                .body(to_csv(&records))
        }
        Err(e) => {
            log::error!("Failed to read back extracted books: {:?}", e);
            HttpResponse::InternalServerError()
                .body(format!("Error reading data from database: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_batch() -> ExtractionTemplate {
        ExtractionTemplate {
            query: "rust".to_string(),
            total: 3,
            rows: vec![vec!["value".to_string(); COLUMNS.len()]],
            ..ExtractionTemplate::empty()
        }
    }

    #[test]
    fn failed_upload_keeps_preview_but_hides_download() {
        let mut page = page_with_batch();
        page.error = "Error uploading data to database: connection refused".to_string();

        let html = page.render().expect("template renders");

        assert!(html.contains("Error uploading data to database"));
        assert!(html.contains("Collected 3 records"));
        assert!(!html.contains("/extraction/download"));
    }

    #[test]
    fn successful_upload_offers_download() {
        let mut page = page_with_batch();
        page.message = "Data uploaded to the database successfully!".to_string();
        page.uploaded = true;

        let html = page.render().expect("template renders");

        assert!(html.contains("/extraction/download"));
        assert!(html.contains("Download CSV"));
    }
}
