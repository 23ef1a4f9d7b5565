use crate::{
    domain::book::BookRecord,
    services::catalog::CatalogClient,
};

/// Hard ceiling on how many records a single extraction run collects.
pub const RECORD_CAP: usize = 1000;

/// Page size requested from the catalog API.
pub const PAGE_SIZE: u32 = 40;

/// Page through the catalog for `query`, normalizing as we go.
///
/// Stops when the API-reported total is reached, when `cap` records have
/// been collected, or when a page comes back unusable (fetch failure or an
/// absent/empty item list). The last case ends collection early without an
/// error; whatever was already collected is returned. A final page that
/// would overshoot `cap` is truncated to exactly fill the remaining quota.
pub async fn collect_books(client: &CatalogClient, query: &str, cap: usize) -> Vec<BookRecord> {
    let mut records: Vec<BookRecord> = Vec::new();
    let mut start_index: u32 = 0;
    let mut total_items: Option<u64> = None;

    loop {
        if records.len() >= cap {
            break;
        }
        if let Some(total) = total_items {
            if records.len() as u64 >= total {
                break;
            }
        }

        log::info!(
            "Fetching records {} to {} for query: {}",
            start_index + 1,
            start_index + PAGE_SIZE,
            query
        );
        let page = match client.fetch_page(query, start_index, PAGE_SIZE).await {
            Some(page) => page,
            None => break,
        };
        total_items = Some(page.total_items);

        if page.items.is_empty() {
            log::info!("No more data to fetch for query: {}", query);
            break;
        }

        let remaining = cap - records.len();
        records.extend(
            page.items
                .iter()
                .take(remaining)
                .map(|item| BookRecord::from_item(item, query)),
        );
        start_index += PAGE_SIZE;
    }

    records
}
