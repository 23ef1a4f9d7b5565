use itertools::Itertools;
use sqlx::PgPool;

use crate::domain::book::BookRecord;

/// Destination table for dashboard extraction runs.
pub const EXTRACTED_BOOKS_TABLE: &str = "extracted_books";

/// Destination table for incremental CSV imports.
pub const BOOK_SEARCH_TABLE: &str = "book_search";

/// Column-to-type mapping of the book table, in insert order.
const COLUMN_TYPES: [(&str, &str); 25] = [
    ("book_id", "VARCHAR(255)"),
    ("search_key", "VARCHAR(255)"),
    ("book_title", "VARCHAR(255)"),
    ("book_subtitle", "TEXT"),
    ("book_authors", "TEXT"),
    ("book_description", "TEXT"),
    ("industryIdentifiers", "TEXT"),
    ("text_readingModes", "BOOLEAN"),
    ("image_readingModes", "BOOLEAN"),
    ("pageCount", "INT"),
    ("categories", "TEXT"),
    ("language", "VARCHAR(255)"),
    ("imageLinks", "TEXT"),
    ("ratingsCount", "INT"),
    ("averageRating", "NUMERIC(10,2)"),
    ("country", "VARCHAR(255)"),
    ("saleability", "VARCHAR(255)"),
    ("isEbook", "BOOLEAN"),
    ("amount_listPrice", "NUMERIC(10,2)"),
    ("currencyCode_listPrice", "VARCHAR(255)"),
    ("amount_retailPrice", "NUMERIC(10,2)"),
    ("currencyCode_retailPrice", "VARCHAR(255)"),
    ("buyLink", "TEXT"),
    ("year", "TEXT"),
    ("publisher", "TEXT"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Drop any existing table, recreate it, then append the batch.
    FullRefresh,
    /// Create the table if absent, then append the batch.
    Incremental,
}

fn create_table_statement(table: &str) -> String {
    let columns = COLUMN_TYPES
        .iter()
        .map(|(name, col_type)| format!("\"{}\" {}", name, col_type))
        .join(", ");
    format!("create table if not exists \"{}\" ({})", table, columns)
}

fn insert_statement(table: &str) -> String {
    let columns = COLUMN_TYPES
        .iter()
        .map(|(name, _)| format!("\"{}\"", name))
        .join(", ");
    let placeholders = (1..=COLUMN_TYPES.len())
        .map(|i| format!("${}", i))
        .join(", ");
    format!(
        "insert into \"{}\" ({}) values ({})",
        table, columns, placeholders
    )
}

/// (Re)create `table` per `mode` and append the whole batch inside one
/// transaction. On error the transaction rolls back and the caller sees
/// the store's message; no finer-grained recovery is attempted here.
pub async fn write_books(
    pool: &PgPool,
    table: &str,
    records: &[BookRecord],
    mode: WriteMode,
) -> Result<(), sqlx::Error> {
    if mode == WriteMode::FullRefresh {
        sqlx::query(&format!("drop table if exists \"{}\"", table))
            .execute(pool)
            .await?;
    }
    sqlx::query(&create_table_statement(table))
        .execute(pool)
        .await?;

    let insert = insert_statement(table);
    let mut tx = pool.begin().await?;
    for record in records {
        sqlx::query(&insert)
            .bind(&record.book_id)
            .bind(&record.search_key)
            .bind(&record.book_title)
            .bind(&record.book_subtitle)
            .bind(&record.book_authors)
            .bind(&record.book_description)
            .bind(&record.industry_identifiers)
            .bind(record.text_reading_modes)
            .bind(record.image_reading_modes)
            .bind(record.page_count)
            .bind(&record.categories)
            .bind(&record.language)
            .bind(&record.image_links)
            .bind(record.ratings_count)
            .bind(record.average_rating)
            .bind(&record.country)
            .bind(&record.saleability)
            .bind(record.is_ebook)
            .bind(record.amount_list_price)
            .bind(&record.currency_code_list_price)
            .bind(record.amount_retail_price)
            .bind(&record.currency_code_retail_price)
            .bind(&record.buy_link)
            .bind(&record.year)
            .bind(&record.publisher)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    log::info!("Wrote {} records to table {}", records.len(), table);
    Ok(())
}

/// Read a whole book table back. Row order is whatever the store's scan
/// produces; callers that need a particular order must sort.
pub async fn fetch_books(pool: &PgPool, table: &str) -> Result<Vec<BookRecord>, sqlx::Error> {
    sqlx::query_as::<_, BookRecord>(&format!("select * from \"{}\"", table))
        .fetch_all(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_statement_covers_every_column() {
        let sql = create_table_statement(EXTRACTED_BOOKS_TABLE);
        assert!(sql.starts_with("create table if not exists \"extracted_books\""));
        for (name, col_type) in COLUMN_TYPES {
            assert!(
                sql.contains(&format!("\"{}\" {}", name, col_type)),
                "missing column {}",
                name
            );
        }
    }

    #[test]
    fn column_names_match_domain_schema() {
        let names: Vec<&str> = COLUMN_TYPES.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, crate::domain::book::COLUMNS);
    }

    #[test]
    fn insert_statement_has_25_placeholders() {
        let sql = insert_statement(BOOK_SEARCH_TABLE);
        assert!(sql.contains("$1,"));
        assert!(sql.ends_with("$25)"));
    }
}
