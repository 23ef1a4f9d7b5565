use itertools::Itertools;
use rust_decimal::Decimal;

use crate::services::catalog::VolumeItem;

const NA: &str = "N/A";

/// Column names of the flat book schema, in insert order. These are also
/// the header row of the CSV export.
pub const COLUMNS: [&str; 25] = [
    "book_id",
    "search_key",
    "book_title",
    "book_subtitle",
    "book_authors",
    "book_description",
    "industryIdentifiers",
    "text_readingModes",
    "image_readingModes",
    "pageCount",
    "categories",
    "language",
    "imageLinks",
    "ratingsCount",
    "averageRating",
    "country",
    "saleability",
    "isEbook",
    "amount_listPrice",
    "currencyCode_listPrice",
    "amount_retailPrice",
    "currencyCode_retailPrice",
    "buyLink",
    "year",
    "publisher",
];

/// One catalog item flattened into a single relational row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct BookRecord {
    pub book_id: String,
    pub search_key: String,
    pub book_title: String,
    pub book_subtitle: String,
    pub book_authors: String,
    pub book_description: String,
    #[sqlx(rename = "industryIdentifiers")]
    pub industry_identifiers: String,
    #[sqlx(rename = "text_readingModes")]
    pub text_reading_modes: bool,
    #[sqlx(rename = "image_readingModes")]
    pub image_reading_modes: bool,
    #[sqlx(rename = "pageCount")]
    pub page_count: i32,
    pub categories: String,
    pub language: String,
    #[sqlx(rename = "imageLinks")]
    pub image_links: String,
    #[sqlx(rename = "ratingsCount")]
    pub ratings_count: i32,
    #[sqlx(rename = "averageRating")]
    pub average_rating: Decimal,
    pub country: String,
    pub saleability: String,
    #[sqlx(rename = "isEbook")]
    pub is_ebook: bool,
    #[sqlx(rename = "amount_listPrice")]
    pub amount_list_price: Decimal,
    #[sqlx(rename = "currencyCode_listPrice")]
    pub currency_code_list_price: String,
    #[sqlx(rename = "amount_retailPrice")]
    pub amount_retail_price: Decimal,
    #[sqlx(rename = "currencyCode_retailPrice")]
    pub currency_code_retail_price: String,
    #[sqlx(rename = "buyLink")]
    pub buy_link: String,
    pub year: String,
    pub publisher: String,
}

impl BookRecord {
    /// Normalize one raw catalog item. Total over any well-formed item:
    /// every missing field resolves to its documented default, never an
    /// error.
    pub fn from_item(item: &VolumeItem, search_key: &str) -> Self {
        let info = &item.volume_info;
        let sale = &item.sale_info;

        BookRecord {
            book_id: item.id.clone(),
            search_key: search_key.to_string(),
            book_title: info.title.clone().unwrap_or_else(na),
            book_subtitle: info.subtitle.clone().unwrap_or_else(na),
            book_authors: join_list(info.authors.as_deref()),
            book_description: info.description.clone().unwrap_or_else(na),
            industry_identifiers: info
                .industry_identifiers
                .iter()
                .map(|ident| format!("{}: {}", ident.kind, ident.identifier))
                .join("; "),
            text_reading_modes: info.reading_modes.text,
            image_reading_modes: info.reading_modes.image,
            page_count: info.page_count.unwrap_or(0),
            categories: join_list(info.categories.as_deref()),
            language: info.language.clone().unwrap_or_else(na),
            image_links: info
                .image_links
                .iter()
                .map(|(key, url)| format!("{}: {}", key, url))
                .join("; "),
            ratings_count: info.ratings_count.unwrap_or(0),
            average_rating: to_decimal(info.average_rating.unwrap_or(0.0)),
            country: sale.country.clone().unwrap_or_else(na),
            saleability: sale.saleability.clone().unwrap_or_else(na),
            is_ebook: sale.is_ebook,
            amount_list_price: to_decimal(
                sale.list_price.as_ref().map(|p| p.amount).unwrap_or(0.0),
            ),
            currency_code_list_price: sale
                .list_price
                .as_ref()
                .and_then(|p| p.currency_code.clone())
                .unwrap_or_else(na),
            amount_retail_price: to_decimal(
                sale.retail_price.as_ref().map(|p| p.amount).unwrap_or(0.0),
            ),
            currency_code_retail_price: sale
                .retail_price
                .as_ref()
                .and_then(|p| p.currency_code.clone())
                .unwrap_or_else(na),
            buy_link: sale.buy_link.clone().unwrap_or_else(na),
            year: publication_year(info.published_date.as_deref()),
            publisher: info.publisher.clone().unwrap_or_else(na),
        }
    }

    /// All 25 fields stringified in `COLUMNS` order.
    pub fn fields(&self) -> Vec<String> {
        vec![
            self.book_id.clone(),
            self.search_key.clone(),
            self.book_title.clone(),
            self.book_subtitle.clone(),
            self.book_authors.clone(),
            self.book_description.clone(),
            self.industry_identifiers.clone(),
            self.text_reading_modes.to_string(),
            self.image_reading_modes.to_string(),
            self.page_count.to_string(),
            self.categories.clone(),
            self.language.clone(),
            self.image_links.clone(),
            self.ratings_count.to_string(),
            self.average_rating.to_string(),
            self.country.clone(),
            self.saleability.clone(),
            self.is_ebook.to_string(),
            self.amount_list_price.to_string(),
            self.currency_code_list_price.clone(),
            self.amount_retail_price.to_string(),
            self.currency_code_retail_price.clone(),
            self.buy_link.clone(),
            self.year.clone(),
            self.publisher.clone(),
        ]
    }
}

fn na() -> String {
    NA.to_string()
}

fn join_list(list: Option<&[String]>) -> String {
    match list {
        Some(values) => values.join(", "),
        None => NA.to_string(),
    }
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or_default().round_dp(2)
}

/// The portion of the publication date before the first hyphen.
///
/// An absent date yields the `"N/A"` sentinel, while an empty date string
/// yields an empty year. The latter is a documented quirk kept from the
/// source data pipeline, not an oversight.
pub fn publication_year(published_date: Option<&str>) -> String {
    match published_date {
        Some(date) => date.split('-').next().unwrap_or("").to_string(),
        None => NA.to_string(),
    }
}

/// Serialize a batch to CSV with the 25-column header row.
pub fn to_csv(records: &[BookRecord]) -> String {
    let mut out = COLUMNS.join(",");
    out.push('\n');
    for record in records {
        let row = record.fields().iter().map(|f| csv_field(f)).join(",");
        out.push_str(&row);
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
