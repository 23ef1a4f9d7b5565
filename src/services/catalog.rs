use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const CATALOG_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// One page of the volumes listing as returned by the catalog API.
///
/// Every field is optional upstream; missing `items` decodes as an empty
/// list so callers only have to check for emptiness.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumePage {
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub items: Vec<VolumeItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub volume_info: VolumeInfo,
    #[serde(default)]
    pub sale_info: SaleInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub authors: Option<Vec<String>>,
    pub description: Option<String>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
    #[serde(default)]
    pub reading_modes: ReadingModes,
    pub page_count: Option<i32>,
    pub categories: Option<Vec<String>>,
    pub language: Option<String>,
    #[serde(default)]
    pub image_links: BTreeMap<String, String>,
    pub ratings_count: Option<i32>,
    pub average_rating: Option<f64>,
    pub published_date: Option<String>,
    pub publisher: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub identifier: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReadingModes {
    #[serde(default)]
    pub text: bool,
    #[serde(default)]
    pub image: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleInfo {
    pub country: Option<String>,
    pub saleability: Option<String>,
    #[serde(default)]
    pub is_ebook: bool,
    pub list_price: Option<PriceInfo>,
    pub retail_price: Option<PriceInfo>,
    pub buy_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    #[serde(default)]
    pub amount: f64,
    pub currency_code: Option<String>,
}

#[derive(Serialize)]
struct VolumeQuery<'a> {
    key: &'a str,
    q: &'a str,
    #[serde(rename = "startIndex")]
    start_index: u32,
    #[serde(rename = "maxResults")]
    max_results: u32,
}

#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl CatalogClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, CATALOG_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetch one page of results for `query` starting at `start_index`.
    ///
    /// Any failure (non-200 status, transport error, undecodable body) is
    /// logged and collapses to `None`; pagination simply stops there.
    pub async fn fetch_page(
        &self,
        query: &str,
        start_index: u32,
        max_results: u32,
    ) -> Option<VolumePage> {
        let params = VolumeQuery {
            key: &self.api_key,
            q: query,
            start_index,
            max_results,
        };

        match self.client.get(&self.base_url).query(&params).send().await {
            Ok(res) if res.status() == reqwest::StatusCode::OK => {
                match res.json::<VolumePage>().await {
                    Ok(page) => Some(page),
                    Err(e) => {
                        log::error!("Failed to decode catalog response: {:?}", e);
                        None
                    }
                }
            }
            Ok(res) => {
                log::error!("Error fetching data. Status code: {}", res.status().as_u16());
                None
            }
            Err(e) => {
                log::error!("No response from catalog API, error: {:?}", e);
                None
            }
        }
    }
}
