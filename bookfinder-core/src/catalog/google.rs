//! Google Books volumes API client

use super::{CatalogClient, SearchPage};
use crate::error::FetchError;
use crate::types::{BookDetail, BookSummary};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1";

/// Client for `<base>/volumes` endpoints
#[derive(Debug, Clone)]
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
}

impl GoogleBooksClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for GoogleBooksClient {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL)
    }
}

#[async_trait]
impl CatalogClient for GoogleBooksClient {
    async fn search(
        &self,
        query: &str,
        start_offset: u32,
        page_size: u32,
    ) -> Result<SearchPage, FetchError> {
        let url = format!("{}/volumes", self.base_url);
        tracing::debug!(
            "GET {} q={:?} startIndex={} maxResults={}",
            url,
            query,
            start_offset,
            page_size
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.to_string()),
                ("startIndex", start_offset.to_string()),
                ("maxResults", page_size.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::SearchRejected {
                status: response.status().as_u16(),
            });
        }

        let body: Value = response.json().await?;
        Ok(parse_volume_list(&body))
    }

    async fn fetch_detail(&self, id: &str) -> Result<BookDetail, FetchError> {
        let url = format!("{}/volumes/{}", self.base_url, urlencoding::encode(id));
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::BookUnavailable {
                status: response.status().as_u16(),
            });
        }

        let volume: Volume = response.json().await?;
        Ok(volume.into_detail())
    }
}

/// A volume as the API returns it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    id: String,
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VolumeInfo {
    title: Option<String>,
    subtitle: Option<String>,
    authors: Vec<String>,
    publisher: Option<String>,
    published_date: Option<String>,
    description: Option<String>,
    categories: Vec<String>,
    page_count: Option<u32>,
    average_rating: Option<f32>,
    ratings_count: Option<u32>,
    image_links: Option<ImageLinks>,
    info_link: Option<String>,
    preview_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ImageLinks {
    thumbnail: Option<String>,
    small_thumbnail: Option<String>,
}

impl VolumeInfo {
    fn thumbnail_url(&self) -> Option<String> {
        let links = self.image_links.as_ref()?;
        links
            .thumbnail
            .as_deref()
            .or(links.small_thumbnail.as_deref())
            .map(secure_url)
    }

    fn title(&self) -> String {
        self.title.clone().unwrap_or_default()
    }
}

impl Volume {
    fn into_summary(self) -> BookSummary {
        BookSummary {
            thumbnail_url: self.volume_info.thumbnail_url(),
            title: self.volume_info.title(),
            authors: self.volume_info.authors,
            id: self.id,
        }
    }

    fn into_detail(self) -> BookDetail {
        let info = self.volume_info;
        BookDetail {
            thumbnail_url: info.thumbnail_url(),
            title: info.title(),
            id: self.id,
            subtitle: info.subtitle,
            authors: info.authors,
            publisher: info.publisher,
            published_date: info.published_date,
            categories: info.categories,
            page_count: info.page_count,
            average_rating: info.average_rating,
            ratings_count: info.ratings_count,
            description: info.description,
            info_link: info.info_link,
            preview_link: info.preview_link,
        }
    }
}

/// Catalog thumbnails are often plain http
fn secure_url(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

/// Decode a `{items, totalItems}` body.
///
/// A missing or non-array `items` is an empty page; single items that do not
/// decode are skipped.
fn parse_volume_list(body: &Value) -> SearchPage {
    let total_matches = body
        .get("totalItems")
        .and_then(Value::as_u64)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(0);

    let items = match body.get("items").and_then(Value::as_array) {
        Some(raw) => raw
            .iter()
            .filter_map(|item| match Volume::deserialize(item) {
                Ok(volume) => Some(volume.into_summary()),
                Err(e) => {
                    tracing::warn!("Skipping malformed catalog item: {}", e);
                    None
                }
            })
            .collect(),
        None => Vec::new(),
    };

    SearchPage {
        items,
        total_matches,
    }
}
