//! Book records as returned by the catalog and kept in favorites

use super::published::display_published_date;
use serde::{Deserialize, Serialize};

/// A single search hit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    /// Opaque catalog identifier
    pub id: String,

    pub title: String,

    /// Authors in catalog order (may be empty)
    #[serde(default)]
    pub authors: Vec<String>,

    /// Cover thumbnail, always https
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl BookSummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            authors: Vec::new(),
            thumbnail_url: None,
        }
    }

    /// Add an author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    /// Authors joined for display, if there are any
    pub fn author_line(&self) -> Option<String> {
        join_authors(&self.authors)
    }
}

/// Full record for one volume, fetched from the detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookDetail {
    pub id: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default)]
    pub authors: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    /// Raw catalog date: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    /// Catalog page for the book
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,

    /// Reader preview
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_link: Option<String>,
}

pub const NO_DESCRIPTION: &str = "No description available for this book.";

impl BookDetail {
    /// Narrow to the fields a result card needs
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            authors: self.authors.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
        }
    }

    pub fn author_line(&self) -> Option<String> {
        join_authors(&self.authors)
    }

    pub fn category_line(&self) -> Option<String> {
        (!self.categories.is_empty()).then(|| self.categories.join(", "))
    }

    /// Human-readable publication date
    pub fn published_line(&self) -> Option<String> {
        self.published_date.as_deref().map(display_published_date)
    }

    /// Rating with its review count, e.g. `4.5/5 (120 reviews)`
    pub fn rating_line(&self) -> Option<String> {
        self.average_rating.map(|rating| {
            format!("{}/5 ({} reviews)", rating, self.ratings_count.unwrap_or(0))
        })
    }

    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }
}

/// A favorited book: whichever shape it was favorited from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookRecord {
    Summary(BookSummary),
    Detail(BookDetail),
}

impl BookRecord {
    pub fn id(&self) -> &str {
        match self {
            BookRecord::Summary(book) => &book.id,
            BookRecord::Detail(book) => &book.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            BookRecord::Summary(book) => &book.title,
            BookRecord::Detail(book) => &book.title,
        }
    }

    pub fn summary(&self) -> BookSummary {
        match self {
            BookRecord::Summary(book) => book.clone(),
            BookRecord::Detail(book) => book.summary(),
        }
    }
}

impl From<BookSummary> for BookRecord {
    fn from(book: BookSummary) -> Self {
        BookRecord::Summary(book)
    }
}

impl From<BookDetail> for BookRecord {
    fn from(book: BookDetail) -> Self {
        BookRecord::Detail(book)
    }
}

fn join_authors(authors: &[String]) -> Option<String> {
    (!authors.is_empty()).then(|| authors.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_detail() {
        let detail = BookDetail {
            id: "abc".to_string(),
            title: "Dune".to_string(),
            authors: vec!["Frank Herbert".to_string()],
            page_count: Some(412),
            ..Default::default()
        };
        let summary = detail.summary();
        assert_eq!(summary.id, "abc");
        assert_eq!(summary.author_line().as_deref(), Some("Frank Herbert"));
    }

    #[test]
    fn test_detail_display_fallbacks() {
        let mut detail = BookDetail {
            id: "x".to_string(),
            title: "Untold".to_string(),
            average_rating: Some(4.5),
            ..Default::default()
        };
        assert_eq!(detail.description_or_default(), NO_DESCRIPTION);
        assert_eq!(detail.rating_line().as_deref(), Some("4.5/5 (0 reviews)"));
        assert!(detail.category_line().is_none());

        detail.categories = vec!["Fiction".to_string(), "Classics".to_string()];
        assert_eq!(detail.category_line().as_deref(), Some("Fiction, Classics"));
    }

    #[test]
    fn test_record_serialization_is_tagged() {
        let record = BookRecord::from(BookSummary::new("id1", "Title").with_author("A"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "summary");
        assert_eq!(json["id"], "id1");

        let back: BookRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.title(), "Title");
    }
}
