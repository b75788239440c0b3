//! Core data model: books as the catalog describes them

mod book;
mod published;

pub use book::{BookDetail, BookRecord, BookSummary, NO_DESCRIPTION};
pub use published::display_published_date;
