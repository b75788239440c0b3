//! Show command implementation

use super::spinner;
use crate::app::App;
use anyhow::{bail, Result};
use bookfinder_core::BookDetail;

/// Display details for one book
pub async fn show(app: &App, id: &str) -> Result<()> {
    let pb = spinner(app, format!("Fetching {}...", id))?;
    let outcome = app.catalog().fetch_detail(id).await;
    pb.finish_and_clear();

    let book = match outcome {
        Ok(book) => book,
        Err(e) => {
            tracing::error!("Failed to fetch book {}: {:?}", id, e);
            bail!("{}. Go back with `bookfinder results`.", e);
        }
    };

    if app.json {
        println!("{}", serde_json::to_string_pretty(&book)?);
        return Ok(());
    }

    let is_favorite = app.favorites().await.contains(&book.id);
    print_detail(&book, is_favorite);
    Ok(())
}

fn print_detail(book: &BookDetail, is_favorite: bool) {
    println!("Title:       {}", book.title);
    if let Some(subtitle) = &book.subtitle {
        println!("Subtitle:    {}", subtitle);
    }
    if let Some(authors) = book.author_line() {
        println!("Authors:     {}", authors);
    }
    if let Some(published) = book.published_line() {
        println!("Published:   {}", published);
    }
    if let Some(publisher) = &book.publisher {
        println!("Publisher:   {}", publisher);
    }
    if let Some(categories) = book.category_line() {
        println!("Categories:  {}", categories);
    }
    if let Some(pages) = book.page_count {
        println!("Pages:       {}", pages);
    }
    if let Some(rating) = book.rating_line() {
        println!("Rating:      {}", rating);
    }
    if let Some(cover) = &book.thumbnail_url {
        println!("Cover:       {}", cover);
    }
    if let Some(link) = &book.info_link {
        println!("More info:   {}", link);
    }
    if let Some(link) = &book.preview_link {
        println!("Preview:     {}", link);
    }
    println!("Favorite:    {}", if is_favorite { "yes" } else { "no" });
    println!();
    println!("{}", book.description_or_default());
}
