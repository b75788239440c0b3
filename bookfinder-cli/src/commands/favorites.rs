//! Favorite toggling and listing

use super::{print_card, spinner};
use crate::app::App;
use anyhow::{Context, Result};
use bookfinder_core::BookRecord;
use serde::Serialize;

#[derive(Serialize)]
struct ToggleOutcome<'a> {
    id: &'a str,
    title: &'a str,
    favorite: bool,
    count: usize,
}

/// Add a book to favorites, or remove it if present.
///
/// The record stored is the one already favorited, else the matching card from
/// the last search, else the book's full detail from the catalog.
pub async fn favorite(app: &App, id: &str) -> Result<()> {
    let mut store = app.favorites().await;

    let record: BookRecord = match store.favorites().get(id) {
        Some(existing) => existing.clone(),
        None => {
            let search = app.search().await;
            match search.state().results.iter().find(|b| b.id == id) {
                Some(book) => book.clone().into(),
                None => {
                    let pb = spinner(app, format!("Fetching {}...", id))?;
                    let detail = app.catalog().fetch_detail(id).await;
                    pb.finish_and_clear();
                    detail
                        .with_context(|| format!("Could not look up book {}", id))?
                        .into()
                }
            }
        }
    };

    let set = store.toggle(record.clone()).await;
    let outcome = ToggleOutcome {
        id: record.id(),
        title: record.title(),
        favorite: set.contains(record.id()),
        count: set.len(),
    };

    if app.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if outcome.favorite {
        println!("Added \"{}\" to favorites ({} total)", outcome.title, outcome.count);
    } else {
        println!(
            "Removed \"{}\" from favorites ({} total)",
            outcome.title, outcome.count
        );
    }
    Ok(())
}

/// List favorites in the order they were added
pub async fn favorites(app: &App) -> Result<()> {
    let store = app.favorites().await;
    let set = store.favorites();

    if app.json {
        println!("{}", serde_json::to_string_pretty(set)?);
        return Ok(());
    }

    match set.len() {
        0 => {
            println!("You haven't added any favorites yet");
            println!("Start adding books to your favorites from the search results.");
        }
        1 => println!("You have 1 favorite book"),
        n => println!("You have {} favorite books", n),
    }

    for (number, record) in (1..).zip(set.iter()) {
        print_card(number, &record.summary(), true);
    }
    Ok(())
}
