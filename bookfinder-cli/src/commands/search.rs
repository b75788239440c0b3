//! Search and paging commands

use super::{print_card, spinner};
use crate::app::App;
use anyhow::{bail, Result};
use bookfinder_core::search::SearchPhase;
use bookfinder_core::{FavoritesSet, SearchController, SearchView};

/// Page movement requested on the command line
#[derive(Debug, Clone, Copy)]
pub enum Nav {
    To(u32),
    First,
    Previous,
    Next,
    Last,
}

/// Run a new search from page 1
pub async fn search(app: &App, query: &str) -> Result<()> {
    if query.trim().is_empty() {
        bail!("Enter a search term to find books.");
    }

    let mut controller = app.search().await;
    let pb = spinner(app, format!("Searching for \"{}\"...", query.trim()))?;
    controller.submit(query).await;
    pb.finish_and_clear();

    report(app, &controller).await
}

/// Move through the pages of the saved search
pub async fn navigate(app: &App, nav: Nav) -> Result<()> {
    let mut controller = app.search().await;
    if controller.state().phase == SearchPhase::Idle {
        bail!("No previous search. Run `bookfinder search <query>` first.");
    }

    let pb = spinner(app, "Loading books...".to_string())?;
    match nav {
        Nav::To(page) => controller.change_page(page).await,
        Nav::First => controller.first_page().await,
        Nav::Previous => controller.previous_page().await,
        Nav::Next => controller.next_page().await,
        Nav::Last => controller.last_page().await,
    };
    pb.finish_and_clear();

    report(app, &controller).await
}

/// Show the saved search as-is
pub async fn results(app: &App) -> Result<()> {
    let controller = app.search().await;
    report(app, &controller).await
}

pub async fn clear(app: &App) -> Result<()> {
    let mut controller = app.search().await;
    controller.clear().await;

    if app.json {
        println!("{}", serde_json::to_string_pretty(&controller.view())?);
    } else {
        println!("Search cleared");
    }
    Ok(())
}

async fn report(app: &App, controller: &SearchController) -> Result<()> {
    let view = controller.view();

    if app.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        let favorites = app.favorites().await;
        render(&view, favorites.favorites());
    }

    match (&view.state.phase, &view.state.error_message) {
        (SearchPhase::Error, Some(message)) => bail!("{}", message),
        (_, Some(message)) => {
            eprintln!("Note: {}", message);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn render(view: &SearchView, favorites: &FavoritesSet) {
    let state = &view.state;

    let Some(range) = view.range else {
        if let Some(message) = view.empty_message {
            println!("{}", message);
        }
        return;
    };

    let heading = if state.query.is_empty() {
        "Previous Search Results".to_string()
    } else {
        format!("Results for \"{}\"", state.query)
    };
    println!(
        "{} (Showing {}-{} of {} books)",
        heading, range.first, range.last, range.of
    );
    println!();

    for (number, book) in (range.first..).zip(&state.results) {
        print_card(number, book, favorites.contains(&book.id));
    }

    if view.total_pages > 1 {
        let window: Vec<String> = view
            .page_window
            .iter()
            .map(|&page| {
                if page == state.current_page {
                    format!("[{}]", page)
                } else {
                    page.to_string()
                }
            })
            .collect();
        println!();
        println!(
            "Page {} of {}:  {}",
            state.current_page,
            view.total_pages,
            window.join(" ")
        );
    }
}
