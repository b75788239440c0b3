//! CLI command implementations

mod detail;
mod favorites;
mod search;

pub use detail::show;
pub use favorites::{favorite, favorites};
pub use search::{clear, navigate, results, search, Nav};

use crate::app::App;
use anyhow::Result;
use bookfinder_core::BookSummary;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a catalog request is in flight; hidden for JSON output
fn spinner(app: &App, message: String) -> Result<ProgressBar> {
    if app.json {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    Ok(pb)
}

/// One result card: number, title, favorite marker, authors and id
fn print_card(number: u32, book: &BookSummary, is_favorite: bool) {
    let marker = if is_favorite { " [favorite]" } else { "" };
    println!("{:>4}. {}{}", number, book.title, marker);
    if let Some(authors) = book.author_line() {
        println!("      by {}", authors);
    }
    println!("      id: {}", book.id);
}
