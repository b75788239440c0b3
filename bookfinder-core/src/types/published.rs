//! Catalog publication dates
//!
//! The catalog reports dates at year, month or day precision. Anything else is
//! shown as given.

use chrono::NaiveDate;

/// Render a catalog date for display
pub fn display_published_date(raw: &str) -> String {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%B %-d, %Y").to_string();
    }

    // Month precision: pin to the first so chrono can parse it
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d") {
        if raw.len() == 7 {
            return date.format("%B %Y").to_string();
        }
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_date() {
        assert_eq!(display_published_date("1965-08-01"), "August 1, 1965");
    }

    #[test]
    fn test_month_precision() {
        assert_eq!(display_published_date("2005-11"), "November 2005");
    }

    #[test]
    fn test_year_and_garbage_pass_through() {
        assert_eq!(display_published_date("1965"), "1965");
        assert_eq!(display_published_date("circa 1900"), "circa 1900");
    }
}
