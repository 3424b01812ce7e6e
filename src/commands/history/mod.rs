use chrono::DateTime;

pub mod delete;
pub mod export;
pub mod list;
pub mod rate;
pub mod show;

/// Human-readable day for a stored RFC 3339 timestamp; falls back to the
/// raw string for entries written by hand or by older versions.
pub(crate) fn readable_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%d %b %Y").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

/// First 50 characters of a prompt for one-line listings.
pub(crate) fn preview(text: &str) -> String {
    let head: String = text.chars().take(50).collect();
    if head.len() < text.len() {
        format!("{}...", head)
    } else {
        head
    }
}
