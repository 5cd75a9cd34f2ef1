use crate::error::{Result, ViewerError};

pub fn strip_at(username: &str) -> &str {
    username.strip_prefix('@').unwrap_or(username)
}

/// Strips a leading `@` and checks the 3 to 16 character account name limit.
pub fn validate_username(raw: &str) -> Result<&str> {
    let username = strip_at(raw);
    match username.chars().count() {
        3..=16 => Ok(username),
        _ => Err(ViewerError::InvalidUsername),
    }
}

/// Page numbers that are not integers fall back to the first page.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|page| page.trim().parse().ok()).unwrap_or(1)
}
