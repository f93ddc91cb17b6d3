//! SQL extraction from model responses.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SQL_FENCE: Regex = Regex::new(r"(?is)```sql\s*(.*?)```").unwrap();
    static ref ANY_FENCE: Regex = Regex::new(r"(?s)```\s*(.*?)```").unwrap();
}

/// Pull the SQL statement out of a model response.
///
/// Preference order: a ```sql fenced block, any fenced block, then the
/// trimmed response as a whole.
pub fn extract_sql(text: &str) -> String {
    if let Some(caps) = SQL_FENCE.captures(text) {
        return caps[1].trim().to_string();
    }
    if let Some(caps) = ANY_FENCE.captures(text) {
        return caps[1].trim().to_string();
    }
    text.trim().to_string()
}
