//! Local safety policy for generated SQL.
//!
//! The checks are textual on purpose: substring bans over SQL parsing trade
//! false positives (a column literally named "updated" is rejected) for a
//! small, auditable enforcement boundary. Callers must treat this filter,
//! not the prompt instructions, as the gate before execution.

use lazy_static::lazy_static;
use regex::Regex;

/// Keywords whose presence anywhere in the statement causes rejection.
const BANNED: [&str; 9] = [
    "insert", "update", "delete", "drop", "alter", "truncate", "create", "grant", "revoke",
];

lazy_static! {
    static ref LIMIT_CLAUSE: Regex = Regex::new(r"(?i)\blimit\s+(\d+)\b").unwrap();
}

/// Check a statement against the read-only policy: it must start with
/// `select` (case-insensitive), contain no statement separator, and contain
/// none of the mutating keywords as a substring.
pub fn is_sql_safe(sql: &str) -> bool {
    let s = sql.trim().to_lowercase();
    if !s.starts_with("select") {
        return false;
    }
    if s.contains(';') {
        return false;
    }
    !BANNED.iter().any(|kw| s.contains(kw))
}

/// Cap the statement's row count: an existing `LIMIT n` is rewritten to
/// `LIMIT min(n, cap)`, otherwise `LIMIT cap` is appended. Idempotent, and
/// leaves the rest of the statement untouched.
pub fn enforce_row_limit(sql: &str, cap: u32) -> String {
    if LIMIT_CLAUSE.is_match(sql) {
        LIMIT_CLAUSE
            .replace_all(sql, |caps: &regex::Captures| {
                let existing: u32 = caps[1].parse().unwrap_or(cap);
                format!("LIMIT {}", existing.min(cap))
            })
            .into_owned()
    } else {
        format!("{} LIMIT {}", sql.trim_end(), cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_select() {
        assert!(is_sql_safe("SELECT title FROM articles LIMIT 10"));
    }

    #[test]
    fn rejects_semicolon() {
        assert!(!is_sql_safe("SELECT * FROM articles; DROP TABLE articles"));
    }

    #[test]
    fn rejects_non_select() {
        assert!(!is_sql_safe("DELETE FROM articles"));
        assert!(!is_sql_safe("WITH x AS (SELECT 1) SELECT * FROM x"));
    }

    #[test]
    fn rejects_any_keyword_casing() {
        assert!(is_sql_safe("Select title FROM articles"));
        assert!(!is_sql_safe("SELECT 1 FROM articles WHERE title = 'x' UNION INSERT"));
        assert!(!is_sql_safe("select * from articles where Drop_it = 1"));
    }

    #[test]
    fn substring_ban_hits_column_names_too() {
        // Documented limitation of the textual policy.
        assert!(!is_sql_safe("SELECT updated FROM articles"));
    }

    #[test]
    fn existing_limit_is_capped() {
        assert_eq!(
            enforce_row_limit("SELECT title FROM articles LIMIT 500", 100),
            "SELECT title FROM articles LIMIT 100"
        );
    }

    #[test]
    fn smaller_existing_limit_is_kept() {
        assert_eq!(
            enforce_row_limit("SELECT title FROM articles LIMIT 5", 100),
            "SELECT title FROM articles LIMIT 5"
        );
    }

    #[test]
    fn missing_limit_is_appended() {
        assert_eq!(
            enforce_row_limit("SELECT title FROM articles", 50),
            "SELECT title FROM articles LIMIT 50"
        );
    }

    #[test]
    fn rewrite_is_idempotent() {
        let once = enforce_row_limit("select doi from articles limit 300", 100);
        let twice = enforce_row_limit(&once, 100);
        assert_eq!(once, twice);
    }

    #[test]
    fn lowercase_limit_is_recognized() {
        assert_eq!(
            enforce_row_limit("select doi from articles limit 7", 3),
            "select doi from articles LIMIT 3"
        );
    }
}
