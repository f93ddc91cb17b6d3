//! Canonical article record shared across the relay.

use serde::{Deserialize, Serialize};

/// Normalized representation of one PubMed article.
///
/// `pmid` is always present; every other field is optional and defaults to
/// `None` (or an empty author list) when the backing endpoint does not
/// provide it. Abstracts are only populated on the full-text path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub pmid: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Author display names in citation order; duplicates are kept.
    #[serde(default)]
    pub authors: Vec<String>,
    /// Full journal name when available, else the abbreviated source name.
    #[serde(default)]
    pub journal: Option<String>,
    /// Free-form date string as returned by the API; not parsed.
    #[serde(default)]
    pub pubdate: Option<String>,
    /// First DOI found among the article id list.
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
}

impl ArticleRecord {
    /// A record carrying nothing but its identifier.
    pub fn bare(pmid: impl Into<String>) -> Self {
        Self {
            pmid: pmid.into(),
            title: None,
            authors: Vec::new(),
            journal: None,
            pubdate: None,
            doi: None,
            abstract_text: None,
        }
    }
}
