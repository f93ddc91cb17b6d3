//! litrelay-pubmed — NCBI E-utilities client and record normalizer.
//!
//! Endpoints used:
//!   esearch:  https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi
//!   esummary: https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esummary.fcgi
//!   efetch:   https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi
//!
//! esummary supplies metadata (title, authors, journal, pubdate, doi);
//! efetch XML supplies abstracts. The two are merged by PMID.

pub mod client;
pub mod merge;
pub mod models;
pub mod xml;

pub use client::PubMedClient;
pub use models::ArticleRecord;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PubMedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),
}

pub type Result<T> = std::result::Result<T, PubMedError>;
