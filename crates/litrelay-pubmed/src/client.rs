//! E-utilities HTTP client with a fixed courtesy delay after each call.

use std::time::Duration;

use tracing::{debug, instrument};

use crate::merge::merge_abstracts;
use crate::models::ArticleRecord;
use crate::xml::parse_abstract_xml;
use crate::Result;

const ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
const ESUMMARY_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esummary.fcgi";
const EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

// NCBI allows roughly 10 req/s with an API key and 3 req/s without; the
// post-call sleep is a fixed local policy, not a negotiated limit.
const SLEEP_WITH_KEY: Duration = Duration::from_millis(110);
const SLEEP_NO_KEY: Duration = Duration::from_millis(350);

/// Date bounds for esearch, applied as `datetype=pdat` when either is set.
#[derive(Debug, Clone, Default)]
pub struct DateRange {
    pub mindate: Option<String>,
    pub maxdate: Option<String>,
}

pub struct PubMedClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl PubMedClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    fn base_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("db", "pubmed".to_string())];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }

    async fn courtesy_delay(&self) {
        let pause = if self.api_key.is_some() {
            SLEEP_WITH_KEY
        } else {
            SLEEP_NO_KEY
        };
        tokio::time::sleep(pause).await;
    }

    /// Search PubMed and return matching PMIDs, most relevant first.
    #[instrument(skip(self))]
    pub async fn esearch(
        &self,
        query: &str,
        retmax: usize,
        dates: &DateRange,
    ) -> Result<Vec<String>> {
        let mut params = self.base_params();
        params.push(("term", query.to_string()));
        params.push(("retmode", "json".to_string()));
        params.push(("retmax", retmax.to_string()));
        params.push(("sort", "relevance".to_string()));
        if dates.mindate.is_some() || dates.maxdate.is_some() {
            params.push(("mindate", dates.mindate.clone().unwrap_or_else(|| "1800".into())));
            params.push(("maxdate", dates.maxdate.clone().unwrap_or_else(|| "3000".into())));
            params.push(("datetype", "pdat".to_string()));
        }

        let resp: serde_json::Value = self
            .client
            .get(ESEARCH_URL)
            .query(&params)
            .timeout(Duration::from_secs(30))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        self.courtesy_delay().await;

        let ids: Vec<String> = resp["esearchresult"]["idlist"]
            .as_array()
            .unwrap_or(&vec![])
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect();

        debug!(count = ids.len(), "esearch returned PMIDs");
        Ok(ids)
    }

    /// Fetch summary metadata (no abstracts) for the given PMIDs.
    ///
    /// PMIDs the service omits from its response are silently skipped;
    /// partial results are acceptable on this path.
    #[instrument(skip(self, pmids), fields(n = pmids.len()))]
    pub async fn esummary(&self, pmids: &[String]) -> Result<Vec<ArticleRecord>> {
        if pmids.is_empty() {
            return Ok(vec![]);
        }

        let mut params = self.base_params();
        params.push(("id", pmids.join(",")));
        params.push(("retmode", "json".to_string()));

        let resp: serde_json::Value = self
            .client
            .get(ESUMMARY_URL)
            .query(&params)
            .timeout(Duration::from_secs(60))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        self.courtesy_delay().await;

        Ok(records_from_esummary(&resp))
    }

    /// Fetch metadata via esummary plus abstracts via efetch XML, merged by
    /// PMID. Two upstream calls; output order follows the efetch document
    /// order.
    #[instrument(skip(self, pmids), fields(n = pmids.len()))]
    pub async fn fetch_with_abstracts(&self, pmids: &[String]) -> Result<Vec<ArticleRecord>> {
        if pmids.is_empty() {
            return Ok(vec![]);
        }

        let summaries = self.esummary(pmids).await?;

        let mut params = self.base_params();
        params.push(("id", pmids.join(",")));
        params.push(("retmode", "xml".to_string()));
        params.push(("rettype", "abstract".to_string()));

        let xml = self
            .client
            .get(EFETCH_URL)
            .query(&params)
            .timeout(Duration::from_secs(90))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        self.courtesy_delay().await;

        let docs = parse_abstract_xml(&xml)?;
        Ok(merge_abstracts(summaries, docs))
    }
}

/// Map an esummary JSON body into article records.
///
/// The body's `result` object carries a `uids` array plus one object per
/// uid; uids without a backing object are dropped.
pub fn records_from_esummary(body: &serde_json::Value) -> Vec<ArticleRecord> {
    let result = &body["result"];
    let uids = result["uids"].as_array().cloned().unwrap_or_default();

    let mut records = Vec::new();
    for uid in uids.iter().filter_map(|u| u.as_str()) {
        let Some(item) = result.get(uid).filter(|v| v.is_object()) else {
            continue;
        };

        let authors: Vec<String> = item["authors"]
            .as_array()
            .unwrap_or(&vec![])
            .iter()
            .filter_map(|a| a["name"].as_str().map(String::from))
            .collect();

        let journal = item["fulljournalname"]
            .as_str()
            .filter(|s| !s.is_empty())
            .or_else(|| item["source"].as_str())
            .map(String::from);

        let doi = item["articleids"]
            .as_array()
            .unwrap_or(&vec![])
            .iter()
            .find(|id| id["idtype"].as_str() == Some("doi"))
            .and_then(|id| id["value"].as_str())
            .map(String::from);

        records.push(ArticleRecord {
            pmid: uid.to_string(),
            title: item["title"].as_str().map(String::from),
            authors,
            journal,
            pubdate: item["pubdate"].as_str().map(String::from),
            doi,
            abstract_text: None,
        });
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_summary_fields() {
        let body = json!({
            "result": {
                "uids": ["101"],
                "101": {
                    "title": "LLMs in systematic reviews",
                    "authors": [{"name": "Smith J"}, {"name": "Doe A"}],
                    "fulljournalname": "Journal of Informatics",
                    "source": "J Inform",
                    "pubdate": "2024 Mar",
                    "articleids": [
                        {"idtype": "pubmed", "value": "101"},
                        {"idtype": "doi", "value": "10.1000/jinf.101"},
                        {"idtype": "doi", "value": "10.1000/ignored"}
                    ]
                }
            }
        });

        let records = records_from_esummary(&body);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.pmid, "101");
        assert_eq!(r.title.as_deref(), Some("LLMs in systematic reviews"));
        assert_eq!(r.authors, vec!["Smith J", "Doe A"]);
        assert_eq!(r.journal.as_deref(), Some("Journal of Informatics"));
        assert_eq!(r.doi.as_deref(), Some("10.1000/jinf.101"));
        assert_eq!(r.abstract_text, None);
    }

    #[test]
    fn journal_falls_back_to_source() {
        let body = json!({
            "result": {
                "uids": ["7"],
                "7": {"source": "Lancet", "fulljournalname": ""}
            }
        });

        let records = records_from_esummary(&body);
        assert_eq!(records[0].journal.as_deref(), Some("Lancet"));
    }

    #[test]
    fn missing_entries_are_skipped_and_order_preserved() {
        let body = json!({
            "result": {
                "uids": ["1", "2", "3"],
                "1": {"title": "first"},
                "3": {"title": "third"}
            }
        });

        let records = records_from_esummary(&body);
        let pmids: Vec<_> = records.iter().map(|r| r.pmid.as_str()).collect();
        assert_eq!(pmids, vec!["1", "3"]);
    }

    #[test]
    fn missing_authors_yield_empty_list() {
        let body = json!({
            "result": {"uids": ["5"], "5": {"title": "no authors"}}
        });

        let records = records_from_esummary(&body);
        assert!(records[0].authors.is_empty());
    }
}
