//! Merge esummary metadata with efetch abstracts, keyed by PMID.

use std::collections::HashMap;

use crate::models::ArticleRecord;
use crate::xml::AbstractDoc;

/// Combine summary records with parsed abstract documents.
///
/// Pure fold over the two inputs: for every parsed document (in document
/// order), the matching summary record gains the abstract; a document whose
/// PMID has no summary entry still yields a record carrying only the PMID
/// and abstract. Summary entries with no corresponding document are dropped,
/// mirroring the fact that efetch is the authoritative document list here.
pub fn merge_abstracts(summaries: Vec<ArticleRecord>, docs: Vec<AbstractDoc>) -> Vec<ArticleRecord> {
    let lookup: HashMap<String, ArticleRecord> = summaries
        .into_iter()
        .map(|r| (r.pmid.clone(), r))
        .collect();

    docs.into_iter()
        .map(|doc| match lookup.get(&doc.pmid) {
            Some(meta) => ArticleRecord {
                abstract_text: doc.abstract_text,
                ..meta.clone()
            },
            None => ArticleRecord {
                abstract_text: doc.abstract_text,
                ..ArticleRecord::bare(doc.pmid)
            },
        })
        .collect()
}
