//! Parser for efetch abstract XML (`<PubmedArticleSet>` documents).
//!
//! Only the PMID and the abstract fragments are extracted here; all other
//! metadata comes from esummary. Fragments keep their section `Label`
//! attribute as a `"Label: text"` prefix and are joined with newlines.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::Result;

/// One `<PubmedArticle>` reduced to its identifier and abstract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractDoc {
    pub pmid: String,
    pub abstract_text: Option<String>,
}

/// Parse efetch XML into per-article abstract documents, in document order.
///
/// Articles without a PMID are discarded. Inline markup inside
/// `<AbstractText>` (e.g. `<i>`, `<sup>`) contributes its text content.
pub fn parse_abstract_xml(xml: &str) -> Result<Vec<AbstractDoc>> {
    let mut docs = Vec::new();
    // Text events are not trimmed individually: that would eat the spacing
    // around inline markup. Fragments are trimmed at their boundaries only.
    let mut reader = Reader::from_str(xml);

    let mut in_article = false;
    let mut pmid: Option<String> = None;
    let mut fragments: Vec<String> = Vec::new();

    let mut in_pmid = false;
    // Depth inside the current <AbstractText>, 0 when outside.
    let mut abstract_depth = 0usize;
    let mut fragment = String::new();
    let mut label: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                if abstract_depth > 0 {
                    abstract_depth += 1;
                    continue;
                }
                match e.name().as_ref() {
                    b"PubmedArticle" => {
                        in_article = true;
                        pmid = None;
                        fragments.clear();
                    }
                    b"PMID" if in_article && pmid.is_none() => in_pmid = true,
                    b"AbstractText" if in_article => {
                        abstract_depth = 1;
                        fragment.clear();
                        label = match e
                            .try_get_attribute("Label")
                            .map_err(quick_xml::Error::from)?
                        {
                            Some(attr) => Some(
                                attr.unescape_value()
                                    .map_err(quick_xml::Error::from)?
                                    .into_owned(),
                            ),
                            None => None,
                        };
                    }
                    _ => {}
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape().map_err(quick_xml::Error::from)?;
                if abstract_depth > 0 {
                    fragment.push_str(&text);
                } else if in_pmid {
                    pmid = Some(text.trim().to_string());
                }
            }
            Event::End(ref e) => {
                if abstract_depth > 0 {
                    abstract_depth -= 1;
                    if abstract_depth == 0 {
                        let text = fragment.trim();
                        fragments.push(match label.take() {
                            Some(l) => format!("{}: {}", l, text),
                            None => text.to_string(),
                        });
                    }
                    continue;
                }
                match e.name().as_ref() {
                    b"PMID" => in_pmid = false,
                    b"PubmedArticle" => {
                        if let Some(id) = pmid.take() {
                            docs.push(AbstractDoc {
                                pmid: id,
                                abstract_text: if fragments.is_empty() {
                                    None
                                } else {
                                    Some(fragments.join("\n"))
                                },
                            });
                        }
                        in_article = false;
                        fragments.clear();
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(docs)
}
