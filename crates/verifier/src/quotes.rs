use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub id: String,
    pub text: String,
}

/// Read-only quote table served by the verifier.
#[derive(Debug, Clone)]
pub struct QuoteBook {
    quotes: BTreeMap<u64, String>,
}

impl QuoteBook {
    pub fn new<T: Into<String>>(quotes: impl IntoIterator<Item = (u64, T)>) -> Self {
        Self {
            quotes: quotes.into_iter().map(|(id, text)| (id, text.into())).collect(),
        }
    }

    pub fn get(&self, id: u64) -> Option<&str> {
        self.quotes.get(&id).map(String::as_str)
    }

    pub fn list(&self) -> Vec<Quote> {
        self.quotes
            .iter()
            .map(|(id, text)| Quote {
                id: id.to_string(),
                text: text.clone(),
            })
            .collect()
    }
}

impl Default for QuoteBook {
    fn default() -> Self {
        Self::new([
            (1, "Simplicity is prerequisite for reliability."),
            (2, "Premature optimization is the root of all evil."),
            (3, "Make it work, make it right, make it fast."),
        ])
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawQuoteId {
    Number(u64),
    Text(String),
}

/// Body of a quote lookup: `{"id": "1"}` or `{"id": 1}`.
#[derive(Debug, Deserialize)]
pub struct QuoteLookup {
    id: RawQuoteId,
}

impl QuoteLookup {
    /// The requested id, or `None` when it is not a non-negative integer.
    pub fn id(&self) -> Option<u64> {
        match &self.id {
            RawQuoteId::Number(id) => Some(*id),
            RawQuoteId::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_string_and_number_ids() {
        let text: QuoteLookup = serde_json::from_str(r#"{"id":"2"}"#).unwrap();
        let number: QuoteLookup = serde_json::from_str(r#"{"id":2}"#).unwrap();
        assert_eq!(text.id(), Some(2));
        assert_eq!(number.id(), Some(2));
    }

    #[test]
    fn non_numeric_id_has_no_lookup_key() {
        let lookup: QuoteLookup = serde_json::from_str(r#"{"id":"1 OR 1=1"}"#).unwrap();
        assert_eq!(lookup.id(), None);
    }

    #[test]
    fn list_is_ordered_by_id() {
        let book = QuoteBook::new([(3, "c"), (1, "a")]);
        let ids: Vec<String> = book.list().into_iter().map(|q| q.id).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(book.get(3), Some("c"));
        assert_eq!(book.get(2), None);
    }
}
