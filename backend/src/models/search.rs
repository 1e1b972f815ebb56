use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchCategory {
    Ticket,
    Article,
    Holiday,
}

impl SearchCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchCategory::Ticket => "ticket",
            SearchCategory::Article => "article",
            SearchCategory::Holiday => "holiday",
        }
    }
}

/// Normalized search input handed to every provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub terms: Vec<String>,
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(raw: &str, limit: usize) -> Self {
        let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let terms = text
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Self { text, terms, limit }
    }

    /// `%text%` pattern for SQL `ILIKE` filters.
    pub fn like_pattern(&self) -> String {
        let escaped = self
            .text
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    }
}

/// Raw candidate returned by a provider before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDocument {
    pub id: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub category: SearchCategory,
    pub title: String,
    pub snippet: String,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub failed_categories: Vec<SearchCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_collapses_whitespace_and_lowercases_terms() {
        let query = SearchQuery::new("  Printer   NOT working ", 10);
        assert_eq!(query.text, "Printer NOT working");
        assert_eq!(query.terms, vec!["printer", "not", "working"]);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        let query = SearchQuery::new("100%_done", 5);
        assert_eq!(query.like_pattern(), "%100\\%\\_done%");
    }
}
