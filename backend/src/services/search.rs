//! Smart search across tickets, knowledge-base articles and holidays.
//!
//! Every provider is queried concurrently with its own deadline. Providers
//! that fail or time out are skipped so one slow table never blanks the
//! whole result list.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use futures::future::join_all;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::{
    models::search::{SearchCategory, SearchDocument, SearchHit, SearchQuery, SearchResponse},
    services::holiday_source::{HolidaySource, HolidaySourceError},
    storage::{get_json, set_json, KeyValueStore, StorageError},
    utils::time::today_local,
};

pub const MIN_QUERY_CHARS: usize = 2;
pub const MAX_SEARCH_LIMIT: usize = 50;
const SNIPPET_CHARS: usize = 140;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search query failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Holidays(#[from] HolidaySourceError),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn category(&self) -> SearchCategory;

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchDocument>, SearchError>;
}

/// Relevance of a document for `query`, or `None` when nothing matches.
pub fn score_document(query: &SearchQuery, title: &str, body: &str) -> Option<u32> {
    let needle = query.text.to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let title = title.to_lowercase();
    let body = body.to_lowercase();

    let mut score = if title == needle {
        100
    } else if title.starts_with(&needle) {
        80
    } else if title.contains(&needle) {
        60
    } else if body.contains(&needle) {
        30
    } else {
        0
    };

    for term in &query.terms {
        if title.contains(term.as_str()) {
            score += 10;
        } else if body.contains(term.as_str()) {
            score += 5;
        }
    }

    if score == 0 {
        return None;
    }
    Some(score.min(100))
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= SNIPPET_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(SNIPPET_CHARS).collect();
    format!("{}...", cut.trim_end())
}

pub struct SmartSearch {
    providers: Vec<Arc<dyn SearchProvider>>,
    provider_timeout: Duration,
}

impl SmartSearch {
    pub fn new(providers: Vec<Arc<dyn SearchProvider>>, provider_timeout: Duration) -> Self {
        Self {
            providers,
            provider_timeout,
        }
    }

    pub async fn search(&self, raw_query: &str, limit: usize) -> SearchResponse {
        let limit = limit.clamp(1, MAX_SEARCH_LIMIT);
        let query = SearchQuery::new(raw_query, limit);

        if query.text.chars().count() < MIN_QUERY_CHARS {
            return SearchResponse {
                query: query.text,
                hits: Vec::new(),
                failed_categories: Vec::new(),
            };
        }

        let lookups = self.providers.iter().map(|provider| {
            let query = &query;
            async move {
                let category = provider.category();
                let outcome =
                    tokio::time::timeout(self.provider_timeout, provider.search(query)).await;
                (category, outcome)
            }
        });

        let mut hits = Vec::new();
        let mut failed_categories = Vec::new();
        for (category, outcome) in join_all(lookups).await {
            match outcome {
                Ok(Ok(documents)) => {
                    hits.extend(documents.into_iter().filter_map(|doc| {
                        score_document(&query, &doc.title, &doc.body).map(|score| SearchHit {
                            id: doc.id,
                            category,
                            snippet: snippet(&doc.body),
                            title: doc.title,
                            score,
                        })
                    }));
                }
                Ok(Err(err)) => {
                    tracing::warn!(category = category.as_str(), error = %err, "Search provider failed");
                    failed_categories.push(category);
                }
                Err(_) => {
                    tracing::warn!(
                        category = category.as_str(),
                        timeout = ?self.provider_timeout,
                        "Search provider timed out"
                    );
                    failed_categories.push(category);
                }
            }
        }

        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits.truncate(limit);

        tracing::debug!(query = %query.text, hits = hits.len(), "Smart search finished");
        SearchResponse {
            query: query.text,
            hits,
            failed_categories,
        }
    }
}

/// Searches holiday labels of the current year.
pub struct HolidaySearchProvider {
    source: Arc<dyn HolidaySource>,
    time_zone: Tz,
}

impl HolidaySearchProvider {
    pub fn new(source: Arc<dyn HolidaySource>, time_zone: Tz) -> Self {
        Self { source, time_zone }
    }
}

#[async_trait]
impl SearchProvider for HolidaySearchProvider {
    fn category(&self) -> SearchCategory {
        SearchCategory::Holiday
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchDocument>, SearchError> {
        let year = today_local(&self.time_zone).year();
        let (start, end) = match (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) {
            (Some(start), Some(end)) => (start, end),
            _ => return Ok(Vec::new()),
        };

        let needle = query.text.to_lowercase();
        let holidays = self.source.fetch_holidays(start, end).await?;
        Ok(holidays
            .into_iter()
            .filter(|h| {
                let label = h.label.to_lowercase();
                label.contains(&needle) || query.terms.iter().any(|t| label.contains(t.as_str()))
            })
            .take(query.limit)
            .map(|h| SearchDocument {
                id: h.date.to_string(),
                body: format!("{} ({}) on {}", h.label, h.kind, h.date.format("%d/%m/%Y")),
                title: h.label,
            })
            .collect())
    }
}

const HISTORY_KEY: &str = "search:history";
pub const HISTORY_LIMIT: usize = 10;

/// Most recent distinct search queries, newest first.
pub struct SearchHistory {
    store: Arc<dyn KeyValueStore>,
    // Serializes the read-modify-write of the stored list.
    write_lock: Mutex<()>,
}

impl SearchHistory {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> Result<Vec<String>, StorageError> {
        Ok(get_json(self.store.as_ref(), HISTORY_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn record(&self, query: &str) -> Result<Vec<String>, StorageError> {
        let query = query.split_whitespace().collect::<Vec<_>>().join(" ");
        if query.chars().count() < MIN_QUERY_CHARS {
            return self.list().await;
        }

        let _guard = self.write_lock.lock().await;
        let folded = query.to_lowercase();
        let mut history = self.list().await?;
        history.retain(|previous| previous.to_lowercase() != folded);
        history.insert(0, query);
        history.truncate(HISTORY_LIMIT);

        set_json(self.store.as_ref(), HISTORY_KEY, &history).await?;
        Ok(history)
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        self.store.remove(HISTORY_KEY).await
    }
}
