//! Text search over the ticket and knowledge-base tables.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    models::search::{SearchCategory, SearchDocument, SearchQuery},
    services::search::{SearchError, SearchProvider},
};

const TICKETS_TABLE: &str = "tickets";
const TICKET_COLUMNS: &str = "id, title, description";
const ARTICLES_TABLE: &str = "knowledge_articles";
const ARTICLE_COLUMNS: &str = "id, title, content";

#[derive(Debug, FromRow)]
struct TicketMatch {
    id: Uuid,
    title: String,
    description: Option<String>,
}

#[derive(Debug, FromRow)]
struct ArticleMatch {
    id: Uuid,
    title: String,
    content: String,
}

fn ticket_query() -> String {
    format!(
        "SELECT {} FROM {} \
         WHERE title ILIKE $1 OR description ILIKE $1 \
         ORDER BY updated_at DESC LIMIT $2",
        TICKET_COLUMNS, TICKETS_TABLE
    )
}

fn article_query() -> String {
    format!(
        "SELECT {} FROM {} \
         WHERE published AND (title ILIKE $1 OR content ILIKE $1) \
         ORDER BY updated_at DESC LIMIT $2",
        ARTICLE_COLUMNS, ARTICLES_TABLE
    )
}

#[derive(Clone)]
pub struct PgTicketSearch {
    pool: PgPool,
}

impl PgTicketSearch {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SearchProvider for PgTicketSearch {
    fn category(&self) -> SearchCategory {
        SearchCategory::Ticket
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchDocument>, SearchError> {
        let rows = sqlx::query_as::<_, TicketMatch>(&ticket_query())
            .bind(query.like_pattern())
            .bind(query.limit as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| SearchDocument {
                id: row.id.to_string(),
                title: row.title,
                body: row.description.unwrap_or_default(),
            })
            .collect())
    }
}

#[derive(Clone)]
pub struct PgArticleSearch {
    pool: PgPool,
}

impl PgArticleSearch {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SearchProvider for PgArticleSearch {
    fn category(&self) -> SearchCategory {
        SearchCategory::Article
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchDocument>, SearchError> {
        let rows = sqlx::query_as::<_, ArticleMatch>(&article_query())
            .bind(query.like_pattern())
            .bind(query.limit as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| SearchDocument {
                id: row.id.to_string(),
                title: row.title,
                body: row.content,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_query_filters_title_and_description() {
        let sql = ticket_query();
        assert!(sql.contains("FROM tickets"));
        assert!(sql.contains("description ILIKE $1"));
        assert!(sql.ends_with("LIMIT $2"));
    }

    #[test]
    fn article_query_only_returns_published_articles() {
        let sql = article_query();
        assert!(sql.contains("FROM knowledge_articles"));
        assert!(sql.contains("WHERE published"));
    }
}
