mod support;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::Datelike;
use napje_backend::{
    models::search::{SearchCategory, SearchDocument, SearchQuery},
    services::{
        holiday_source::StaticHolidaySource,
        search::{HolidaySearchProvider, SearchError, SearchProvider, SmartSearch},
    },
    utils::time::today_local,
};
use support::{national, ymd};

struct FixedProvider {
    category: SearchCategory,
    delay: Duration,
    documents: Vec<SearchDocument>,
}

#[async_trait]
impl SearchProvider for FixedProvider {
    fn category(&self) -> SearchCategory {
        self.category
    }

    async fn search(&self, _query: &SearchQuery) -> Result<Vec<SearchDocument>, SearchError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.documents.clone())
    }
}

fn tickets(delay: Duration) -> Arc<dyn SearchProvider> {
    Arc::new(FixedProvider {
        category: SearchCategory::Ticket,
        delay,
        documents: vec![SearchDocument {
            id: "42".into(),
            title: "Vacation request stuck".into(),
            body: "The vacation form does not submit".into(),
        }],
    })
}

fn holiday_provider() -> Arc<dyn SearchProvider> {
    let tz = chrono_tz::America::Sao_Paulo;
    let year = today_local(&tz).year();
    let source = StaticHolidaySource::new(vec![
        national(ymd(year, 12, 25), "Christmas"),
        national(ymd(year, 11, 15), "Republic Day"),
    ]);
    Arc::new(HolidaySearchProvider::new(Arc::new(source), tz))
}

#[tokio::test]
async fn holidays_are_searchable_by_label() {
    let search = SmartSearch::new(vec![holiday_provider()], Duration::from_secs(1));

    let response = search.search("christmas", 10).await;
    assert_eq!(response.hits.len(), 1);
    assert_eq!(response.hits[0].category, SearchCategory::Holiday);
    assert_eq!(response.hits[0].title, "Christmas");
    assert_eq!(response.hits[0].score, 100);
}

#[tokio::test(start_paused = true)]
async fn slow_provider_is_reported_and_others_still_answer() {
    let search = SmartSearch::new(
        vec![tickets(Duration::from_secs(30)), holiday_provider()],
        Duration::from_secs(5),
    );

    let response = search.search("republic", 10).await;
    assert_eq!(response.failed_categories, vec![SearchCategory::Ticket]);
    assert_eq!(response.hits.len(), 1);
    assert_eq!(response.hits[0].title, "Republic Day");
}

#[tokio::test]
async fn unavailable_holiday_source_is_reported() {
    let failing = HolidaySearchProvider::new(
        Arc::new(StaticHolidaySource::failing("offline")),
        chrono_tz::America::Sao_Paulo,
    );
    let search = SmartSearch::new(
        vec![tickets(Duration::ZERO), Arc::new(failing)],
        Duration::from_secs(1),
    );

    let response = search.search("vacation", 10).await;
    assert_eq!(response.failed_categories, vec![SearchCategory::Holiday]);
    assert_eq!(response.hits[0].id, "42");
    assert_eq!(response.hits[0].score, 90);
}

#[tokio::test]
async fn limit_caps_merged_hits() {
    let search = SmartSearch::new(
        vec![tickets(Duration::ZERO), tickets(Duration::ZERO)],
        Duration::from_secs(1),
    );

    let response = search.search("vacation", 1).await;
    assert_eq!(response.hits.len(), 1);
}
