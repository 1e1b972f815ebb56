use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::Config,
    repositories::{PgArticleSearch, PgTicketSearch},
    services::{
        holiday_source::{HolidaySource, PgHolidaySource},
        planning::WeeklyPlanningService,
        search::{HolidaySearchProvider, SearchHistory, SearchProvider, SmartSearch},
        vacation::{SuggestionOptions, VacationSuggestionService},
        weekly::{default_rules, WeeklyNotificationService},
    },
    storage::{InMemoryStore, KeyValueStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub holidays: Arc<dyn HolidaySource>,
    pub suggestions: Arc<VacationSuggestionService>,
    pub planning: Arc<WeeklyPlanningService>,
    pub reminders: Arc<WeeklyNotificationService>,
    pub search: Arc<SmartSearch>,
    pub history: Arc<SearchHistory>,
}

impl AppState {
    /// Wires every service around the given holiday source, store and extra
    /// search providers. A holiday search provider is always appended.
    pub fn new(
        config: Config,
        holidays: Arc<dyn HolidaySource>,
        store: Arc<dyn KeyValueStore>,
        mut search_providers: Vec<Arc<dyn SearchProvider>>,
    ) -> Self {
        let suggestions = VacationSuggestionService::new(
            Arc::clone(&holidays),
            SuggestionOptions::from_config(&config),
        );
        let planning =
            WeeklyPlanningService::new(Arc::clone(&holidays), config.holiday_fetch_timeout());
        let reminders = WeeklyNotificationService::new(Arc::clone(&store), default_rules());

        search_providers.push(Arc::new(HolidaySearchProvider::new(
            Arc::clone(&holidays),
            config.time_zone,
        )));
        let search = SmartSearch::new(search_providers, config.search_provider_timeout());

        Self {
            holidays,
            suggestions: Arc::new(suggestions),
            planning: Arc::new(planning),
            reminders: Arc::new(reminders),
            search: Arc::new(search),
            history: Arc::new(SearchHistory::new(store)),
            config,
        }
    }

    /// Production wiring backed by Postgres and an in-process store.
    pub fn from_pool(config: Config, pool: PgPool) -> Self {
        let holidays: Arc<dyn HolidaySource> = Arc::new(PgHolidaySource::new(pool.clone()));
        let providers: Vec<Arc<dyn SearchProvider>> = vec![
            Arc::new(PgTicketSearch::new(pool.clone())),
            Arc::new(PgArticleSearch::new(pool)),
        ];
        Self::new(config, holidays, Arc::new(InMemoryStore::new()), providers)
    }
}
