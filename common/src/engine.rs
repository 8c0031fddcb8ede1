// Job query engine: fixed catalog + filter store + derived views

use crate::catalog::{validate_catalog, JobSource};
use crate::errors::{ApplyError, CatalogError};
use crate::models::{
    parse_budget_bound, Application, FilterState, Job, JobStatus, SortKey, DEFAULT_BUDGET_MAX,
    DEFAULT_BUDGET_MIN,
};
use crate::notifier::ApplicationNotifier;
use crate::query;
use crate::store::FilterStore;
use crate::telemetry;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Holds the catalog and the current filter state, and derives the visible list
pub struct JobQueryEngine {
    catalog: Vec<Job>,
    skills: Vec<String>,
    store: FilterStore,
    notifier: Arc<dyn ApplicationNotifier>,
}

impl JobQueryEngine {
    /// Load the catalog from `source` and start from the default filter state
    #[instrument(skip_all)]
    pub fn new(
        source: &dyn JobSource,
        notifier: Arc<dyn ApplicationNotifier>,
    ) -> Result<Self, CatalogError> {
        let catalog = source.list_all()?;
        Self::from_jobs(catalog, notifier)
    }

    pub fn from_jobs(
        catalog: Vec<Job>,
        notifier: Arc<dyn ApplicationNotifier>,
    ) -> Result<Self, CatalogError> {
        validate_catalog(&catalog)?;
        let skills = query::distinct_skills(&catalog);

        info!(
            job_count = catalog.len(),
            skill_count = skills.len(),
            "Job query engine initialized"
        );

        Ok(Self {
            catalog,
            skills,
            store: FilterStore::default(),
            notifier,
        })
    }

    pub fn catalog(&self) -> &[Job] {
        &self.catalog
    }

    pub fn total_jobs(&self) -> usize {
        self.catalog.len()
    }

    /// Every distinct skill in the catalog, sorted
    pub fn all_skills(&self) -> &[String] {
        &self.skills
    }

    pub fn find(&self, job_id: &str) -> Option<&Job> {
        self.catalog.iter().find(|job| job.id == job_id)
    }

    pub fn filters(&self) -> FilterState {
        self.store.get()
    }

    pub fn active_filter_count(&self) -> usize {
        self.store.get().active_filter_count()
    }

    pub fn subscribe(&self) -> watch::Receiver<FilterState> {
        self.store.subscribe()
    }

    /// Jobs matching the current filter state, ordered by `sort`
    #[instrument(skip(self))]
    pub fn visible_jobs(&self, sort: SortKey) -> Vec<Job> {
        let state = self.store.get();
        let jobs = query::sort(&query::filter(&self.catalog, &state), sort);

        debug!(result_count = jobs.len(), "Computed visible jobs");
        telemetry::record_query(sort, jobs.len());
        jobs
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    pub fn set_search_query(&self, query: &str) -> FilterState {
        telemetry::record_filter_change("search");
        self.store.update(|state| state.with_search_query(query))
    }

    pub fn toggle_skill(&self, skill: &str) -> FilterState {
        telemetry::record_filter_change("skill");
        self.store.update(|state| state.with_skill_toggled(skill))
    }

    pub fn toggle_status(&self, status: JobStatus) -> FilterState {
        telemetry::record_filter_change("status");
        self.store.update(|state| state.with_status_toggled(status))
    }

    pub fn set_budget_range(&self, min: i64, max: i64) -> FilterState {
        telemetry::record_filter_change("budget");
        self.store.update(|state| state.with_budget_range(min, max))
    }

    /// Set the budget range from raw text fields, falling back to 0 / 2000
    pub fn set_budget_input(&self, min: &str, max: &str) -> FilterState {
        self.set_budget_range(
            parse_budget_bound(min, DEFAULT_BUDGET_MIN),
            parse_budget_bound(max, DEFAULT_BUDGET_MAX),
        )
    }

    pub fn reset(&self) -> FilterState {
        telemetry::record_filter_change("reset");
        let state = FilterState::default();
        self.store.set(state.clone());
        state
    }

    // ------------------------------------------------------------------
    // Applications
    // ------------------------------------------------------------------

    /// Validate an application and build the notification for it
    ///
    /// Delivery is left to the caller (see [`deliver_application`]) so it can
    /// run without holding up the response.
    #[instrument(skip(self))]
    pub fn apply(&self, job_id: &str) -> Result<Application, ApplyError> {
        let job = self.find(job_id).ok_or_else(|| {
            telemetry::record_application("not_found");
            ApplyError::JobNotFound(job_id.to_string())
        })?;

        if !job.accepts_applications() {
            telemetry::record_application("rejected");
            return Err(ApplyError::JobNotOpen {
                job_id: job.id.clone(),
                status: job.status.to_string(),
            });
        }

        telemetry::record_application("accepted");
        Ok(Application {
            application_id: uuid::Uuid::new_v4(),
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            submitted_at: chrono::Utc::now(),
        })
    }

    pub fn notifier(&self) -> Arc<dyn ApplicationNotifier> {
        Arc::clone(&self.notifier)
    }
}

/// Hand an application to the notifier; failures are logged, never returned
#[instrument(skip_all, fields(job_id = %application.job_id))]
pub async fn deliver_application(notifier: &dyn ApplicationNotifier, application: &Application) {
    if let Err(e) = notifier.notify(application).await {
        warn!(
            application_id = %application.application_id,
            error = %e,
            "Failed to deliver application notification"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::errors::NotifyError;
    use crate::notifier::{LogApplicationNotifier, MockApplicationNotifier};

    fn engine() -> JobQueryEngine {
        JobQueryEngine::new(&StaticCatalog, Arc::new(LogApplicationNotifier)).unwrap()
    }

    fn ids(jobs: &[Job]) -> Vec<String> {
        jobs.iter().map(|job| job.id.clone()).collect()
    }

    #[test]
    fn test_initial_view_is_open_jobs_by_recency() {
        let engine = engine();
        let jobs = engine.visible_jobs(SortKey::Recent);
        assert_eq!(ids(&jobs), vec!["5", "10", "1", "7", "2", "9", "6", "3"]);
        assert_eq!(engine.total_jobs(), 10);
        assert_eq!(engine.active_filter_count(), 1);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let engine = engine();
        engine.set_search_query("react");
        engine.toggle_skill("React");
        engine.toggle_status(JobStatus::Assigned);
        engine.set_budget_range(100, 500);

        let state = engine.reset();
        assert_eq!(state, FilterState::default());
        assert_eq!(engine.filters(), FilterState::default());
    }

    #[test]
    fn test_budget_input_fallbacks() {
        let engine = engine();
        let state = engine.set_budget_input("abc", "");
        assert_eq!((state.budget_min, state.budget_max), (0, 2000));

        let state = engine.set_budget_input("250", "1200");
        assert_eq!((state.budget_min, state.budget_max), (250, 1200));
    }

    #[test]
    fn test_mutations_drive_visible_jobs() {
        let engine = engine();
        engine.toggle_status(JobStatus::Open);
        engine.toggle_skill("JavaScript");
        assert_eq!(ids(&engine.visible_jobs(SortKey::Budget)), vec!["2", "7"]);

        engine.set_search_query("wordpress");
        assert_eq!(ids(&engine.visible_jobs(SortKey::Budget)), vec!["7"]);
    }

    #[test]
    fn test_all_skills_sorted() {
        let engine = engine();
        let skills = engine.all_skills();
        assert_eq!(skills.first().map(String::as_str), Some("Adobe Creative Suite"));
        assert_eq!(skills.last().map(String::as_str), Some("WordPress"));
    }

    #[test]
    fn test_apply_to_open_job() {
        let engine = engine();
        let application = engine.apply("2").unwrap();
        assert_eq!(application.job_id, "2");
        assert_eq!(application.job_title, "React Component Library");
        // Catalog is untouched
        assert_eq!(engine.find("2").map(|job| job.applicants), Some(5));
    }

    #[test]
    fn test_apply_rejects_unknown_and_closed_jobs() {
        let engine = engine();
        assert_eq!(
            engine.apply("missing"),
            Err(ApplyError::JobNotFound("missing".to_string()))
        );
        assert_eq!(
            engine.apply("4"),
            Err(ApplyError::JobNotOpen {
                job_id: "4".to_string(),
                status: "Assigned".to_string(),
            })
        );
        assert!(matches!(engine.apply("8"), Err(ApplyError::JobNotOpen { .. })));
    }

    #[test]
    fn test_from_jobs_rejects_duplicate_ids() {
        let mut jobs = StaticCatalog.list_all().unwrap();
        jobs.push(jobs[0].clone());
        let result = JobQueryEngine::from_jobs(jobs, Arc::new(LogApplicationNotifier));
        assert!(matches!(result, Err(CatalogError::DuplicateId(_))));
    }

    #[tokio::test]
    async fn test_deliver_application_calls_notifier() {
        let mut notifier = MockApplicationNotifier::new();
        notifier
            .expect_notify()
            .withf(|application| application.job_id == "1")
            .times(1)
            .returning(|_| Ok(()));

        let application = engine().apply("1").unwrap();
        deliver_application(&notifier, &application).await;
    }

    #[tokio::test]
    async fn test_deliver_application_swallows_failures() {
        let mut notifier = MockApplicationNotifier::new();
        notifier
            .expect_notify()
            .times(1)
            .returning(|_| Err(NotifyError::DeliveryFailed("offline".to_string())));

        let application = engine().apply("3").unwrap();
        deliver_application(&notifier, &application).await;
    }
}
