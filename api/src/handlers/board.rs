// Job board page
// Server-rendered view of the current filters and the visible job list.

use axum::{
    extract::{Query, State},
    response::Html,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tera::Context;

use super::jobs::ListJobsParams;
use crate::handlers::ErrorResponse;
use crate::state::AppState;
use crate::templates::TEMPLATES;
use common::models::{Job, JobStatus, SortKey};

/// One job card as the template sees it
#[derive(Debug, Serialize)]
struct JobCard<'a> {
    #[serde(flatten)]
    job: &'a Job,
    days_left: i64,
    is_urgent: bool,
    accepts_applications: bool,
    posted_display: String,
    deadline_display: String,
}

impl<'a> JobCard<'a> {
    fn new(job: &'a Job, today: NaiveDate) -> Self {
        Self {
            job,
            days_left: job.days_until_deadline(today),
            is_urgent: job.is_urgent(today),
            accepts_applications: job.accepts_applications(),
            posted_display: job.posted_date.format("%b %-d").to_string(),
            deadline_display: job.deadline.format("%b %-d").to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Checkbox {
    value: String,
    checked: bool,
}

#[derive(Debug, Serialize)]
struct SortOption {
    key: &'static str,
    label: &'static str,
    selected: bool,
}

/// Render the job board
#[tracing::instrument(skip(state))]
pub async fn job_board(
    State(state): State<AppState>,
    Query(params): Query<ListJobsParams>,
) -> Result<Html<String>, ErrorResponse> {
    let sort = params.sort_key()?;
    let engine = state.engine.read().await;
    let filters = engine.filters();
    let jobs = engine.visible_jobs(sort);
    let today = Utc::now().date_naive();

    let cards: Vec<JobCard<'_>> = jobs.iter().map(|job| JobCard::new(job, today)).collect();
    let skills: Vec<Checkbox> = engine
        .all_skills()
        .iter()
        .map(|skill| Checkbox {
            value: skill.clone(),
            checked: filters.selected_skills.contains(skill),
        })
        .collect();
    let statuses: Vec<Checkbox> = JobStatus::ALL
        .iter()
        .map(|status| Checkbox {
            value: status.to_string(),
            checked: filters.status_filter.contains(status),
        })
        .collect();
    let sort_options: Vec<SortOption> = SortKey::ALL
        .iter()
        .map(|key| SortOption {
            key: key.as_str(),
            label: key.label(),
            selected: *key == sort,
        })
        .collect();

    let mut context = Context::new();
    context.insert("jobs", &cards);
    context.insert("count", &cards.len());
    context.insert("total_jobs", &engine.total_jobs());
    context.insert("active_filters", &filters.active_filter_count());
    context.insert("filters", &filters);
    context.insert("skills", &skills);
    context.insert("statuses", &statuses);
    context.insert("sort_options", &sort_options);

    let html = TEMPLATES.render("jobs.html", &context).map_err(|e| {
        tracing::error!(error = %e, template = "jobs.html", "Template rendering failed");
        ErrorResponse::new("template_error", format!("Template error: {}", e))
    })?;

    Ok(Html(html))
}
