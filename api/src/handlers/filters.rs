// Filter state endpoints
// Every mutation replaces the whole filter state and returns the new one.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{de::IgnoredAny, Deserialize, Serialize};
use std::str::FromStr;

use crate::handlers::{ErrorResponse, SuccessResponse};
use crate::state::AppState;
use common::errors::ApiError;
use common::models::{
    parse_budget_bound, FilterState, JobStatus, DEFAULT_BUDGET_MAX, DEFAULT_BUDGET_MIN,
};

/// Filter state plus the applied-filter counter
#[derive(Debug, Serialize)]
pub struct FilterSummary {
    pub filters: FilterState,
    pub active_filters: usize,
}

impl From<FilterState> for FilterSummary {
    fn from(filters: FilterState) -> Self {
        Self {
            active_filters: filters.active_filter_count(),
            filters,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// A budget bound from the range slider (number) or a text field (string)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BudgetInput {
    Number(i64),
    Decimal(f64),
    Text(String),
    /// Anything else (booleans, arrays, objects) is malformed input
    Malformed(IgnoredAny),
}

impl BudgetInput {
    /// Slider values are taken as-is; typed text falls back on bad input
    pub fn resolve(&self, fallback: i64) -> i64 {
        match self {
            BudgetInput::Number(value) => *value,
            BudgetInput::Decimal(value) if value.is_finite() => value.trunc() as i64,
            BudgetInput::Text(raw) => parse_budget_bound(raw, fallback),
            BudgetInput::Decimal(_) | BudgetInput::Malformed(_) => fallback,
        }
    }
}

/// Missing or null bounds fall back to the defaults
#[derive(Debug, Default, Deserialize)]
pub struct BudgetRequest {
    #[serde(default)]
    pub min: Option<BudgetInput>,
    #[serde(default)]
    pub max: Option<BudgetInput>,
}

impl BudgetRequest {
    pub fn bounds(&self) -> (i64, i64) {
        let resolve = |input: &Option<BudgetInput>, fallback| {
            input
                .as_ref()
                .map_or(fallback, |input| input.resolve(fallback))
        };
        (
            resolve(&self.min, DEFAULT_BUDGET_MIN),
            resolve(&self.max, DEFAULT_BUDGET_MAX),
        )
    }
}

/// Current filter state
#[tracing::instrument(skip(state))]
pub async fn get_filters(State(state): State<AppState>) -> Json<SuccessResponse<FilterSummary>> {
    let engine = state.engine.read().await;
    Json(SuccessResponse::new(engine.filters().into()))
}

/// Replace the search text
#[tracing::instrument(skip(state))]
pub async fn update_search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Json<SuccessResponse<FilterSummary>> {
    let engine = state.engine.write().await;
    Json(SuccessResponse::new(engine.set_search_query(&req.query).into()))
}

/// Toggle one skill in the skill filter
#[tracing::instrument(skip(state))]
pub async fn toggle_skill(
    State(state): State<AppState>,
    Path(skill): Path<String>,
) -> Json<SuccessResponse<FilterSummary>> {
    let engine = state.engine.write().await;
    Json(SuccessResponse::new(engine.toggle_skill(&skill).into()))
}

/// Toggle one status in the status filter
#[tracing::instrument(skip(state))]
pub async fn toggle_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<SuccessResponse<FilterSummary>>, ErrorResponse> {
    let status = JobStatus::from_str(&status).map_err(ApiError::from)?;
    let engine = state.engine.write().await;
    Ok(Json(SuccessResponse::new(engine.toggle_status(status).into())))
}

/// Set the budget range; min > max is accepted and simply matches nothing
#[tracing::instrument(skip(state))]
pub async fn update_budget(
    State(state): State<AppState>,
    Json(req): Json<BudgetRequest>,
) -> Json<SuccessResponse<FilterSummary>> {
    let (min, max) = req.bounds();

    let engine = state.engine.write().await;
    Json(SuccessResponse::new(engine.set_budget_range(min, max).into()))
}

/// Restore the default filters
#[tracing::instrument(skip(state))]
pub async fn reset_filters(State(state): State<AppState>) -> Json<SuccessResponse<FilterSummary>> {
    let engine = state.engine.write().await;
    Json(SuccessResponse::new(engine.reset().into()))
}
