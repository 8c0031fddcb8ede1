use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the main application router with all routes and middleware
#[tracing::instrument(skip(state))]
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let page_routes = Router::new()
        .route("/", get(handlers::board::job_board))
        .route("/health", get(handlers::health::health_check));

    let job_routes = Router::new()
        .route("/api/jobs", get(handlers::jobs::list_jobs))
        .route("/api/jobs/:id", get(handlers::jobs::get_job))
        .route("/api/jobs/:id/apply", post(handlers::jobs::apply_job))
        .route("/api/skills", get(handlers::jobs::list_skills));

    let filter_routes = Router::new()
        .route("/api/filters", get(handlers::filters::get_filters))
        .route("/api/filters/search", put(handlers::filters::update_search))
        .route(
            "/api/filters/skills/:skill/toggle",
            post(handlers::filters::toggle_skill),
        )
        .route(
            "/api/filters/status/:status/toggle",
            post(handlers::filters::toggle_status),
        )
        .route("/api/filters/budget", put(handlers::filters::update_budget))
        .route("/api/filters/reset", post(handlers::filters::reset_filters))
        // Server-Sent Events for filter and application updates
        .route("/api/events", get(handlers::sse::sse_handler));

    // Metrics endpoint for Prometheus scraping
    let metrics_routes = Router::new().route("/metrics", get(handlers::metrics::metrics_handler));

    // Combine all routes
    Router::new()
        .merge(page_routes)
        .merge(job_routes)
        .merge(filter_routes)
        .merge(metrics_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
