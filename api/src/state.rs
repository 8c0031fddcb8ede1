use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use common::config::Settings;
use common::engine::JobQueryEngine;
use common::errors::NotifyError;
use common::models::{Application, FilterState};
use common::notifier::ApplicationNotifier;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<JobQueryEngine>>,
    pub config: Arc<Settings>,
    pub metrics_handle: Option<PrometheusHandle>,
    pub sse_tx: broadcast::Sender<SseEvent>,
}

/// Server-Sent Events message types
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SseEvent {
    FiltersChanged {
        filters: FilterState,
        active_filters: usize,
    },
    ApplicationSubmitted {
        application_id: uuid::Uuid,
        job_id: String,
        job_title: String,
    },
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(
        engine: JobQueryEngine,
        config: Settings,
        metrics_handle: Option<PrometheusHandle>,
        sse_tx: broadcast::Sender<SseEvent>,
    ) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
            config: Arc::new(config),
            metrics_handle,
            sse_tx,
        }
    }

    /// Broadcast an SSE event to all connected clients
    pub fn broadcast_event(&self, event: SseEvent) {
        // Ignore send errors (no receivers is fine)
        let _ = self.sse_tx.send(event);
    }
}

/// Notifier that logs each application and pushes it to SSE clients
pub struct BroadcastNotifier {
    sse_tx: broadcast::Sender<SseEvent>,
}

impl BroadcastNotifier {
    pub fn new(sse_tx: broadcast::Sender<SseEvent>) -> Self {
        Self { sse_tx }
    }
}

#[async_trait::async_trait]
impl ApplicationNotifier for BroadcastNotifier {
    #[tracing::instrument(skip(self), fields(job_id = %application.job_id))]
    async fn notify(&self, application: &Application) -> Result<(), NotifyError> {
        tracing::info!(
            application_id = %application.application_id,
            job_title = %application.job_title,
            "Applied for job"
        );

        // No connected clients is not a delivery failure
        let _ = self.sse_tx.send(SseEvent::ApplicationSubmitted {
            application_id: application.application_id,
            job_id: application.job_id.clone(),
            job_title: application.job_title.clone(),
        });
        Ok(())
    }
}
