// Telemetry module for structured logging, metrics, and tracing

use crate::models::SortKey;
use anyhow::Result;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    trace::{RandomIdGenerator, Sampler, TracerProvider},
    Resource,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const SERVICE_NAME: &str = "jobsearch";

/// Initialize structured logging with JSON formatting and trace context
///
/// This function sets up the tracing subscriber with:
/// - JSON formatting for structured logs
/// - Trace context (span list) in all log entries
/// - Log levels from `RUST_LOG` or the configured level
/// - Optional OpenTelemetry export when an endpoint is given
#[tracing::instrument(skip_all)]
pub fn init_logging(log_level: &str, tracing_endpoint: Option<&str>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))?;

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter);

    let registry = tracing_subscriber::registry().with(json_layer);

    if let Some(endpoint) = tracing_endpoint {
        let tracer = init_tracer(endpoint)?;
        let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);
        registry
            .with(telemetry_layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;
    } else {
        registry
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;
    }

    tracing::info!(
        log_level = log_level,
        tracing_endpoint = tracing_endpoint,
        "Structured logging initialized with JSON formatting"
    );

    Ok(())
}

/// Initialize OpenTelemetry tracer with OTLP exporter
#[tracing::instrument(skip_all)]
fn init_tracer(endpoint: &str) -> Result<opentelemetry_sdk::trace::Tracer> {
    use opentelemetry_sdk::runtime::Tokio;

    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(endpoint)
        .build_span_exporter()
        .map_err(|e| anyhow::anyhow!("Failed to build span exporter: {}", e))?;

    let tracer_provider = TracerProvider::builder()
        .with_batch_exporter(exporter, Tokio)
        .with_config(
            opentelemetry_sdk::trace::Config::default()
                .with_sampler(Sampler::AlwaysOn)
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(Resource::new(vec![
                    KeyValue::new("service.name", SERVICE_NAME),
                    KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
                ])),
        )
        .build();

    global::set_tracer_provider(tracer_provider.clone());
    let tracer = tracer_provider.tracer(SERVICE_NAME);

    tracing::info!(
        endpoint = endpoint,
        "OpenTelemetry tracer initialized with OTLP exporter"
    );

    Ok(tracer)
}

/// Flush remaining spans on graceful shutdown
pub fn shutdown_tracer() {
    global::shutdown_tracer_provider();
}

/// Install the Prometheus recorder and describe all job search metrics
///
/// - jobsearch_queries_total: visible-list computations, by sort key
/// - jobsearch_results: size of each computed list
/// - jobsearch_filter_changes_total: filter mutations, by operation
/// - jobsearch_applications_total: apply attempts, by outcome
///
/// The returned handle renders the scrape body for `/metrics`.
#[tracing::instrument(skip_all)]
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    describe_counter!(
        "jobsearch_queries_total",
        "Total number of visible job list computations"
    );
    describe_histogram!(
        "jobsearch_results",
        "Number of jobs returned per visible list computation"
    );
    describe_counter!(
        "jobsearch_filter_changes_total",
        "Total number of filter state mutations"
    );
    describe_counter!(
        "jobsearch_applications_total",
        "Total number of job application attempts"
    );

    tracing::info!("Prometheus metrics recorder installed");

    Ok(handle)
}

#[inline]
pub fn record_query(sort: SortKey, result_count: usize) {
    counter!("jobsearch_queries_total", "sort" => sort.as_str()).increment(1);
    histogram!("jobsearch_results").record(result_count as f64);
}

#[inline]
pub fn record_filter_change(operation: &'static str) {
    counter!("jobsearch_filter_changes_total", "operation" => operation).increment(1);
}

/// `outcome` is one of accepted, rejected, not_found
#[inline]
pub fn record_application(outcome: &'static str) {
    counter!("jobsearch_applications_total", "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_rejects_second_subscriber() {
        // Whichever call installs the global subscriber, the next one must fail
        let _ = init_logging("info", None);
        let second = init_logging("info", None);
        assert!(second
            .unwrap_err()
            .to_string()
            .contains("Failed to initialize tracing subscriber"));
    }

    #[test]
    fn test_metrics_recording_without_recorder() {
        record_query(SortKey::Deadline, 8);
        record_filter_change("skill");
        record_application("accepted");
    }
}
