// Shared library for the job search service: catalog, query engine, filter state

pub mod catalog;
pub mod config;
pub mod engine;
pub mod errors;
pub mod models;
pub mod notifier;
pub mod query;
pub mod store;
pub mod telemetry;
