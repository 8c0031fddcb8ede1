// Error handling framework

use thiserror::Error;

/// Catalog loading errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file '{path}': {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Invalid catalog JSON: {0}")]
    InvalidJson(String),

    #[error("Duplicate job id in catalog: {0}")]
    DuplicateId(String),

    #[error("Job at position {0} has an empty id")]
    EmptyId(usize),
}

/// Errors raised when applying to a job
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Job {job_id} is {status} and no longer accepts applications")]
    JobNotOpen { job_id: String, status: String },
}

/// Errors raised when parsing user-facing enum values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown sort key '{0}', expected one of: recent, budget, deadline")]
    UnknownSortKey(String),

    #[error("Unknown job status '{0}', expected one of: Open, Assigned, Completed")]
    UnknownStatus(String),
}

/// Notifier delivery errors
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    DeliveryFailed(String),
}

/// API response error type for HTTP responses
#[derive(Debug, serde::Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::new("CATALOG_ERROR", err.to_string())
    }
}

impl From<ApplyError> for ApiError {
    fn from(err: ApplyError) -> Self {
        let code = match err {
            ApplyError::JobNotFound(_) => "NOT_FOUND",
            ApplyError::JobNotOpen { .. } => "CONFLICT",
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        ApiError::new("VALIDATION_ERROR", err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::InvalidJson(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_error_display() {
        let err = ApplyError::JobNotOpen {
            job_id: "4".to_string(),
            status: "Assigned".to_string(),
        };
        assert!(err.to_string().contains("Assigned"));
    }

    #[test]
    fn test_apply_error_to_api_error() {
        let api_err: ApiError = ApplyError::JobNotFound("42".to_string()).into();
        assert_eq!(api_err.code, "NOT_FOUND");

        let api_err: ApiError = ApplyError::JobNotOpen {
            job_id: "8".to_string(),
            status: "Completed".to_string(),
        }
        .into();
        assert_eq!(api_err.code, "CONFLICT");
    }

    #[test]
    fn test_parse_error_to_api_error() {
        let api_err: ApiError = ParseError::UnknownSortKey("price".to_string()).into();
        assert_eq!(api_err.code, "VALIDATION_ERROR");
        assert!(api_err.message.contains("price"));
    }

    #[test]
    fn test_api_error_with_details() {
        let err = ApiError::new("TEST_ERROR", "Test message")
            .with_details(serde_json::json!({"field": "value"}));
        assert!(err.details.is_some());
    }
}
