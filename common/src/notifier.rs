// Application notification interface
// Applying to a job is fire-and-forget: the catalog is never changed.

use crate::errors::NotifyError;
use crate::models::Application;

/// Receiver of job applications
///
/// Implementations forward the application to whatever collaborator handles
/// it. Callers log failures and move on.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ApplicationNotifier: Send + Sync {
    async fn notify(&self, application: &Application) -> Result<(), NotifyError>;
}

/// Log-based notifier (default implementation)
pub struct LogApplicationNotifier;

#[async_trait::async_trait]
impl ApplicationNotifier for LogApplicationNotifier {
    #[tracing::instrument(skip(self), fields(job_id = %application.job_id))]
    async fn notify(&self, application: &Application) -> Result<(), NotifyError> {
        tracing::info!(
            application_id = %application.application_id,
            job_title = %application.job_title,
            submitted_at = %application.submitted_at,
            "Applied for job"
        );
        Ok(())
    }
}
