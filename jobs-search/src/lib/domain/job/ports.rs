use async_trait::async_trait;

use crate::domain::job::errors::JobError;
use crate::domain::job::models::Job;
use crate::domain::job::models::JobId;
use crate::domain::job::models::JobListingOptions;

/// Read-only access to the external job listing catalog.
#[async_trait]
pub trait JobCatalog: Send + Sync + 'static {
    async fn list_jobs(&self, options: &JobListingOptions) -> Result<Vec<Job>, JobError>;

    async fn get_job(&self, id: &JobId) -> Result<Job, JobError>;
}
