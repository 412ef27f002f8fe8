use thiserror::Error;

use crate::domain::errors::ValidationError;

/// Errors raised while reading the external job catalog.
#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Job catalog request failed: {0:#}")]
    Upstream(anyhow::Error),
}

impl From<anyhow::Error> for JobError {
    fn from(e: anyhow::Error) -> Self {
        Self::Upstream(e)
    }
}
