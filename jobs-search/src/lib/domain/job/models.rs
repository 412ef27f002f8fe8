use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::ValidationError;

/// Catalog identifier of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl FromStr for JobId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(JobId)
            .map_err(|_| ValidationError::new("job_id", "uuid"))
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A job posting as exposed by the catalog.
///
/// Upstream records are often sparse; absent or null text reads as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub job_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default)]
    pub company_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub how_to_apply: String,
    #[serde(default)]
    pub company_logo: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Filters for listing jobs. Unset fields are not sent to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobListingOptions {
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub full_time: bool,
    pub page: Option<u32>,
}

impl JobListingOptions {
    /// Query parameters to forward, skipping empty text and pages below 1.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            pairs.push(("description", description.to_string()));
        }
        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            pairs.push(("location", location.to_string()));
        }
        if self.full_time {
            pairs.push(("full_time", "true".to_string()));
        }
        if let Some(page) = self.page.filter(|p| *p >= 1) {
            pairs.push(("page", page.to_string()));
        }

        pairs
    }
}
