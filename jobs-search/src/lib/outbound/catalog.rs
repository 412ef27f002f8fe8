use std::time::Duration;

use anyhow::anyhow;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::domain::job::errors::JobError;
use crate::domain::job::models::Job;
use crate::domain::job::models::JobId;
use crate::domain::job::models::JobListingOptions;
use crate::domain::job::ports::JobCatalog;

/// Job catalog backed by the recruitment positions HTTP API.
pub struct HttpJobCatalog {
    http_client: Client,
    base_url: String,
}

impl HttpJobCatalog {
    /// # Arguments
    /// * `base_url` - Catalog root, e.g. `https://jobs.example.com`
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, anyhow::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building catalog http client")?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, JobError> {
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("catalog returned {}: {}", status, body).into());
        }

        Ok(response
            .json::<T>()
            .await
            .context("decoding catalog response")?)
    }
}

#[async_trait]
impl JobCatalog for HttpJobCatalog {
    #[tracing::instrument(name = "Listing jobs", skip(self))]
    async fn list_jobs(&self, options: &JobListingOptions) -> Result<Vec<Job>, JobError> {
        let response = self
            .http_client
            .get(self.endpoint("api/recruitment/positions.json"))
            .query(&options.query_pairs())
            .send()
            .await
            .context("sending job listing request")?;

        Self::decode(response).await
    }

    #[tracing::instrument(name = "Fetching job", skip(self))]
    async fn get_job(&self, id: &JobId) -> Result<Job, JobError> {
        let response = self
            .http_client
            .get(self.endpoint(&format!("api/recruitment/positions/{}", id)))
            .send()
            .await
            .context("sending job request")?;

        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::matchers::path;
    use wiremock::matchers::query_param;
    use wiremock::matchers::query_param_is_missing;
    use wiremock::Mock;
    use wiremock::MockServer;
    use wiremock::ResponseTemplate;

    use super::*;

    const JOB_ID: &str = "32bf67e5-4971-47ce-985c-44b6b3860cdb";

    fn job_json() -> serde_json::Value {
        json!({
            "id": JOB_ID,
            "type": "Full Time",
            "url": "https://jobs.example.com/positions/1",
            "created_at": "Wed May 19 00:49:17 UTC 2021",
            "company": "Acme",
            "company_url": "https://acme.example.com",
            "location": "Berlin",
            "title": "Rust Engineer",
            "description": "<p>Build things</p>",
            "how_to_apply": "<p>Email us</p>",
            "company_logo": null
        })
    }

    fn catalog(server: &MockServer) -> HttpJobCatalog {
        HttpJobCatalog::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_jobs_forwards_set_filters_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/recruitment/positions.json"))
            .and(query_param("location", "berlin"))
            .and(query_param("full_time", "true"))
            .and(query_param("page", "2"))
            .and(query_param_is_missing("description"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([job_json()])))
            .expect(1)
            .mount(&server)
            .await;

        let options = JobListingOptions {
            description: None,
            location: Some("berlin".into()),
            full_time: true,
            page: Some(2),
        };
        let jobs = catalog(&server).list_jobs(&options).await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id.to_string(), JOB_ID);
        assert_eq!(jobs[0].job_type, "Full Time");
        assert_eq!(jobs[0].company_logo, None);
    }

    #[tokio::test]
    async fn test_list_jobs_keeps_sparse_records() {
        let server = MockServer::start().await;
        let sparse = json!({
            "id": "0b1c7c55-2b2f-4d7a-9a36-5a8f3d9e6f10",
            "title": "Backend Engineer",
            "how_to_apply": null,
            "location": null
        });
        Mock::given(method("GET"))
            .and(path("/api/recruitment/positions.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([job_json(), sparse])))
            .mount(&server)
            .await;

        let jobs = catalog(&server)
            .list_jobs(&JobListingOptions::default())
            .await
            .unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[1].title, "Backend Engineer");
        assert_eq!(jobs[1].how_to_apply, "");
        assert_eq!(jobs[1].location, "");
    }

    #[tokio::test]
    async fn test_get_job() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/recruitment/positions/{}", JOB_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(job_json()))
            .mount(&server)
            .await;

        let job = catalog(&server)
            .get_job(&JOB_ID.parse().unwrap())
            .await
            .unwrap();

        assert_eq!(job.title, "Rust Engineer");
    }

    #[tokio::test]
    async fn test_upstream_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = catalog(&server)
            .list_jobs(&JobListingOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::Upstream(_)));
        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = catalog(&server)
            .get_job(&JOB_ID.parse().unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::Upstream(_)));
    }
}
