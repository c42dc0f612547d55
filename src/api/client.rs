//! Activities REST Client
//!
//! `reqwest` implementation of [`ActivityApi`] for native front ends.

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

use super::{activities_url, normalize_base, ActivityApi, ApiError, Mutation};
use crate::model::{Activities, MessageResponse};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL of the activities service (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Optional request timeout. `None` waits for as long as the server takes.
    pub request_timeout: Option<Duration>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout: None,
        }
    }
}

/// Activities service client over HTTP
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new client with the given configuration
    pub fn new(config: HttpClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(concat!(
            "activity-board/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: normalize_base(&config.base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn mutate(
        &self,
        mutation: Mutation,
        activity: &str,
        email: &str,
    ) -> Result<String, ApiError> {
        let url = mutation.path(&self.base_url, activity, email);
        tracing::debug!(?mutation, %url, "Sending mutation");

        let request = match mutation {
            Mutation::Signup => self.client.post(&url),
            Mutation::Unregister => self.client.delete(&url),
        };
        let response = request.send().await.map_err(network_error)?;
        let response = check_status(response).await?;

        let body: MessageResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(body.message)
    }
}

#[async_trait]
impl ActivityApi for HttpClient {
    async fn fetch_activities(&self) -> Result<Activities, ApiError> {
        let url = activities_url(&self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(network_error)?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<String, ApiError> {
        self.mutate(Mutation::Signup, activity, email).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<String, ApiError> {
        self.mutate(Mutation::Unregister, activity, email).await
    }
}

fn network_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Network("Request timeout".to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::rejected(status.as_u16(), &body))
}
