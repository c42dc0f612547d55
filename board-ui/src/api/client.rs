//! HTTP API Client
//!
//! `gloo-net` implementation of the activities service API.

use activity_board::api::{activities_url, normalize_base, ActivityApi, ApiError, Mutation};
use activity_board::model::{Activities, MessageResponse};
use async_trait::async_trait;
use gloo_net::http::{Request, Response};

/// Default API base URL: the page's own origin
pub const DEFAULT_API_BASE: &str = "";

const API_URL_KEY: &str = "activity_board_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

/// Activities service reached from the browser
pub struct GlooApi {
    base: String,
}

impl GlooApi {
    pub fn new(base: String) -> Self {
        Self { base }
    }

    async fn mutate(
        &self,
        mutation: Mutation,
        activity: &str,
        email: &str,
    ) -> Result<String, ApiError> {
        let url = mutation.path(&self.base, activity, email);
        let request = match mutation {
            Mutation::Signup => Request::post(&url),
            Mutation::Unregister => Request::delete(&url),
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = check_status(response).await?;

        let body: MessageResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(body.message)
    }
}

#[async_trait(?Send)]
impl ActivityApi for GlooApi {
    async fn fetch_activities(&self) -> Result<Activities, ApiError> {
        let response = Request::get(&activities_url(&self.base))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
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

async fn check_status(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::rejected(response.status(), &body))
}
