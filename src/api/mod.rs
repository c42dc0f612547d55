//! Activities Service API
//!
//! The [`ActivityApi`] trait is the seam between the board and the remote
//! activities service. The native front end implements it with `reqwest`
//! ([`HttpClient`]); the browser front end implements it with `gloo-net`.
//!
//! # Endpoints
//!
//! - `GET /activities` - The full activity map
//! - `POST /activities/{name}/signup?email={email}` - Register a participant
//! - `DELETE /activities/{name}/unregister?email={email}` - Remove a participant

#[cfg(feature = "native")]
pub mod client;

#[cfg(feature = "native")]
pub use client::HttpClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Activities, ErrorResponse};

/// Remote activities service
#[cfg_attr(feature = "native", async_trait)]
#[cfg_attr(not(feature = "native"), async_trait(?Send))]
pub trait ActivityApi {
    /// `GET /activities`
    async fn fetch_activities(&self) -> Result<Activities, ApiError>;

    /// `POST /activities/{name}/signup`. Returns the server's message.
    async fn signup(&self, activity: &str, email: &str) -> Result<String, ApiError>;

    /// `DELETE /activities/{name}/unregister`. Returns the server's message.
    async fn unregister(&self, activity: &str, email: &str) -> Result<String, ApiError>;
}

/// The two mutating operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Signup,
    Unregister,
}

impl Mutation {
    /// Text used when the server rejects a request without a usable detail
    pub fn fallback_text(self) -> &'static str {
        match self {
            Mutation::Signup => "Signup failed",
            Mutation::Unregister => "Unregister failed",
        }
    }

    /// Text used when the request never produced a readable answer
    pub fn transport_failure_text(self) -> &'static str {
        match self {
            Mutation::Signup => "Failed to sign up. Please try again.",
            Mutation::Unregister => "Failed to unregister. Please try again.",
        }
    }

    pub fn path(self, base: &str, activity: &str, email: &str) -> String {
        let action = match self {
            Mutation::Signup => "signup",
            Mutation::Unregister => "unregister",
        };
        format!(
            "{}/activities/{}/{}?email={}",
            base,
            urlencoding::encode(activity),
            action,
            urlencoding::encode(email)
        )
    }
}

/// `GET /activities` against `base`
pub fn activities_url(base: &str) -> String {
    format!("{}/activities", base)
}

/// Strip the trailing slash from a configured base URL
pub fn normalize_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

/// Errors talking to the activities service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be sent or the response never arrived
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("Request rejected ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },

    /// The response body was not what the endpoint promises
    #[error("Parse error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a rejection from a non-success status and its raw body
    pub fn rejected(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.detail_text().map(str::to_string));
        ApiError::Rejected { status, detail }
    }

    /// Text shown in the message area when `mutation` fails with this error
    pub fn user_message(&self, mutation: Mutation) -> String {
        match self {
            ApiError::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Rejected { detail: None, .. } => mutation.fallback_text().to_string(),
            ApiError::Network(_) | ApiError::Decode(_) => {
                mutation.transport_failure_text().to_string()
            }
        }
    }
}
