//! Single-resource loader.
//!
//! # Responsibilities
//! - Fetch one resource from one source and parse it as JSON
//! - Classify failures as status, transport or timeout errors
//!
//! # Design Decisions
//! - Exactly one request per call: no retries, no caching
//! - Every request has a deadline
//! - Errors carry strings, not library errors, so they are `Clone`

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tokio::time::timeout;

use crate::data::source::LoadRequest;

/// Why a single load failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The source answered with a non-2xx status.
    #[error("{url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// Network failure or a body that is not the expected JSON.
    #[error("{url}: {reason}")]
    Transport { url: String, reason: String },

    /// No complete response within the deadline.
    #[error("{url}: timed out after {secs}s")]
    Timeout { url: String, secs: u64 },
}

impl LoadError {
    pub fn transport(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        LoadError::Transport {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// URL of the failed load.
    pub fn url(&self) -> &str {
        match self {
            LoadError::Status { url, .. }
            | LoadError::Transport { url, .. }
            | LoadError::Timeout { url, .. } => url,
        }
    }
}

/// Fetches and parses one resource.
pub trait Loader: Send + Sync {
    fn load(&self, request: &LoadRequest) -> impl Future<Output = Result<Value, LoadError>> + Send;
}

/// HTTP loader backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpLoader {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpLoader {
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), timeout)
    }

    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

impl Loader for HttpLoader {
    async fn load(&self, request: &LoadRequest) -> Result<Value, LoadError> {
        let url = request.url.as_str();
        let fetch = async {
            let response = self
                .client
                .get(request.url.clone())
                .send()
                .await
                .map_err(|e| LoadError::transport(url, e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            response
                .json::<Value>()
                .await
                .map_err(|e| LoadError::transport(url, e))
        };

        match timeout(self.timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(LoadError::Timeout {
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            }),
        }
    }
}
