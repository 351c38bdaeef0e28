//! REST backend client.
//!
//! Endpoints, relative to the configured base URL:
//! - `GET  experts/{expert}/availability` → snapshot document (404 = none yet)
//! - `PUT  experts/{expert}/availability` ← snapshot document
//! - `GET  experts/{expert}/sessions` → session records
//! - `POST sessions/{session}/review` ← review submission
//!
//! Calls are single-shot request/response; nothing is retried. The client
//! owns a current-thread runtime so callers stay synchronous.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::config::BackendConfig;
use super::traits::{SessionStore, SnapshotStore};
use crate::error::PersistenceError;
use crate::scheduler::SchedulerDocument;
use crate::session::{ReviewSubmission, SessionRecord};

pub struct RemoteStore {
    base: Url,
    expert_id: String,
    client: Client,
    runtime: tokio::runtime::Runtime,
}

impl RemoteStore {
    pub fn new(base_url: &str, expert_id: &str, timeout: Duration) -> Result<Self, PersistenceError> {
        if expert_id.trim().is_empty() {
            return Err(PersistenceError::NotConfigured("backend.expert_id is empty".into()));
        }

        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        let client = Client::builder().timeout(timeout).build()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            base: Url::parse(&base)?,
            expert_id: expert_id.to_string(),
            client,
            runtime,
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, PersistenceError> {
        Self::new(
            &config.base_url,
            &config.expert_id,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn availability_url(&self) -> Result<Url, PersistenceError> {
        let path = format!("experts/{}/availability", urlencoding::encode(&self.expert_id));
        Ok(self.base.join(&path)?)
    }

    fn sessions_url(&self) -> Result<Url, PersistenceError> {
        let path = format!("experts/{}/sessions", urlencoding::encode(&self.expert_id));
        Ok(self.base.join(&path)?)
    }

    fn review_url(&self, session_id: &str) -> Result<Url, PersistenceError> {
        let path = format!("sessions/{}/review", urlencoding::encode(session_id));
        Ok(self.base.join(&path)?)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "backend request");
        self.client.request(method, url)
    }

    /// Send and fail on any non-2xx status.
    fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, PersistenceError> {
        self.runtime.block_on(async {
            let response = request.send().await?;
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }
            let body = response.text().await.unwrap_or_default();
            Err(PersistenceError::Status {
                status: status.as_u16(),
                body,
            })
        })
    }

    fn json<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T, PersistenceError> {
        let bytes = self.runtime.block_on(response.bytes())?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl SnapshotStore for RemoteStore {
    fn load_snapshot(&self) -> Result<Option<SchedulerDocument>, PersistenceError> {
        let request = self.request(Method::GET, self.availability_url()?);
        match self.send(request) {
            Ok(response) => Ok(Some(self.json(response)?)),
            Err(PersistenceError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn save_snapshot(&self, document: &SchedulerDocument) -> Result<(), PersistenceError> {
        let request = self.request(Method::PUT, self.availability_url()?).json(document);
        self.send(request)?;
        Ok(())
    }
}

impl SessionStore for RemoteStore {
    fn list_sessions(&self) -> Result<Vec<SessionRecord>, PersistenceError> {
        let request = self.request(Method::GET, self.sessions_url()?);
        let response = self.send(request)?;
        self.json(response)
    }

    fn submit_review(&self, review: &ReviewSubmission) -> Result<(), PersistenceError> {
        let request = self
            .request(Method::POST, self.review_url(&review.session_id)?)
            .json(review);
        self.send(request)?;
        Ok(())
    }
}
