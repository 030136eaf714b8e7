//! REST client for the membership database API.
//!
//! Wraps the `/api/v1` endpoints the assignment screen needs using
//! [`reqwest`]. Every request carries the session's bearer token; a 401
//! deauthenticates the session.

use std::sync::Arc;

use mdb_core::assignment::TraineeAssignment;
use mdb_core::types::DbId;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{
    Department, Generation, InternalProject, LoginRequest, LoginResponse, Mentor, TraineeChoice,
};
use crate::session::Session;

/// HTTP client for one membership database API.
#[derive(Clone)]
pub struct MdbApi {
    client: reqwest::Client,
    api_url: String,
    session: Arc<dyn Session>,
}

impl MdbApi {
    /// Create a client using the configured base URL and request timeout.
    pub fn new(config: &ClientConfig, session: Arc<dyn Session>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone(), session))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String, session: Arc<dyn Session>) -> Self {
        Self {
            client,
            api_url,
            session,
        }
    }

    /// `POST /auth/login`. Does not touch the session; the caller stores
    /// the returned token.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let response = self
            .client
            .post(format!("{}/auth/login", self.api_url))
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        // A failed login is not an expired session.
        if response.status() == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status: 401, body });
        }
        self.parse_response(response).await
    }

    /// `GET /trainees/generations?current=true`
    pub async fn current_generation(&self) -> Result<Generation, ClientError> {
        self.get_json("/trainees/generations?current=true").await
    }

    /// `GET /trainees/generations/{id}/internal-projects`
    pub async fn internal_projects(
        &self,
        generation_id: DbId,
    ) -> Result<Vec<InternalProject>, ClientError> {
        self.get_json(&format!(
            "/trainees/generations/{generation_id}/internal-projects"
        ))
        .await
    }

    /// `GET /trainees/generations/{id}/mentors`
    pub async fn mentors(&self, generation_id: DbId) -> Result<Vec<Mentor>, ClientError> {
        self.get_json(&format!("/trainees/generations/{generation_id}/mentors"))
            .await
    }

    /// `GET /trainees/generations/{id}/trainee-choices`
    pub async fn trainee_choices(
        &self,
        generation_id: DbId,
    ) -> Result<Vec<TraineeChoice>, ClientError> {
        self.get_json(&format!(
            "/trainees/generations/{generation_id}/trainee-choices"
        ))
        .await
    }

    /// `GET /members/departments`
    pub async fn departments(&self) -> Result<Vec<Department>, ClientError> {
        self.get_json("/members/departments").await
    }

    /// `PATCH /trainees/{trainee_id}/assignment` with all three axes.
    pub async fn update_assignment(
        &self,
        trainee_id: DbId,
        assignment: &TraineeAssignment,
    ) -> Result<(), ClientError> {
        let response = self
            .authorized(
                self.client
                    .patch(format!("{}/trainees/{trainee_id}/assignment", self.api_url)),
            )
            .json(assignment)
            .send()
            .await?;

        self.ensure_success(response).await?;
        Ok(())
    }

    // ---- private helpers ----

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .authorized(self.client.get(format!("{}{path}", self.api_url)))
            .send()
            .await?;

        self.parse_response(response).await
    }

    /// Map 401 to [`ClientError::Unauthorized`] (deauthenticating the
    /// session) and any other non-2xx status to [`ClientError::Api`].
    async fn ensure_success(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(url = %response.url(), "API rejected the session token");
            self.session.deauthenticate();
            return Err(ClientError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = self.ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
