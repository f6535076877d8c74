//! REST API client for the Dreams HTTP endpoints.
//!
//! Wraps login and the generic list/create/update/delete calls using
//! [`reqwest`]. Every call except [`DreamsApi::login`] takes the
//! [`AuthToken`] explicitly.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;

use dreams_core::types::DbId;

use crate::auth::{AuthToken, LoginRequest, LoginResponse};
use crate::config::ClientConfig;
use crate::endpoints::Endpoints;
use crate::error::{ClientError, ClientResult};
use crate::resource::Resource;

/// HTTP client for one Dreams API deployment.
#[derive(Debug, Clone)]
pub struct DreamsApi {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl DreamsApi {
    /// Build a client from configuration, applying the request timeout.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Self::with_client(client, &config.api_url)
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: &str) -> ClientResult<Self> {
        Ok(Self {
            client,
            endpoints: Endpoints::new(api_url)?,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Exchange a username and password for a token.
    ///
    /// Sends `POST /login/` without an `Authorization` header.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let response = self
            .client
            .post(self.endpoints.login()?)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `GET /{resource}/`
    pub async fn list<R: Resource>(&self, token: &AuthToken) -> ClientResult<Vec<R::Record>> {
        let url = self.endpoints.collection(R::PATH)?;
        self.fetch(token, url).await
    }

    /// `GET /{resource}/?event={event_id}`
    pub async fn list_for_event<R: Resource>(
        &self,
        token: &AuthToken,
        event_id: DbId,
    ) -> ClientResult<Vec<R::Record>> {
        let url = self.endpoints.filtered_by_event(R::PATH, event_id)?;
        self.fetch(token, url).await
    }

    /// `POST /{resource}/` with the draft as body; returns the created record.
    pub async fn create<R: Resource>(
        &self,
        token: &AuthToken,
        draft: &R::Draft,
    ) -> ClientResult<R::Record> {
        let url = self.endpoints.collection(R::PATH)?;
        let response = self
            .authorized(Method::POST, url, token)
            .json(draft)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `PUT` or `PATCH /{resource}/{id}/`, depending on the resource.
    pub async fn update<R: Resource>(
        &self,
        token: &AuthToken,
        id: DbId,
        draft: &R::Draft,
    ) -> ClientResult<R::Record> {
        let url = self.endpoints.item(R::PATH, id)?;
        let response = self
            .authorized(R::UPDATE_METHOD.as_method(), url, token)
            .json(draft)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `DELETE /{resource}/{id}/`
    pub async fn delete<R: Resource>(&self, token: &AuthToken, id: DbId) -> ClientResult<()> {
        let url = self.endpoints.item(R::PATH, id)?;
        let response = self.authorized(Method::DELETE, url, token).send().await?;

        Self::check_status(response).await
    }

    // ---- private helpers ----

    async fn fetch<T: DeserializeOwned>(&self, token: &AuthToken, url: Url) -> ClientResult<T> {
        let response = self.authorized(Method::GET, url, token).send().await?;
        Self::parse_response(response).await
    }

    fn authorized(&self, method: Method, url: Url, token: &AuthToken) -> reqwest::RequestBuilder {
        tracing::debug!(%method, %url, "Dreams API request");
        self.client
            .request(method, url)
            .header(AUTHORIZATION, token.header_value())
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ClientError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
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

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> ClientResult<()> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
