//! HTTP client for the commands API.
//!
//! [`CommandApi`] is the seam the controllers consume; [`HubClient`] is the
//! reqwest-backed implementation speaking the server contract.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};

use crate::auth::TokenStore;
use crate::config::Config;
use crate::errors::{ApiError, ErrorBody};
use crate::models::{
    Command, CommandPage, CommandPayload, LoginRequest, LoginResponse, RegisterRequest, Technology,
};

/// Query for one page of the command list.
///
/// `search` and `technology` are attached to the request only when present;
/// an empty search is the same as no search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    pub search: Option<String>,
    pub technology: Option<Technology>,
}

/// Read/write operations against the commands endpoint.
#[async_trait]
pub trait CommandApi: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<CommandPage, ApiError>;
    async fn get(&self, id: i64) -> Result<Command, ApiError>;
    async fn create(&self, payload: &CommandPayload) -> Result<Command, ApiError>;
    async fn update(&self, id: i64, payload: &CommandPayload) -> Result<Command, ApiError>;
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}

/// Reqwest-backed client for the Command Control Hub API.
#[derive(Clone)]
pub struct HubClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenStore>,
}

impl HubClient {
    pub fn new(config: &Config, tokens: Arc<TokenStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the stored bearer credential, when one is present.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Drain a non-2xx response into an [`ApiError::Status`].
    async fn status_error(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(text) => ErrorBody::from_response_text(&text),
            Err(e) => {
                tracing::warn!("Failed to read error body: {}", e);
                None
            }
        };
        ApiError::Status { status, body }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// POST /auth/login. The returned token is stored for subsequent calls.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(request)
            .send()
            .await?;

        let login: LoginResponse = Self::read_json(response).await?;
        self.tokens.set(&login.token);
        tracing::info!("Logged in as {}", request.username);
        Ok(login.token)
    }

    /// POST /auth/register. The response body is a confirmation string and is
    /// not consumed.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }
        Ok(())
    }

    /// Drop the stored credential.
    pub fn logout(&self) {
        self.tokens.clear();
        tracing::info!("Logged out");
    }
}

#[async_trait]
impl CommandApi for HubClient {
    async fn list(&self, query: &ListQuery) -> Result<CommandPage, ApiError> {
        let mut params: Vec<(&str, String)> = vec![
            ("page", query.page.to_string()),
            ("size", query.size.to_string()),
        ];
        if let Some(search) = query.search.as_deref() {
            if !search.is_empty() {
                params.push(("search", search.to_string()));
            }
        }
        if let Some(technology) = query.technology {
            params.push(("technology", technology.as_str().to_string()));
        }

        let response = self
            .authorize(self.http.get(self.url("/commands")).query(&params))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn get(&self, id: i64) -> Result<Command, ApiError> {
        let response = self
            .authorize(self.http.get(self.url(&format!("/commands/{}", id))))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn create(&self, payload: &CommandPayload) -> Result<Command, ApiError> {
        let response = self
            .authorize(self.http.post(self.url("/commands")).json(payload))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn update(&self, id: i64, payload: &CommandPayload) -> Result<Command, ApiError> {
        let response = self
            .authorize(
                self.http
                    .put(self.url(&format!("/commands/{}", id)))
                    .json(payload),
            )
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .authorize(self.http.delete(self.url(&format!("/commands/{}", id))))
            .send()
            .await?;

        // DELETE answers 204 with no body.
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }
        Ok(())
    }
}
