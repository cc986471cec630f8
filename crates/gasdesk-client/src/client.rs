//! `reqwest`-backed API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use gasdesk_core::config::ApiConfig;
use gasdesk_core::error::AppError;
use gasdesk_core::result::AppResult;
use gasdesk_core::traits::{IdentityProvider, SessionStore};
use gasdesk_core::types::{Credentials, LoginResponse, Session, User};

use crate::endpoints;

/// Error body the API sends with non-2xx responses.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the backend REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET path` with the session attached as a bearer token.
    pub async fn get_authenticated<T: DeserializeOwned>(
        &self,
        path: &str,
        sessions: &dyn SessionStore,
    ) -> AppResult<T> {
        self.authenticated::<(), T>(Method::GET, path, None, sessions)
            .await
    }

    /// `POST path` with a JSON body and the session attached.
    pub async fn post_authenticated<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        sessions: &dyn SessionStore,
    ) -> AppResult<T> {
        self.authenticated(Method::POST, path, Some(body), sessions)
            .await
    }

    /// Send an authenticated request. A 401/403 answer deletes the session.
    async fn authenticated<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        sessions: &dyn SessionStore,
    ) -> AppResult<T> {
        let session = sessions
            .get_session()
            .await?
            .ok_or_else(|| AppError::authentication("Not logged in"))?;

        let mut request = self
            .http
            .request(method, self.url(path))
            .header(AUTHORIZATION, session.bearer());
        if let Some(body) = body {
            request = request.json(body);
        }

        let result = self.send(request).await;
        if let Err(e) = &result {
            if e.is_authentication() {
                warn!(path, status = ?e.status, "Session rejected by API, clearing it");
                sessions.delete_session().await?;
            }
        }
        result
    }

    /// Send a request and classify the outcome.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "API request produced no response");
            AppError::from(e)
        })?;
        let response = Self::check_status(response).await?;
        response.json::<T>().await.map_err(AppError::from)
    }

    async fn check_status(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), url = %response.url(), "API request succeeded");
            return Ok(response);
        }

        let fallback = status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(fallback);

        if status.is_server_error() {
            warn!(status = status.as_u16(), message = %message, "API server error");
        } else {
            debug!(status = status.as_u16(), message = %message, "API request rejected");
        }
        Err(AppError::from_status(status.as_u16(), message))
    }
}

#[async_trait]
impl IdentityProvider for ApiClient {
    async fn login(&self, credentials: &Credentials) -> AppResult<LoginResponse> {
        let request = self
            .http
            .post(self.url(endpoints::LOGIN))
            .json(credentials);
        self.send(request).await
    }

    async fn current_user(&self, session: &Session) -> AppResult<User> {
        let request = self
            .http
            .get(self.url(endpoints::ME))
            .header(AUTHORIZATION, session.bearer());
        self.send(request).await
    }
}
