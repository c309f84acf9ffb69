//! REST client for the park backend.
//!
//! `ApiClient` implements the access crate's `AuthApi` and `ProfileApi`
//! seams and exposes the remaining account endpoints as inherent methods.
//! Non-success statuses are translated into `ApiError` in one place; the
//! client never retries.

use async_trait::async_trait;
use parque_access::{
    ApiError, AuthApi, AuthResponse, Credentials, ProfileApi, ProfileRecord, TokenVerification,
    VisitorRegistration,
};
use parque_core::UserId;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use rootcause::prelude::Report;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Guide sign-up payload for `POST /auth/registro/guia` (admin only).
#[derive(Clone, Serialize, Deserialize)]
pub struct GuideRegistration {
    #[serde(rename = "cedula")]
    pub national_id: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    #[serde(rename = "especialidades", default, skip_serializing_if = "Option::is_none")]
    pub specialties: Option<String>,
    #[serde(rename = "maxPersonasGrupo", default, skip_serializing_if = "Option::is_none")]
    pub max_group_size: Option<u32>,
}

impl fmt::Debug for GuideRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuideRegistration")
            .field("national_id", &self.national_id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Generic acknowledgement body (`ApiResponseDTO`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body shape shared by the backend's exception handlers.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for `config.api_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not absolute or the HTTP client
    /// cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, Report<ClientError>> {
        let base = reqwest::Url::parse(&config.api_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: config.api_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: config.api_url.clone(),
                reason: format!("unsupported scheme '{}'", base.scheme()),
            }
            .into());
        }

        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(config.timeout_seconds));
        let http = builder.build().map_err(|e| ClientError::Build {
            details: e.to_string(),
        })?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates a guide account. Requires an admin token.
    #[instrument(skip(self, token, registration), fields(email = %registration.email))]
    pub async fn register_guide(
        &self,
        token: &str,
        registration: &GuideRegistration,
    ) -> Result<AuthResponse, ApiError> {
        let request = self
            .request(Method::POST, "/auth/registro/guia", Some(token))
            .json(registration);
        self.send(request).await
    }

    /// Changes the password of `user_id`.
    #[instrument(skip(self, token, current_password, new_password))]
    pub async fn change_password(
        &self,
        token: &str,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<Acknowledgement, ApiError> {
        let user_id = user_id.get().to_string();
        let request = self
            .request(Method::POST, "/auth/cambiar-password", Some(token))
            .query(&[
                ("usuarioId", user_id.as_str()),
                ("passwordActual", current_password),
                ("passwordNueva", new_password),
            ]);
        self.send(request).await
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.http.request(method, format!("{}{path}", self.base_url));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.dispatch(request).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode {
            details: e.to_string(),
        })
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.dispatch(request).await.map(|_| ())
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Network {
            details: e.to_string(),
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "backend response");
        if status.is_success() {
            return Ok(response);
        }

        // An unreadable error body still maps by status alone.
        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status, &body))
    }
}

/// Maps a non-success response to the error taxonomy.
fn error_for_status(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty());

    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation {
            message: message.unwrap_or_else(|| "invalid data".to_string()),
        },
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound {
            message: message.unwrap_or_else(|| "resource not found".to_string()),
        },
        status if status.is_server_error() => ApiError::Server {
            status: status.as_u16(),
        },
        status => ApiError::Rejected {
            status: status.as_u16(),
            message: message.unwrap_or_default(),
        },
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AuthApi for ApiClient {
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let request = self
            .request(Method::POST, "/auth/login", None)
            .json(credentials);
        self.send(request).await
    }

    #[instrument(skip(self, registration), fields(email = %registration.email))]
    async fn register_visitor(
        &self,
        registration: &VisitorRegistration,
    ) -> Result<AuthResponse, ApiError> {
        let request = self
            .request(Method::POST, "/auth/registro/visitante", None)
            .json(registration);
        self.send(request).await
    }

    async fn verify(&self, token: &str) -> Result<TokenVerification, ApiError> {
        self.send(self.request(Method::GET, "/auth/verify", Some(token)))
            .await
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::POST, "/auth/logout", Some(token)))
            .await
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl ProfileApi for ApiClient {
    async fn visitor_profile(&self, token: &str, id: UserId) -> Result<ProfileRecord, ApiError> {
        let path = format!("/visitantes/{}", id.get());
        self.send(self.request(Method::GET, &path, Some(token))).await
    }

    async fn guide_profile(&self, token: &str, id: UserId) -> Result<ProfileRecord, ApiError> {
        let path = format!("/guias/{}", id.get());
        self.send(self.request(Method::GET, &path, Some(token))).await
    }
}
