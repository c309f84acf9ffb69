//! Seams to the external REST backend.
//!
//! The session manager only talks to the backend through these traits. The
//! `parque-client` crate implements them over HTTP; tests use in-memory
//! fakes.

use async_trait::async_trait;
use parque_core::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ApiError;
use crate::role::Role;
use crate::user::{ProfileRecord, SessionUser};

/// Login form payload for `POST /auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Visitor sign-up payload for `POST /auth/registro/visitante`.
#[derive(Clone, Serialize, Deserialize)]
pub struct VisitorRegistration {
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
}

impl fmt::Debug for VisitorRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitorRegistration")
            .field("national_id", &self.national_id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of a successful login or registration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token scheme, always `Bearer` on the current backend.
    #[serde(rename = "tipo", default = "default_token_type")]
    pub token_type: String,
    pub id: UserId,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "rol")]
    pub role: Role,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl AuthResponse {
    /// Builds the session user from the response alone, without enrichment.
    #[must_use]
    pub fn basic_user(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            role: self.role,
            phone: None,
            national_id: None,
            registered_at: None,
            status: None,
        }
    }
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Body of `GET /auth/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenVerification {
    pub valid: bool,
}

/// Authentication endpoints.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a token and the account summary.
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError>;

    /// Creates a visitor account and logs it in.
    async fn register_visitor(
        &self,
        registration: &VisitorRegistration,
    ) -> Result<AuthResponse, ApiError>;

    /// Asks the backend whether a token is still valid.
    async fn verify(&self, token: &str) -> Result<TokenVerification, ApiError>;

    /// Tells the backend the token is no longer used.
    async fn logout(&self, token: &str) -> Result<(), ApiError>;
}

/// Role-specific profile lookups used to enrich a fresh session.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait ProfileApi: Send + Sync {
    /// `GET /visitantes/{id}`.
    async fn visitor_profile(&self, token: &str, id: UserId) -> Result<ProfileRecord, ApiError>;

    /// `GET /guias/{id}`.
    async fn guide_profile(&self, token: &str, id: UserId) -> Result<ProfileRecord, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_decodes_backend_body() {
        let response: AuthResponse = serde_json::from_str(
            r#"{"token":"jwt","tipo":"Bearer","id":42,"nombre":"Ana","apellido":"Rojas","email":"ana@example.com","rol":"VISITANTE"}"#,
        )
        .expect("deserialize");
        assert_eq!(response.id, UserId::new(42));
        assert_eq!(response.role, Role::Visitor);
        assert_eq!(response.token_type, "Bearer");
    }

    #[test]
    fn token_type_defaults_to_bearer() {
        let response: AuthResponse = serde_json::from_str(
            r#"{"token":"jwt","id":1,"nombre":"A","apellido":"B","email":"a@b.co","rol":"ADMIN"}"#,
        )
        .expect("deserialize");
        assert_eq!(response.token_type, "Bearer");
    }

    #[test]
    fn basic_user_keeps_login_fields() {
        let response: AuthResponse = serde_json::from_str(
            r#"{"token":"jwt","id":9,"nombre":"Luis","apellido":"Páez","email":"l@x.co","rol":"GUIA"}"#,
        )
        .expect("deserialize");
        let user = response.basic_user();
        assert_eq!(user.id, UserId::new(9));
        assert_eq!(user.role, Role::Guide);
        assert_eq!(user.first_name, "Luis");
        assert!(user.phone.is_none());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let credentials = Credentials::new("ana@example.com", "Secreta123");
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("Secreta123"));
        assert!(rendered.contains("ana@example.com"));
    }

    #[test]
    fn registration_uses_backend_field_names() {
        let registration = VisitorRegistration {
            national_id: "1049".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Rojas".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            password: "Secreta123".to_string(),
        };
        let json = serde_json::to_value(&registration).expect("serialize");
        assert_eq!(json["cedula"], "1049");
        assert_eq!(json["nombre"], "Ana");
        assert!(json.get("telefono").is_none());
    }
}
