//! Session context shared by every view.
//!
//! `AuthContext` pairs the session manager with a signal that mirrors its
//! state. Every operation that can change the session republishes the
//! snapshot, so guards and pages re-render on login, logout and updates.

use std::sync::Arc;

use leptos::prelude::*;
use parque_access::{
    ApiError, CredentialStore, Credentials, ProfileUpdate, SessionError, SessionManager,
    SessionOptions, SessionState, SessionUser, VisitorRegistration, paths,
};
use parque_client::{ApiClient, ClientConfig, ClientError};
use rootcause::prelude::Report;

/// Handle to the session, provided through Leptos context.
#[derive(Clone)]
pub struct AuthContext {
    manager: Arc<SessionManager>,
    state: RwSignal<SessionState>,
}

impl AuthContext {
    pub fn new(manager: Arc<SessionManager>) -> Self {
        let state = RwSignal::new(manager.snapshot());
        Self { manager, state }
    }

    /// Session backed by the HTTP client described by `config`.
    pub fn from_config(
        config: &ClientConfig,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, Report<ClientError>> {
        let client = Arc::new(ApiClient::new(config)?);
        let manager = SessionManager::new(
            client.clone(),
            client,
            store,
            SessionOptions {
                verify_on_startup: config.verify_on_startup,
            },
        );
        Ok(Self::new(Arc::new(manager)))
    }

    /// Reactive view of the session.
    pub fn state(&self) -> ReadSignal<SessionState> {
        self.state.read_only()
    }

    pub fn manager(&self) -> &Arc<SessionManager> {
        &self.manager
    }

    /// Current user, tracked.
    pub fn user(&self) -> Option<SessionUser> {
        self.state.with(|state| state.user().cloned())
    }

    pub async fn check_auth(&self) {
        self.manager.check_auth().await;
        self.publish();
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<SessionUser, Report<SessionError>> {
        let result = self.manager.login(credentials).await;
        self.publish();
        result
    }

    pub async fn register_visitor(
        &self,
        registration: &VisitorRegistration,
    ) -> Result<SessionUser, Report<SessionError>> {
        let result = self.manager.register_visitor(registration).await;
        self.publish();
        result
    }

    pub async fn sign_out(&self) {
        self.manager.sign_out().await;
        self.publish();
    }

    pub fn update_user(&self, update: ProfileUpdate) -> Result<SessionUser, Report<SessionError>> {
        let result = self.manager.update_user(update);
        self.publish();
        result
    }

    /// Applies the portal-wide reaction to a failed API call.
    ///
    /// Returns the path to navigate to: the login page after a 401 (the
    /// session is cleared first) or the unauthorized page after a 403.
    pub fn handle_api_error(&self, error: &ApiError) -> Option<&'static str> {
        match error {
            ApiError::Unauthorized => {
                self.manager.handle_api_error(error);
                self.publish();
                Some(paths::LOGIN)
            }
            ApiError::Forbidden => Some(paths::UNAUTHORIZED),
            _ => None,
        }
    }

    fn publish(&self) {
        self.state.set(self.manager.snapshot());
    }
}

/// Installs `auth` for the current component tree.
pub fn provide_auth(auth: AuthContext) {
    provide_context(auth);
}

/// Fetches the session context.
///
/// # Panics
///
/// Panics when called outside a tree set up with [`provide_auth`].
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// User-facing text for a failed login or registration.
pub fn session_error_message(error: &SessionError) -> String {
    match error {
        SessionError::Api(ApiError::Unauthorized) => "Correo o contraseña incorrectos".to_string(),
        SessionError::Api(ApiError::Validation { message }) => message.clone(),
        SessionError::Api(ApiError::Network { .. }) => {
            "No fue posible conectar con el servidor".to_string()
        }
        SessionError::Api(ApiError::Rejected { message, .. }) if !message.is_empty() => {
            message.clone()
        }
        SessionError::Store(_) => "No fue posible guardar la sesión en este navegador".to_string(),
        _ => "Ocurrió un error inesperado, intenta de nuevo".to_string(),
    }
}
