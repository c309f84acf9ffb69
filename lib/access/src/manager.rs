//! Session manager: the single owner of "who is logged in".
//!
//! The manager bridges the auth API, the profile enricher and the credential
//! store. State changes are published on a `watch` channel so route guards
//! and views re-evaluate whenever the session changes.

use rootcause::prelude::Report;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::api::{AuthApi, Credentials, ProfileApi, VisitorRegistration};
use crate::enrich::{fetch_profile, merge_profile};
use crate::error::{ApiError, SessionError, StoreError};
use crate::role::Role;
use crate::store::{CredentialRecord, CredentialStore};
use crate::user::{ProfileUpdate, SessionUser};

/// Behaviour switches for the session manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Ask the backend to confirm a restored token during `check_auth`.
    pub verify_on_startup: bool,
}

/// Snapshot of the session as seen by guards and views.
///
/// A state is authenticated exactly when it holds a credential record, so
/// an authenticated state always has both a user and a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    record: Option<CredentialRecord>,
    is_loading: bool,
}

impl SessionState {
    /// The state before `check_auth` has finished.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            record: None,
            is_loading: true,
        }
    }

    /// A resolved state with nobody logged in.
    #[must_use]
    pub fn signed_out() -> Self {
        Self {
            record: None,
            is_loading: false,
        }
    }

    /// A resolved state for the given credentials.
    #[must_use]
    pub fn signed_in(record: CredentialRecord) -> Self {
        Self {
            record: Some(record),
            is_loading: false,
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.record.as_ref().map(|record| &record.user)
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user().map(|user| user.role)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.record.is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Returns true iff the session is resolved, authenticated, and its role
    /// is one of `roles`.
    #[must_use]
    pub fn has_role<R: AsRef<[Role]>>(&self, roles: R) -> bool {
        if self.is_loading {
            return false;
        }
        self.role()
            .is_some_and(|role| roles.as_ref().contains(&role))
    }

    fn token(&self) -> Option<&str> {
        self.record.as_ref().map(|record| record.token.as_str())
    }
}

/// Owns the session and its persistence.
///
/// Share it by handle (`Arc<SessionManager>`); all mutation goes through
/// the methods below.
pub struct SessionManager {
    auth: Arc<dyn AuthApi>,
    profiles: Arc<dyn ProfileApi>,
    store: Arc<dyn CredentialStore>,
    options: SessionOptions,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// Creates a manager in the loading state. Call [`check_auth`] next.
    ///
    /// [`check_auth`]: SessionManager::check_auth
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthApi>,
        profiles: Arc<dyn ProfileApi>,
        store: Arc<dyn CredentialStore>,
        options: SessionOptions,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::loading());
        Self {
            auth,
            profiles,
            store,
            options,
            state,
        }
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Returns a receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn user(&self) -> Option<SessionUser> {
        self.state.borrow().user().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Bearer token of the active session, for other API calls.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_string)
    }

    /// See [`SessionState::has_role`].
    #[must_use]
    pub fn has_role<R: AsRef<[Role]>>(&self, roles: R) -> bool {
        self.state.borrow().has_role(roles)
    }

    /// Restores the session from the credential store.
    ///
    /// A readable record is trusted as-is unless `verify_on_startup` is set.
    /// An unreadable or corrupt record forces a logout. The state is always
    /// resolved (`is_loading == false`) when this returns.
    #[instrument(skip(self))]
    pub async fn check_auth(&self) -> SessionState {
        self.state.send_modify(|state| state.is_loading = true);

        match self.read_record() {
            Ok(Some(record)) => {
                let restored = self.confirm(record).await;
                if restored.is_none() {
                    self.clear_store();
                }
                debug!(restored = restored.is_some(), "session restore finished");
                self.state.send_modify(|state| state.record = restored);
            }
            Ok(None) => {
                self.state.send_modify(|state| state.record = None);
            }
            Err(e) => {
                warn!(error = %e, "discarding stored session");
                self.logout();
            }
        }

        self.state.send_modify(|state| state.is_loading = false);
        self.snapshot()
    }

    /// Authenticates against the backend and opens a session.
    ///
    /// Guides and visitors are enriched with their profile; a failed lookup
    /// is logged and the session falls back to the login response.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` if the backend rejects the login, and
    /// `SessionError::Store` if the session cannot be persisted.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<SessionUser, Report<SessionError>> {
        let response = self
            .auth
            .login(credentials)
            .await
            .map_err(SessionError::Api)?;

        let user = match fetch_profile(
            self.profiles.as_ref(),
            &response.token,
            response.role,
            response.id,
        )
        .await
        {
            Ok(profile) => merge_profile(&response, profile),
            Err(e) => {
                warn!(
                    error = %e,
                    user_id = %response.id,
                    role = %response.role,
                    "profile lookup failed, using login data"
                );
                response.basic_user()
            }
        };

        self.establish(CredentialRecord::new(response.token, user.clone()))?;
        info!(user_id = %user.id, role = %user.role, "logged in");
        Ok(user)
    }

    /// Creates a visitor account and opens a session for it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` if registration is rejected, and
    /// `SessionError::Store` if the session cannot be persisted.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register_visitor(
        &self,
        registration: &VisitorRegistration,
    ) -> Result<SessionUser, Report<SessionError>> {
        let response = self
            .auth
            .register_visitor(registration)
            .await
            .map_err(SessionError::Api)?;

        let user = response.basic_user();
        self.establish(CredentialRecord::new(response.token, user.clone()))?;
        info!(user_id = %user.id, "visitor registered");
        Ok(user)
    }

    /// Clears the session from memory and from the store. Never fails.
    pub fn logout(&self) {
        self.clear_store();
        self.state.send_modify(|state| state.record = None);
    }

    /// Notifies the backend, then clears the session locally.
    ///
    /// The backend call is best-effort; the local logout always happens.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) {
        if let Some(token) = self.token() {
            if let Err(e) = self.auth.logout(&token).await {
                debug!(error = %e, "backend logout failed");
            }
        }
        self.logout();
    }

    /// Merges `update` into the current user and re-persists it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAuthenticated` without a session, and
    /// `SessionError::Store` if the update cannot be persisted.
    pub fn update_user(&self, update: ProfileUpdate) -> Result<SessionUser, Report<SessionError>> {
        let mut record = self
            .state
            .borrow()
            .record
            .clone()
            .ok_or(SessionError::NotAuthenticated)?;

        record.user.apply(update);
        let user = record.user.clone();
        self.establish(record)?;
        Ok(user)
    }

    /// Reacts to an error from any later API call.
    ///
    /// A 401 means the backend no longer accepts the token: the session is
    /// cleared and guards send the user to the login page. Returns true if
    /// the session was cleared.
    pub fn handle_api_error(&self, error: &ApiError) -> bool {
        if !error.is_unauthorized() || !self.is_authenticated() {
            return false;
        }
        warn!("backend rejected the session token, logging out");
        self.logout();
        true
    }

    fn read_record(&self) -> Result<Option<CredentialRecord>, StoreError> {
        self.store
            .read()?
            .map(|raw| CredentialRecord::decode(&raw))
            .transpose()
    }

    async fn confirm(&self, record: CredentialRecord) -> Option<CredentialRecord> {
        if !self.options.verify_on_startup {
            return Some(record);
        }

        match self.auth.verify(&record.token).await {
            Ok(verification) if verification.valid => Some(record),
            Ok(_) => {
                info!(user_id = %record.user.id, "stored token is no longer valid");
                None
            }
            Err(e) if e.is_unauthorized() => {
                info!(user_id = %record.user.id, "stored token was rejected");
                None
            }
            Err(e) => {
                warn!(error = %e, "could not verify stored token, keeping session");
                Some(record)
            }
        }
    }

    fn establish(&self, record: CredentialRecord) -> Result<(), Report<SessionError>> {
        let encoded = record.encode().map_err(SessionError::Store)?;
        self.store.write(&encoded).map_err(SessionError::Store)?;
        self.state.send_modify(|state| state.record = Some(record));
        Ok(())
    }

    fn clear_store(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear stored credentials");
        }
    }
}
