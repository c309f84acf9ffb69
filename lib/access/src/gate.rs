//! Route authorization gate.
//!
//! Guards turn a [`SessionState`] into a [`GateDecision`]. They hold no state
//! of their own; a view re-runs [`RouteGuard::evaluate`] whenever the session
//! publishes a change.

use crate::manager::SessionState;
use crate::role::Role;

/// Well-known portal paths targeted by redirects.
pub mod paths {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const UNAUTHORIZED: &str = "/unauthorized";
    pub const NOT_FOUND: &str = "/404";
    pub const ADMIN_HOME: &str = "/admin/dashboard";
    pub const GUIDE_HOME: &str = "/guia/agenda";
    pub const VISITOR_HOME: &str = "/mis-reservas";
}

impl Role {
    /// Landing page for an authenticated user with this role.
    #[must_use]
    pub const fn home_path(&self) -> &'static str {
        match self {
            Self::Admin => paths::ADMIN_HOME,
            Self::Guide => paths::GUIDE_HOME,
            Self::Visitor => paths::VISITOR_HOME,
        }
    }
}

/// Outcome of evaluating a guard against the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The session is still being restored; show a placeholder.
    Loading,
    /// Render the wrapped content.
    Authorized,
    /// Send the user to the login page.
    RedirectLogin,
    /// The user is signed in but may not open this route.
    RedirectUnauthorized,
    /// The user is already signed in; send them to their landing page.
    RedirectRoleHome(Role),
}

impl GateDecision {
    /// Target of the redirect, if the decision is one.
    #[must_use]
    pub const fn redirect_path(&self) -> Option<&'static str> {
        match self {
            Self::Loading | Self::Authorized => None,
            Self::RedirectLogin => Some(paths::LOGIN),
            Self::RedirectUnauthorized => Some(paths::UNAUTHORIZED),
            Self::RedirectRoleHome(role) => Some(role.home_path()),
        }
    }

    /// Returns true if the wrapped content may be rendered.
    #[must_use]
    pub const fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }
}

/// A check that decides whether a route renders or redirects.
pub trait RouteGuard {
    fn evaluate(&self, state: &SessionState) -> GateDecision;
}

/// Guard for pages meant for anonymous users (login, registration).
///
/// Signed-in users are sent to their role's landing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublicRouteGuard;

impl RouteGuard for PublicRouteGuard {
    fn evaluate(&self, state: &SessionState) -> GateDecision {
        if state.is_loading() {
            return GateDecision::Loading;
        }
        match state.role() {
            Some(role) => GateDecision::RedirectRoleHome(role),
            None => GateDecision::Authorized,
        }
    }
}

/// Guard for pages restricted to signed-in users, optionally by role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRouteGuard {
    roles: Vec<Role>,
    require_auth: bool,
}

impl RoleRouteGuard {
    /// Any signed-in user may pass.
    #[must_use]
    pub fn authenticated() -> Self {
        Self {
            roles: Vec::new(),
            require_auth: true,
        }
    }

    /// Only signed-in users holding one of `roles` may pass.
    #[must_use]
    pub fn roles(roles: impl Into<Vec<Role>>) -> Self {
        Self {
            roles: roles.into(),
            require_auth: true,
        }
    }

    /// Sets whether an anonymous user is sent to the login page.
    ///
    /// With `false` and a non-empty role list, anonymous users are sent to
    /// the unauthorized page instead.
    #[must_use]
    pub fn require_auth(mut self, require_auth: bool) -> Self {
        self.require_auth = require_auth;
        self
    }

    #[must_use]
    pub fn allowed_roles(&self) -> &[Role] {
        &self.roles
    }
}

impl Default for RoleRouteGuard {
    fn default() -> Self {
        Self::authenticated()
    }
}

impl RouteGuard for RoleRouteGuard {
    fn evaluate(&self, state: &SessionState) -> GateDecision {
        if state.is_loading() {
            return GateDecision::Loading;
        }
        if self.require_auth && !state.is_authenticated() {
            return GateDecision::RedirectLogin;
        }
        if !self.roles.is_empty() {
            let permitted = state
                .role()
                .is_some_and(|role| self.roles.contains(&role));
            if !permitted {
                return GateDecision::RedirectUnauthorized;
            }
        }
        GateDecision::Authorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CredentialRecord;
    use crate::user::SessionUser;
    use parque_core::UserId;

    fn signed_in(role: Role) -> SessionState {
        SessionState::signed_in(CredentialRecord::new(
            "jwt",
            SessionUser {
                id: UserId::new(9),
                first_name: "Luis".to_string(),
                last_name: "Páez".to_string(),
                email: "luis@parque.co".to_string(),
                role,
                phone: None,
                national_id: None,
                registered_at: None,
                status: None,
            },
        ))
    }

    #[test]
    fn public_guard_waits_while_loading() {
        assert_eq!(
            PublicRouteGuard.evaluate(&SessionState::loading()),
            GateDecision::Loading
        );
    }

    #[test]
    fn public_guard_renders_for_anonymous_users() {
        let decision = PublicRouteGuard.evaluate(&SessionState::signed_out());
        assert!(decision.is_authorized());
        assert_eq!(decision.redirect_path(), None);
    }

    #[test]
    fn public_guard_sends_guide_to_agenda() {
        let decision = PublicRouteGuard.evaluate(&signed_in(Role::Guide));
        assert_eq!(decision, GateDecision::RedirectRoleHome(Role::Guide));
        assert_eq!(decision.redirect_path(), Some("/guia/agenda"));
    }

    #[test]
    fn every_role_has_a_distinct_home() {
        assert_eq!(Role::Admin.home_path(), "/admin/dashboard");
        assert_eq!(Role::Guide.home_path(), "/guia/agenda");
        assert_eq!(Role::Visitor.home_path(), "/mis-reservas");
    }

    #[test]
    fn role_guard_waits_while_loading() {
        let guard = RoleRouteGuard::roles([Role::Admin]);
        assert_eq!(guard.evaluate(&SessionState::loading()), GateDecision::Loading);
    }

    #[test]
    fn role_guard_sends_anonymous_users_to_login() {
        let guard = RoleRouteGuard::roles([Role::Admin]);
        let decision = guard.evaluate(&SessionState::signed_out());
        assert_eq!(decision, GateDecision::RedirectLogin);
        assert_eq!(decision.redirect_path(), Some("/login"));
    }

    #[test]
    fn role_guard_blocks_guide_from_admin_content() {
        let guard = RoleRouteGuard::roles([Role::Admin]);
        let decision = guard.evaluate(&signed_in(Role::Guide));
        assert_eq!(decision, GateDecision::RedirectUnauthorized);
        assert_eq!(decision.redirect_path(), Some("/unauthorized"));
        assert!(!decision.is_authorized());
    }

    #[test]
    fn role_guard_admits_listed_roles() {
        let guard = RoleRouteGuard::roles([Role::Guide, Role::Visitor]);
        assert!(guard.evaluate(&signed_in(Role::Visitor)).is_authorized());
        assert!(guard.evaluate(&signed_in(Role::Guide)).is_authorized());
    }

    #[test]
    fn role_guard_without_roles_admits_any_signed_in_user() {
        let guard = RoleRouteGuard::authenticated();
        for role in Role::ALL {
            assert!(guard.evaluate(&signed_in(role)).is_authorized());
        }
    }

    #[test]
    fn optional_auth_with_roles_sends_anonymous_to_unauthorized() {
        let guard = RoleRouteGuard::roles([Role::Visitor]).require_auth(false);
        assert_eq!(
            guard.evaluate(&SessionState::signed_out()),
            GateDecision::RedirectUnauthorized
        );
    }

    #[test]
    fn optional_auth_without_roles_renders_for_anyone() {
        let guard = RoleRouteGuard::authenticated().require_auth(false);
        assert!(guard.evaluate(&SessionState::signed_out()).is_authorized());
    }
}
