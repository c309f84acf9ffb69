//! The portal's route table.
//!
//! Each path pattern carries the access rule its page is mounted with.
//! `authorize` resolves a concrete path against the table and runs the
//! matching guard, so navigation decisions live in one place.

use crate::gate::{GateDecision, PublicRouteGuard, RoleRouteGuard, RouteGuard, paths};
use crate::manager::SessionState;
use crate::role::Role;

/// Access rule attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone may open the page, signed in or not.
    Open,
    /// Anonymous-only page; signed-in users go to their landing page.
    Public,
    /// Signed-in users holding one of the roles.
    Roles(&'static [Role]),
}

impl Access {
    fn evaluate(&self, state: &SessionState) -> GateDecision {
        match self {
            Self::Open => GateDecision::Authorized,
            Self::Public => PublicRouteGuard.evaluate(state),
            Self::Roles(roles) => RoleRouteGuard::roles(roles.to_vec()).evaluate(state),
        }
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    /// Path pattern; segments starting with `:` match any single segment.
    pub pattern: &'static str,
    pub access: Access,
}

impl RouteEntry {
    #[must_use]
    pub const fn new(pattern: &'static str, access: Access) -> Self {
        Self { pattern, access }
    }

    /// Returns true if `path` matches this entry's pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let mut expected = segments(self.pattern);
        let mut actual = segments(path);
        loop {
            match (expected.next(), actual.next()) {
                (None, None) => return true,
                (Some(pattern), Some(segment)) => {
                    if !pattern.starts_with(':') && pattern != segment {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|segment| !segment.is_empty())
}

/// What the router should do for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The session is still being restored.
    Loading,
    /// Render the page registered under this pattern.
    Render(&'static str),
    /// Navigate to another path, replacing the current history entry.
    Redirect(&'static str),
}

const VISITOR: &[Role] = &[Role::Visitor];
const GUIDE: &[Role] = &[Role::Guide];
const ADMIN: &[Role] = &[Role::Admin];

const PORTAL_ROUTES: &[RouteEntry] = &[
    RouteEntry::new(paths::HOME, Access::Open),
    RouteEntry::new("/senderos", Access::Open),
    RouteEntry::new("/senderos/:id", Access::Open),
    RouteEntry::new(paths::LOGIN, Access::Public),
    RouteEntry::new(paths::REGISTER, Access::Public),
    RouteEntry::new("/reserva/crear", Access::Roles(VISITOR)),
    RouteEntry::new(paths::VISITOR_HOME, Access::Roles(VISITOR)),
    RouteEntry::new("/reserva/editar/:id", Access::Roles(VISITOR)),
    RouteEntry::new("/mi-perfil", Access::Roles(VISITOR)),
    RouteEntry::new(paths::GUIDE_HOME, Access::Roles(GUIDE)),
    RouteEntry::new("/guia/asignaciones", Access::Roles(GUIDE)),
    RouteEntry::new("/guia/recorrido/:id", Access::Roles(GUIDE)),
    RouteEntry::new("/guia/perfil", Access::Roles(GUIDE)),
    RouteEntry::new(paths::ADMIN_HOME, Access::Roles(ADMIN)),
    RouteEntry::new("/admin/senderos", Access::Roles(ADMIN)),
    RouteEntry::new("/admin/reservas", Access::Roles(ADMIN)),
    RouteEntry::new("/admin/guias", Access::Roles(ADMIN)),
    RouteEntry::new("/admin/visitantes", Access::Roles(ADMIN)),
    RouteEntry::new("/admin/horarios", Access::Roles(ADMIN)),
    RouteEntry::new("/admin/reportes", Access::Roles(ADMIN)),
    RouteEntry::new(paths::UNAUTHORIZED, Access::Open),
    RouteEntry::new(paths::NOT_FOUND, Access::Open),
];

/// Ordered set of routes; the first matching entry wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    #[must_use]
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// The park portal's routes.
    #[must_use]
    pub fn portal() -> Self {
        Self::new(PORTAL_ROUTES.to_vec())
    }

    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Returns the entry serving `path`, if any.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.matches(path))
    }

    /// Decides what to do when the user navigates to `path`.
    ///
    /// Unknown paths redirect to the not-found page.
    #[must_use]
    pub fn authorize(&self, path: &str, state: &SessionState) -> Navigation {
        let Some(entry) = self.resolve(path) else {
            return Navigation::Redirect(paths::NOT_FOUND);
        };

        let decision = entry.access.evaluate(state);
        match decision.redirect_path() {
            Some(target) => Navigation::Redirect(target),
            None if decision == GateDecision::Loading => Navigation::Loading,
            None => Navigation::Render(entry.pattern),
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::portal()
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
                id: UserId::new(1),
                first_name: "Marta".to_string(),
                last_name: "Gil".to_string(),
                email: "marta@parque.co".to_string(),
                role,
                phone: None,
                national_id: None,
                registered_at: None,
                status: None,
            },
        ))
    }

    #[test]
    fn parameter_segments_match_any_value() {
        let entry = RouteEntry::new("/guia/recorrido/:id", Access::Roles(GUIDE));
        assert!(entry.matches("/guia/recorrido/7"));
        assert!(entry.matches("/guia/recorrido/7/"));
        assert!(entry.matches("/guia/recorrido/7?tab=grupo"));
        assert!(!entry.matches("/guia/recorrido"));
        assert!(!entry.matches("/guia/recorrido/7/extra"));
    }

    #[test]
    fn root_only_matches_root() {
        let entry = RouteEntry::new("/", Access::Open);
        assert!(entry.matches("/"));
        assert!(!entry.matches("/senderos"));
    }

    #[test]
    fn tour_detail_requires_guide() {
        let table = RouteTable::portal();
        assert_eq!(
            table.authorize("/guia/recorrido/7", &signed_in(Role::Guide)),
            Navigation::Render("/guia/recorrido/:id")
        );
        assert_eq!(
            table.authorize("/guia/recorrido/7", &signed_in(Role::Visitor)),
            Navigation::Redirect("/unauthorized")
        );
        assert_eq!(
            table.authorize("/guia/recorrido/7", &SessionState::signed_out()),
            Navigation::Redirect("/login")
        );
    }

    #[test]
    fn login_page_redirects_signed_in_users_home() {
        let table = RouteTable::portal();
        assert_eq!(
            table.authorize("/login", &signed_in(Role::Admin)),
            Navigation::Redirect("/admin/dashboard")
        );
        assert_eq!(
            table.authorize("/login", &SessionState::signed_out()),
            Navigation::Render("/login")
        );
    }

    #[test]
    fn open_pages_render_while_loading() {
        let table = RouteTable::portal();
        assert_eq!(
            table.authorize("/senderos/3", &SessionState::loading()),
            Navigation::Render("/senderos/:id")
        );
        assert_eq!(
            table.authorize("/admin/reportes", &SessionState::loading()),
            Navigation::Loading
        );
    }

    #[test]
    fn unknown_paths_go_to_not_found() {
        let table = RouteTable::portal();
        assert_eq!(
            table.authorize("/nowhere", &signed_in(Role::Admin)),
            Navigation::Redirect("/404")
        );
        assert_eq!(
            table.authorize("/404", &SessionState::signed_out()),
            Navigation::Render("/404")
        );
    }

    #[test]
    fn every_role_home_is_reachable_by_that_role() {
        let table = RouteTable::portal();
        for role in Role::ALL {
            assert_eq!(
                table.authorize(role.home_path(), &signed_in(role)),
                Navigation::Render(role.home_path())
            );
        }
    }
}
