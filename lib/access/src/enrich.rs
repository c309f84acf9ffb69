//! Best-effort profile enrichment after login.
//!
//! The login response only carries the account summary. Guides and visitors
//! also have a role-specific profile with phone, national ID and
//! registration date, fetched here and merged into the session user.

use parque_core::UserId;

use crate::api::{AuthResponse, ProfileApi};
use crate::error::ApiError;
use crate::role::Role;
use crate::user::{DEFAULT_STATUS, ProfileRecord, SessionUser};

/// Fetches the role-specific profile for a freshly authenticated account.
///
/// Admins have no separate profile and resolve to `Ok(None)`.
pub async fn fetch_profile(
    profiles: &dyn ProfileApi,
    token: &str,
    role: Role,
    id: UserId,
) -> Result<Option<ProfileRecord>, ApiError> {
    match role {
        Role::Admin => Ok(None),
        Role::Guide => profiles.guide_profile(token, id).await.map(Some),
        Role::Visitor => profiles.visitor_profile(token, id).await.map(Some),
    }
}

/// Combines the login response with a successfully fetched profile.
///
/// `id` and `role` are always taken from the login response. Name and email
/// prefer non-empty profile values. Status defaults to `ACTIVO`.
#[must_use]
pub fn merge_profile(response: &AuthResponse, profile: Option<ProfileRecord>) -> SessionUser {
    let profile = profile.unwrap_or_default();
    SessionUser {
        id: response.id,
        first_name: prefer(profile.first_name, &response.first_name),
        last_name: prefer(profile.last_name, &response.last_name),
        email: prefer(profile.email, &response.email),
        role: response.role,
        phone: non_empty(profile.phone),
        national_id: non_empty(profile.national_id),
        registered_at: non_empty(profile.registered_at),
        status: Some(non_empty(profile.status).unwrap_or_else(|| DEFAULT_STATUS.to_string())),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn prefer(value: Option<String>, fallback: &str) -> String {
    non_empty(value).unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    fn response(role: Role) -> AuthResponse {
        AuthResponse {
            token: "jwt".to_string(),
            token_type: "Bearer".to_string(),
            id: UserId::new(42),
            first_name: "Ana".to_string(),
            last_name: "Rojas".to_string(),
            email: "ana@example.com".to_string(),
            role,
        }
    }

    struct FixedProfiles;

    #[async_trait]
    impl ProfileApi for FixedProfiles {
        async fn visitor_profile(&self, _token: &str, _id: UserId) -> Result<ProfileRecord, ApiError> {
            Ok(ProfileRecord {
                phone: Some("visitor-phone".to_string()),
                ..ProfileRecord::default()
            })
        }

        async fn guide_profile(&self, _token: &str, _id: UserId) -> Result<ProfileRecord, ApiError> {
            Ok(ProfileRecord {
                phone: Some("guide-phone".to_string()),
                ..ProfileRecord::default()
            })
        }
    }

    #[tokio::test]
    async fn fetch_dispatches_by_role() {
        let guide = fetch_profile(&FixedProfiles, "jwt", Role::Guide, UserId::new(1))
            .await
            .expect("guide");
        assert_eq!(guide.and_then(|p| p.phone).as_deref(), Some("guide-phone"));

        let visitor = fetch_profile(&FixedProfiles, "jwt", Role::Visitor, UserId::new(1))
            .await
            .expect("visitor");
        assert_eq!(visitor.and_then(|p| p.phone).as_deref(), Some("visitor-phone"));

        let admin = fetch_profile(&FixedProfiles, "jwt", Role::Admin, UserId::new(1))
            .await
            .expect("admin");
        assert!(admin.is_none());
    }

    #[test]
    fn profile_values_win_over_login_values() {
        let profile = ProfileRecord {
            first_name: Some("Ana María".to_string()),
            email: Some("ana.maria@example.com".to_string()),
            phone: Some("3001234567".to_string()),
            national_id: Some("1049".to_string()),
            registered_at: Some("2024-03-01T10:00:00".to_string()),
            status: Some("INACTIVO".to_string()),
            ..ProfileRecord::default()
        };
        let user = merge_profile(&response(Role::Visitor), Some(profile));

        assert_eq!(user.first_name, "Ana María");
        assert_eq!(user.last_name, "Rojas");
        assert_eq!(user.email, "ana.maria@example.com");
        assert_eq!(user.phone.as_deref(), Some("3001234567"));
        assert_eq!(user.national_id.as_deref(), Some("1049"));
        assert_eq!(user.status.as_deref(), Some("INACTIVO"));
    }

    #[test]
    fn empty_profile_strings_fall_back_to_login() {
        let profile = ProfileRecord {
            first_name: Some(String::new()),
            phone: Some(String::new()),
            ..ProfileRecord::default()
        };
        let user = merge_profile(&response(Role::Guide), Some(profile));
        assert_eq!(user.first_name, "Ana");
        assert!(user.phone.is_none());
    }

    #[test]
    fn id_and_role_always_come_from_login() {
        let user = merge_profile(&response(Role::Guide), Some(ProfileRecord::default()));
        assert_eq!(user.id, UserId::new(42));
        assert_eq!(user.role, Role::Guide);
    }

    #[test]
    fn missing_profile_defaults_status() {
        let user = merge_profile(&response(Role::Admin), None);
        assert_eq!(user.status.as_deref(), Some(DEFAULT_STATUS));
        assert!(user.phone.is_none());
    }
}
