//! Session user record and the partial records merged into it.
//!
//! Field names on the wire follow the backend DTOs (`nombre`, `apellido`,
//! `fechaRegistro`, ...). The same encoding is used for the persisted record,
//! so a session written by one build reloads in the next.

use parque_core::UserId;
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Default account status applied when a profile lookup succeeds without one.
pub const DEFAULT_STATUS: &str = "ACTIVO";

/// The currently authenticated actor.
///
/// `id` and `role` always come from the authentication response. The other
/// fields may be refreshed from the role-specific profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Backend account ID.
    pub id: UserId,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// National ID number (cédula).
    #[serde(rename = "cedula", default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    /// Registration timestamp as formatted by the backend.
    #[serde(rename = "fechaRegistro", default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
    /// Account status (`ACTIVO`, `INACTIVO`, `BLOQUEADO`).
    #[serde(rename = "estado", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl SessionUser {
    /// Returns "first last" for display.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Applies a partial update, keeping every field the update leaves unset.
    pub fn apply(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            first_name,
            last_name,
            email,
            phone,
            national_id,
            registered_at,
            status,
        } = update;

        if let Some(value) = first_name {
            self.first_name = value;
        }
        if let Some(value) = last_name {
            self.last_name = value;
        }
        if let Some(value) = email {
            self.email = value;
        }
        if phone.is_some() {
            self.phone = phone;
        }
        if national_id.is_some() {
            self.national_id = national_id;
        }
        if registered_at.is_some() {
            self.registered_at = registered_at;
        }
        if status.is_some() {
            self.status = status;
        }
    }
}

/// Role-specific profile returned by `/visitantes/{id}` or `/guias/{id}`.
///
/// Every field is optional; the backend DTOs carry more fields than the
/// session needs and those are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(rename = "nombre", default)]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "cedula", default)]
    pub national_id: Option<String>,
    #[serde(rename = "fechaRegistro", default)]
    pub registered_at: Option<String>,
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
}

/// Fields a view may change on the current user.
///
/// `id` and `role` are not updatable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "cedula", default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(rename = "fechaRegistro", default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
    #[serde(rename = "estado", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor() -> SessionUser {
        SessionUser {
            id: UserId::new(42),
            first_name: "Ana".to_string(),
            last_name: "Rojas".to_string(),
            email: "ana@example.com".to_string(),
            role: Role::Visitor,
            phone: None,
            national_id: None,
            registered_at: None,
            status: None,
        }
    }

    #[test]
    fn wire_format_uses_backend_names() {
        let json = serde_json::to_value(visitor()).expect("serialize");
        assert_eq!(json["nombre"], "Ana");
        assert_eq!(json["apellido"], "Rojas");
        assert_eq!(json["rol"], "VISITANTE");
        assert_eq!(json["id"], 42);
        assert!(json.get("telefono").is_none());
    }

    #[test]
    fn missing_optional_fields_decode_as_none() {
        let user: SessionUser = serde_json::from_str(
            r#"{"id":7,"nombre":"Luis","apellido":"Páez","email":"l@x.co","rol":"GUIA"}"#,
        )
        .expect("deserialize");
        assert_eq!(user.role, Role::Guide);
        assert!(user.phone.is_none());
        assert!(user.status.is_none());
    }

    #[test]
    fn apply_merges_only_provided_fields() {
        let mut user = visitor();
        user.apply(ProfileUpdate {
            phone: Some("3001234567".to_string()),
            last_name: Some("Rojas Díaz".to_string()),
            ..ProfileUpdate::default()
        });

        assert_eq!(user.first_name, "Ana");
        assert_eq!(user.last_name, "Rojas Díaz");
        assert_eq!(user.phone.as_deref(), Some("3001234567"));
        assert_eq!(user.id, UserId::new(42));
        assert_eq!(user.role, Role::Visitor);
    }

    #[test]
    fn profile_record_ignores_extra_backend_fields() {
        let profile: ProfileRecord = serde_json::from_str(
            r#"{"id":42,"cedula":"1049","nombre":"Ana","numeroVisitas":3,"estado":"ACTIVO"}"#,
        )
        .expect("deserialize");
        assert_eq!(profile.national_id.as_deref(), Some("1049"));
        assert_eq!(profile.status.as_deref(), Some("ACTIVO"));
        assert!(profile.phone.is_none());
    }

    #[test]
    fn full_name_joins_names() {
        assert_eq!(visitor().full_name(), "Ana Rojas");
    }
}
