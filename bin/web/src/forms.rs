//! Client-side checks for the login and registration forms.
//!
//! The backend validates again; these checks only spare a round trip and
//! give per-field messages.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use parque_access::{Credentials, VisitorRegistration};
use regex::Regex;

/// Field name to message.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Raw contents of the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.insert("password", "La contraseña es requerida");
        }

        if errors.is_empty() {
            Ok(Credentials::new(self.email.trim(), self.password.clone()))
        } else {
            Err(errors)
        }
    }
}

/// Raw contents of the visitor registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<VisitorRegistration, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.national_id.trim().is_empty() {
            errors.insert("cedula", "La cédula es requerida");
        } else if !NATIONAL_ID.is_match(&self.national_id) {
            errors.insert("cedula", "Cédula inválida (6-10 dígitos)");
        }

        if self.first_name.trim().is_empty() {
            errors.insert("nombre", "El nombre es requerido");
        }
        if self.last_name.trim().is_empty() {
            errors.insert("apellido", "El apellido es requerido");
        }

        if self.phone.trim().is_empty() {
            errors.insert("telefono", "El teléfono es requerido");
        } else if !PHONE.is_match(&self.phone) {
            errors.insert("telefono", "Teléfono inválido (10 dígitos)");
        }

        check_email(&self.email, &mut errors);

        if self.password.is_empty() {
            errors.insert("password", "La contraseña es requerida");
        } else if self.password.encode_utf16().count() < 8 {
            errors.insert("password", "Mínimo 8 caracteres");
        } else if !is_mixed(&self.password) {
            errors.insert("password", "Debe contener mayúsculas, minúsculas y números");
        }

        if self.password != self.confirm_password {
            errors.insert("confirmPassword", "Las contraseñas no coinciden");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(VisitorRegistration {
            national_id: self.national_id.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: Some(self.phone.clone()),
            password: self.password.clone(),
        })
    }
}

static NATIONAL_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6,10}$").expect("national id pattern"));
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern"));
static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern"));
static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").expect("lowercase pattern"));
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("uppercase pattern"));
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("digit pattern"));

fn check_email(email: &str, errors: &mut FieldErrors) {
    if email.trim().is_empty() {
        errors.insert("email", "El email es requerido");
    } else if !EMAIL.is_match(email) {
        errors.insert("email", "Email inválido");
    }
}

/// ASCII lowercase, ASCII uppercase and a digit.
fn is_mixed(password: &str) -> bool {
    LOWERCASE.is_match(password) && UPPERCASE.is_match(password) && DIGIT.is_match(password)
}
