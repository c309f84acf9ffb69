//! Client configuration.
//!
//! Native builds load configuration via the `config` crate from `PARQUE_*`
//! environment variables. The browser build has no environment at runtime
//! and captures `PARQUE_API_URL` and `PARQUE_VERIFY_ON_STARTUP` when it is
//! compiled.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Settings for talking to the backend and keeping the session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST API, including the `/api` prefix.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds (native builds only).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Confirm a restored token with `GET /auth/verify` on startup.
    /// Off by default: the current backend answers that endpoint with a 500.
    #[serde(default)]
    pub verify_on_startup: bool,

    /// Where native builds keep the session record.
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
}

fn default_api_url() -> String {
    "http://localhost:8081/api".to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_session_file() -> PathBuf {
    PathBuf::from("parque-session.json")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_seconds: default_timeout_seconds(),
            verify_on_startup: false,
            session_file: default_session_file(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from `PARQUE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(Self::environment())
    }

    /// Configuration baked in at compile time, for the browser build.
    ///
    /// # Errors
    ///
    /// Returns an error if a captured variable cannot be parsed.
    pub fn from_build_env() -> Result<Self, config::ConfigError> {
        Self::from_build_values(&[
            ("PARQUE_API_URL", option_env!("PARQUE_API_URL")),
            ("PARQUE_VERIFY_ON_STARTUP", option_env!("PARQUE_VERIFY_ON_STARTUP")),
        ])
    }

    fn from_build_values(values: &[(&str, Option<&str>)]) -> Result<Self, config::ConfigError> {
        let source: HashMap<String, String> = values
            .iter()
            .filter_map(|(key, value)| value.map(|value| (key.to_string(), value.to_string())))
            .collect();
        Self::from_environment(Self::environment().source(Some(source)))
    }

    /// File-backed credential store at `session_file`.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn credential_store(&self) -> parque_access::FileCredentialStore {
        parque_access::FileCredentialStore::new(self.session_file.clone())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("PARQUE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ClientConfig, config::ConfigError> {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ClientConfig::from_environment(ClientConfig::environment().source(Some(source)))
    }

    #[test]
    fn client_config_has_correct_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:8081/api");
        assert_eq!(config.timeout_seconds, 15);
        assert!(!config.verify_on_startup);
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = load(&[]).expect("load");
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn environment_overrides_fields() {
        let config = load(&[
            ("PARQUE_API_URL", "https://parque.example.co/api"),
            ("PARQUE_TIMEOUT_SECONDS", "30"),
            ("PARQUE_VERIFY_ON_STARTUP", "true"),
        ])
        .expect("load");
        assert_eq!(config.api_url, "https://parque.example.co/api");
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.verify_on_startup);
    }

    #[test]
    fn session_file_selects_the_store_path() {
        let config = load(&[("PARQUE_SESSION_FILE", "/var/lib/parque/session.json")]).expect("load");
        assert_eq!(
            config.credential_store().path(),
            std::path::Path::new("/var/lib/parque/session.json")
        );
    }

    #[test]
    fn build_values_enable_startup_verify() {
        let config = ClientConfig::from_build_values(&[
            ("PARQUE_API_URL", Some("https://parque.example.co/api")),
            ("PARQUE_VERIFY_ON_STARTUP", Some("true")),
        ])
        .expect("load");
        assert_eq!(config.api_url, "https://parque.example.co/api");
        assert!(config.verify_on_startup);
    }

    #[test]
    fn missing_build_values_keep_defaults() {
        let config = ClientConfig::from_build_values(&[
            ("PARQUE_API_URL", None),
            ("PARQUE_VERIFY_ON_STARTUP", None),
        ])
        .expect("load");
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn unparsable_build_verify_flag_is_an_error() {
        let values = [("PARQUE_VERIFY_ON_STARTUP", Some("maybe"))];
        assert!(ClientConfig::from_build_values(&values).is_err());
    }

    #[test]
    fn unparsable_timeout_is_an_error() {
        assert!(load(&[("PARQUE_TIMEOUT_SECONDS", "soon")]).is_err());
    }
}
