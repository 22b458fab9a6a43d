//! Client settings loaded via OrthoConfig.
//!
//! Values come from `EMPLOYEES_CLIENT_*` environment variables and an
//! optional configuration file. The command-line front end layers its own
//! `--api-url` flag on top.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Collection endpoint used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/employee";

/// Configuration values for the records client.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EMPLOYEES_CLIENT")]
pub struct ClientSettings {
    /// Employee collection URL of the records service.
    pub api_url: Option<String>,
}

impl ClientSettings {
    /// Return the configured collection URL, ignoring blank values.
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("employee-cli")])
            .expect("config should load")
    }

    #[rstest]
    fn default_url_is_used_when_missing() {
        let _guard = lock_env([("EMPLOYEES_CLIENT_API_URL", None::<String>)]);
        assert_eq!(load().api_url(), DEFAULT_API_URL);
    }

    #[rstest]
    fn environment_overrides_url() {
        let _guard = lock_env([(
            "EMPLOYEES_CLIENT_API_URL",
            Some("http://records.internal:9000/api/employee".to_owned()),
        )]);
        assert_eq!(load().api_url(), "http://records.internal:9000/api/employee");
    }

    #[rstest]
    fn blank_url_falls_back_to_default() {
        let settings = ClientSettings {
            api_url: Some("  ".to_owned()),
        };
        assert_eq!(settings.api_url(), DEFAULT_API_URL);
    }
}
