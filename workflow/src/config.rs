use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/predict";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENDPOINT_VAR: &str = "PREDICT_ENDPOINT";
pub const TIMEOUT_VAR: &str = "PREDICT_TIMEOUT_SECS";
pub const CLEAR_ON_SELECT_VAR: &str = "PREDICT_CLEAR_ON_SELECT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Where prediction requests are POSTed.
    pub endpoint: Url,
    pub timeout_secs: u64,
    /// Drop the previous result as soon as a new image is picked instead of
    /// keeping it visible until the next successful prediction.
    pub clear_result_on_select: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            clear_result_on_select: false,
        }
    }
}

impl WorkflowConfig {
    pub fn new(endpoint: &str) -> Result<Self, ConfigError> {
        Self {
            endpoint: Url::parse(endpoint)?,
            ..Self::default()
        }
        .validated()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reads `.env` if present, then the `PREDICT_*` variables. Unset
    /// variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        #[cfg(not(target_arch = "wasm32"))]
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            config.endpoint = Url::parse(endpoint.trim())?;
        }
        if let Some(timeout) = lookup(TIMEOUT_VAR) {
            config.timeout_secs = timeout.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: TIMEOUT_VAR,
                value: timeout.clone(),
            })?;
        }
        if let Some(clear) = lookup(CLEAR_ON_SELECT_VAR) {
            config.clear_result_on_select = parse_flag(&clear).ok_or(ConfigError::InvalidValue {
                key: CLEAR_ON_SELECT_VAR,
                value: clear.clone(),
            })?;
        }

        config.validated()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let config_str = std::fs::read_to_string(path)?;
        let config: WorkflowConfig = serde_yaml::from_str(&config_str)?;
        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        match self.endpoint.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs",
                value: "0".into(),
            });
        }
        Ok(self)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<WorkflowConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        WorkflowConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config, WorkflowConfig::default());
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.clear_result_on_select);
    }

    #[test]
    fn environment_overrides_every_field() {
        let config = from_vars(&[
            (ENDPOINT_VAR, "https://leaf.example.org/predict"),
            (TIMEOUT_VAR, "5"),
            (CLEAR_ON_SELECT_VAR, "yes"),
        ])
        .unwrap();
        assert_eq!(config.endpoint.as_str(), "https://leaf.example.org/predict");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.clear_result_on_select);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            from_vars(&[(ENDPOINT_VAR, "not a url")]),
            Err(ConfigError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            from_vars(&[(ENDPOINT_VAR, "ftp://leaf.example.org/predict")]),
            Err(ConfigError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
        assert!(matches!(
            from_vars(&[(TIMEOUT_VAR, "soon")]),
            Err(ConfigError::InvalidValue { key: TIMEOUT_VAR, .. })
        ));
        assert!(matches!(
            from_vars(&[(TIMEOUT_VAR, "0")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            from_vars(&[(CLEAR_ON_SELECT_VAR, "maybe")]),
            Err(ConfigError::InvalidValue { key: CLEAR_ON_SELECT_VAR, .. })
        ));
    }

    #[test]
    fn loads_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"endpoint: https://leaf.example.org/v2/predict\ntimeout_secs: 12\n",
        )
        .unwrap();

        let config = WorkflowConfig::load(file.path()).unwrap();
        assert_eq!(config.endpoint.as_str(), "https://leaf.example.org/v2/predict");
        assert_eq!(config.timeout_secs, 12);
        assert!(!config.clear_result_on_select);
    }
}
