use std::time::Duration;

use thiserror::Error;

/// Why a submission did not produce a result.
///
/// Every variant is recoverable: the user can simply submit again. The
/// `Display` text is what the renderers show.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    #[error("Select an image first.")]
    NoImageSelected,
    #[error("Network error: {0}")]
    Network(String),
    #[error("The prediction service did not answer within {}s.", .after.as_secs())]
    Timeout { after: Duration },
    #[error("Server error: {status} - {message}")]
    Http { status: u16, message: String },
    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("unsupported endpoint scheme `{0}`, expected http or https")]
    UnsupportedScheme(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
