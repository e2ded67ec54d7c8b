use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Failed to fetch schedule: {0}")]
    #[diagnostic(code(blsz_sync::fetch))]
    Fetch(String),

    #[error("Invalid format: {0}")]
    #[diagnostic(code(blsz_sync::format))]
    Format(String),

    #[error("Fixture #{index} is missing field '{field}'")]
    #[diagnostic(
        code(blsz_sync::missing_field),
        help("the schedule page markup may have changed")
    )]
    MissingField { field: &'static str, index: usize },

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(blsz_sync::remote_service))]
    RemoteService(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(blsz_sync::config))]
    Config(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(blsz_sync::environment))]
    Environment(String),

    #[error("Not implemented: {0}")]
    #[diagnostic(code(blsz_sync::not_implemented))]
    NotImplemented(String),

    #[error(transparent)]
    #[diagnostic(code(blsz_sync::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(blsz_sync::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(blsz_sync::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type SyncResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create fetch errors
pub fn fetch_error(message: &str) -> Error {
    Error::Fetch(message.to_string())
}

/// Helper to create format errors
pub fn format_error(message: &str) -> Error {
    Error::Format(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn remote_service_error(message: &str) -> Error {
    Error::RemoteService(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
