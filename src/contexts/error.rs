use std::fmt;

/// Failures while fetching suggestions. Always recovered as an empty result.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The request could not be sent or the connection failed
    Request(String),
    /// The service answered with a non-success status
    Status(u16),
    /// The response body was not a suggestion list
    Decode(String),
    /// The endpoint URL could not be built
    InvalidEndpoint(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Request(msg) => write!(f, "Suggestion request failed: {}", msg),
            LookupError::Status(code) => write!(f, "Suggestion service returned status {}", code),
            LookupError::Decode(msg) => write!(f, "Invalid suggestion response: {}", msg),
            LookupError::InvalidEndpoint(msg) => write!(f, "Invalid suggestion endpoint: {}", msg),
        }
    }
}

impl std::error::Error for LookupError {}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => LookupError::Status(status.as_u16()),
            None => LookupError::Request(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Decode(err.to_string())
    }
}

/// Result type for suggestion lookups
pub type LookupResult<T> = Result<T, LookupError>;

/// Problems reading the settings file
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// IO related errors
    Io(String),
    /// The file is not valid settings TOML
    Parse(String),
    /// A configured URL does not parse
    InvalidUrl(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(msg) => write!(f, "IO error: {}", msg),
            SettingsError::Parse(msg) => write!(f, "Invalid settings file: {}", msg),
            SettingsError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(err: toml::de::Error) -> Self {
        SettingsError::Parse(err.to_string())
    }
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;
