//! Runtime configuration, read once from the process environment.

use std::collections::HashSet;
use std::fmt;

pub const GEOCODER_KEY_VAR: &str = "GEOCODER_API_KEY";
pub const GEONAMES_USER_VAR: &str = "GEONAMES_USER";
pub const CLIENT_TOKENS_VAR: &str = "CLIENT_TOKENS";

/// Immutable service configuration. Built at startup, shared read-only.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the reverse-geocoding service.
    pub geocoder_api_key: String,
    /// Account name for the ocean-name lookup service.
    pub geonames_user: String,
    /// Accepted client tokens. A request is authorized iff its token header
    /// value is a member of this set.
    pub client_tokens: HashSet<String>,
}

/// Startup configuration errors, surfaced before any request is served.
#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    NoClientTokens,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "Missing environment variable {}", name),
            Self::NoClientTokens => {
                write!(f, "No client tokens configured. Set {} before serving", CLIENT_TOKENS_VAR)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            geocoder_api_key: require_var(GEOCODER_KEY_VAR)?,
            geonames_user: require_var(GEONAMES_USER_VAR)?,
            client_tokens: parse_tokens(&std::env::var(CLIENT_TOKENS_VAR).unwrap_or_default()),
        })
    }

    /// Token-set membership check for inbound requests.
    pub fn is_authorized(&self, token: Option<&str>) -> bool {
        matches!(token, Some(t) if self.client_tokens.contains(t))
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Split a comma-separated token list, dropping blank entries.
fn parse_tokens(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
