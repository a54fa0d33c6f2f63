use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:5000";
const DEFAULT_SHORT_CODE_LENGTH: usize = 6;
const DEFAULT_MAX_CODE_ATTEMPTS: u32 = 100;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Environment variable {name} has invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
    #[error("Environment variable {0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub server_address: String,
    pub public_base_url: Option<String>,
    pub short_code_length: usize,
    pub max_code_attempts: u32,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            public_base_url: None,
            short_code_length: DEFAULT_SHORT_CODE_LENGTH,
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let short_code_length =
            parse_or(&lookup, "SHORT_CODE_LENGTH", defaults.short_code_length)?;
        if short_code_length == 0 {
            return Err(SettingsError::Zero("SHORT_CODE_LENGTH"));
        }
        let max_code_attempts =
            parse_or(&lookup, "MAX_CODE_ATTEMPTS", defaults.max_code_attempts)?;
        if max_code_attempts == 0 {
            return Err(SettingsError::Zero("MAX_CODE_ATTEMPTS"));
        }
        let request_timeout_ms =
            parse_or(&lookup, "REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?;
        Ok(Settings {
            server_address: non_empty(&lookup, "SERVER_ADDRESS")
                .unwrap_or(defaults.server_address),
            public_base_url: non_empty(&lookup, "PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            short_code_length,
            max_code_attempts,
            request_timeout: Duration::from_millis(request_timeout_ms),
        })
    }
}

fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, SettingsError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_empty(lookup, name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| SettingsError::Invalid { name, value }),
    }
}
