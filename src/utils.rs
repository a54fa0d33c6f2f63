use crate::error::AppError;
use axum::http::HeaderMap;
use rand::distributions::Alphanumeric;
use rand::Rng;
use url::Url;

const DEFAULT_SCHEME: &str = "https://";
const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

pub fn get_header(name: &str, headers: &HeaderMap) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Prepends `https://` unless the url already names an http(s) scheme.
pub fn normalize_url(text: &str) -> String {
    if text.starts_with("http://") || text.starts_with("https://") {
        text.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{text}")
    }
}

/// Checks a normalized url and returns the form that gets stored.
///
/// The input is kept verbatim when it is plain visible ASCII, otherwise the
/// percent-encoded serialization is used so it is always a valid `Location`.
pub fn validate_url(text: &str) -> Result<String, AppError> {
    let url = Url::parse(text).map_err(|_| AppError::InvalidUrl)?;
    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(AppError::InvalidUrl);
    }
    match url.host_str() {
        Some(host) if host.contains('.') => {}
        _ => return Err(AppError::InvalidUrl),
    }
    if text.chars().all(|c| c.is_ascii_graphic()) {
        Ok(text.to_string())
    } else {
        Ok(url.into())
    }
}

pub fn generate_short_code(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
