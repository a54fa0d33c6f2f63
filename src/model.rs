use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlMapping {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: u64,
}

impl UrlMapping {
    pub fn new(short_code: String, original_url: String) -> Self {
        UrlMapping {
            short_code,
            original_url,
            created_at: Utc::now(),
            click_count: 0,
        }
    }
}

#[derive(Deserialize)]
pub struct ShortenRequest {
    pub url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UrlStatistics {
    pub short_code: String,
    pub url: String,
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
}

impl From<UrlMapping> for UrlStatistics {
    fn from(mapping: UrlMapping) -> Self {
        UrlStatistics {
            short_code: mapping.short_code,
            url: mapping.original_url,
            clicks: mapping.click_count,
            created_at: mapping.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Serialize)]
pub struct ApiStatus {
    pub status: &'static str,
    pub message: &'static str,
}
