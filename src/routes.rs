use crate::error::AppError;
use crate::model::{ApiStatus, ServiceStatus, ShortenRequest, ShortenResponse, UrlStatistics};
use crate::settings::Settings;
use crate::store::UrlStore;
use crate::utils::{get_header, normalize_url, validate_url};
use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, LOCATION};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

const CACHE_CONTROL_HEADER_VALUE: &str = "no-store";

#[derive(Clone)]
pub struct AppState {
    pub store: UrlStore,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(store: UrlStore, settings: Settings) -> Self {
        AppState {
            store,
            settings: Arc::new(settings),
        }
    }

    fn base_url(&self, headers: &HeaderMap) -> String {
        if let Some(base_url) = &self.settings.public_base_url {
            return base_url.clone();
        }
        let host = get_header("Host", headers)
            .unwrap_or_else(|| self.settings.server_address.clone());
        format!("http://{}", host.trim_end_matches('/'))
    }
}

pub async fn health() -> impl IntoResponse {
    Json(ServiceStatus {
        status: "healthy",
        service: "URL Shortener API",
    })
}

pub async fn api_health() -> impl IntoResponse {
    Json(ApiStatus {
        status: "ok",
        message: "URL Shortener API is running",
    })
}

pub async fn shorten_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let request: ShortenRequest =
        serde_json::from_slice(&body).map_err(|_| AppError::InvalidJson)?;
    let url = request.url.ok_or(AppError::MissingUrl)?;
    let url = url.trim();
    if url.is_empty() {
        return Err(AppError::EmptyUrl);
    }
    let url = validate_url(&normalize_url(url))?;

    let mapping = state.store.create_mapping(
        &url,
        state.settings.short_code_length,
        state.settings.max_code_attempts,
    )?;
    tracing::info!("Shortened {} as {}", mapping.original_url, mapping.short_code);

    let short_url = format!("{}/{}", state.base_url(&headers), mapping.short_code);
    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_code: mapping.short_code,
            short_url,
        }),
    ))
}

pub async fn redirect(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Response, AppError> {
    let mapping = state
        .store
        .record_click(&short_code)
        .ok_or(AppError::ShortCodeNotFound)?;
    tracing::debug!("Click {} on {}", mapping.click_count, short_code);

    let location = HeaderValue::from_str(&mapping.original_url).map_err(|err| {
        tracing::error!("Stored url for {} is not a valid header: {}", short_code, err);
        AppError::Internal
    })?;
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::FOUND;
    let headers = response.headers_mut();
    headers.insert(LOCATION, location);
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL_HEADER_VALUE),
    );
    Ok(response)
}

pub async fn get_statistics(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<UrlStatistics>, AppError> {
    state
        .store
        .get_mapping(&short_code)
        .map(|mapping| Json(mapping.into()))
        .ok_or(AppError::ShortCodeNotFound)
}

pub async fn not_found() -> AppError {
    AppError::EndpointNotFound
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub async fn timeout_as_json(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        AppError::RequestTimeout.into_response()
    } else {
        response
    }
}
