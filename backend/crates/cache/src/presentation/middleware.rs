//! Cache Middleware
//!
//! Serves fresh entries for cacheable requests and stores successful JSON
//! responses on a miss. Bodies that may exceed `max_body_bytes` are
//! streamed through without being buffered.

use std::collections::BTreeMap;

use axum::body::{Body, HttpBody, to_bytes};
use axum::extract::State;
use axum::http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use serde_json::Value;

use crate::domain::entities::CacheEntry;
use crate::domain::repository::CacheStore;
use crate::domain::services::{RequestContext, is_storable_header};
use crate::presentation::dto::CACHE_STATUS_HEADER;
use crate::presentation::handlers::CacheState;

/// Content type of every replayed entry
pub const CACHED_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Middleware caching anonymous API GET responses
pub async fn cache_responses<S>(
    State(cache): State<CacheState<S>>,
    req: Request<Body>,
    next: Next,
) -> Response
where
    S: CacheStore + Send + Sync + 'static,
{
    let context = RequestContext::from_request(&req);
    if !cache.should_cache(&context) {
        return next.run(req).await;
    }

    let key = cache.key(&context.path, context.query.as_deref());

    if let Some(entry) = cache.get(&key).await {
        if let Some(response) = replay(&entry) {
            tracing::debug!(key = %key, path = %context.path, "Cache hit");
            return response;
        }
    }

    let response = next.run(req).await;
    if response.status() != StatusCode::OK || !is_json(response.headers()) {
        return response;
    }

    let limit = cache.config().max_body_bytes;
    let (mut parts, body) = response.into_parts();
    if !fits_within(&body, limit) {
        tracing::debug!(path = %context.path, limit, "Response too large to cache");
        return Response::from_parts(parts, body);
    }

    let bytes = match to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Response body could not be buffered");
            return AppError::internal("Internal server error").into_response();
        }
    };

    if let Ok(body) = serde_json::from_slice::<Value>(&bytes) {
        cache.set(&key, body, storable_headers(&parts.headers)).await;
        parts.headers.insert(
            HeaderName::from_static(CACHE_STATUS_HEADER),
            HeaderValue::from_static("MISS"),
        );
        tracing::debug!(key = %key, path = %context.path, "Cache miss stored");
    }

    Response::from_parts(parts, Body::from(bytes))
}

/// Whether the body is known to end within `limit` bytes
fn fits_within(body: &Body, limit: usize) -> bool {
    body.size_hint()
        .upper()
        .is_some_and(|upper| upper <= limit as u64)
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().contains("application/json"))
}

fn storable_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter(|(name, _)| is_storable_header(name.as_str()))
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect()
}

/// Rebuild a response from a stored entry
///
/// Stored headers that are no longer valid are skipped.
fn replay(entry: &CacheEntry) -> Option<Response> {
    let body = serde_json::to_vec(&entry.body).ok()?;

    let mut headers = HeaderMap::new();
    for (name, value) in &entry.headers {
        if !is_storable_header(name) {
            continue;
        }
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) {
            headers.insert(name, value);
        }
    }
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(CACHED_CONTENT_TYPE));
    headers.insert(
        HeaderName::from_static(CACHE_STATUS_HEADER),
        HeaderValue::from_static("HIT"),
    );

    let mut response = Response::new(Body::from(body));
    *response.headers_mut() = headers;
    Some(response)
}
