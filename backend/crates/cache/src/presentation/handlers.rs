//! Cache Admin Handlers
//!
//! Callers are expected to sit behind an authentication guard.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;

use crate::application::response_cache::ResponseCache;
use crate::domain::repository::CacheStore;
use crate::domain::value_objects::ContentChange;
use crate::error::CacheResult;
use crate::presentation::dto::{PurgeResponse, StatsResponse};

/// Shared state of the cache routes and middleware
pub type CacheState<S> = Arc<ResponseCache<S>>;

/// GET /cache/v1/stats
pub async fn stats<S>(State(cache): State<CacheState<S>>) -> CacheResult<Json<StatsResponse>>
where
    S: CacheStore + Send + Sync + 'static,
{
    let stats = cache.stats().await?;
    Ok(Json(StatsResponse::from(stats)))
}

/// POST /cache/v1/purge
pub async fn purge<S>(State(cache): State<CacheState<S>>) -> CacheResult<Json<PurgeResponse>>
where
    S: CacheStore + Send + Sync + 'static,
{
    let deleted = cache.purge_all().await?;
    Ok(Json(PurgeResponse { deleted }))
}

/// POST /cache/v1/notify
///
/// Receives content mutations from the CMS and flushes when they matter.
pub async fn notify<S>(
    State(cache): State<CacheState<S>>,
    payload: Result<Json<ContentChange>, JsonRejection>,
) -> Result<Json<PurgeResponse>, Response>
where
    S: CacheStore + Send + Sync + 'static,
{
    let Json(change) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected content change payload");
        AppError::bad_request(rejection.body_text()).into_response()
    })?;

    let deleted = cache
        .handle_content_change(&change)
        .await
        .map_err(IntoResponse::into_response)?;

    Ok(Json(PurgeResponse { deleted }))
}
