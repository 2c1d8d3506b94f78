//! Router Composition
//!
//! Request flow, outermost first: security headers, CORS, tracing, response
//! cache, identity resolution, role guard, handler.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use auth::presentation::{AuthAppState, RequiredRole, require_role};
use auth::{AUTH_NAMESPACE, InMemoryUserDirectory, auth_router, with_identity};
use platform::clock::SharedClock;
use platform::rate_limit::InMemoryAttemptStore;
use response_cache::models::CacheStats;
use response_cache::{CACHE_NAMESPACE, FileCacheStore, ResponseCache, cache_router, with_cache};

use crate::config::{CorsOrigins, CorsSettings};

pub const STATUS_PATH: &str = "/wp-json/status";
pub const DETAILED_STATUS_PATH: &str = "/wp-json/status/detailed";

pub type AuthState = AuthAppState<InMemoryUserDirectory, InMemoryAttemptStore>;
pub type CacheState = Arc<ResponseCache<FileCacheStore>>;

/// Everything the router needs
#[derive(Clone)]
pub struct Services {
    pub auth: AuthState,
    pub cache: CacheState,
    pub cors: CorsSettings,
    pub admin_role: RequiredRole,
    pub clock: SharedClock,
}

#[derive(Debug, Serialize)]
struct ComponentStatus {
    status: &'static str,
    enabled: bool,
}

impl ComponentStatus {
    fn of(enabled: bool) -> Self {
        Self {
            status: if enabled { "ok" } else { "disabled" },
            enabled,
        }
    }
}

#[derive(Debug, Serialize)]
struct Components {
    jwt_auth: ComponentStatus,
    cache: ComponentStatus,
    cors: ComponentStatus,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
    timestamp: i64,
    version: &'static str,
    components: Components,
}

/// GET /wp-json/status
async fn status(State(services): State<Services>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        timestamp: services.clock.now_unix(),
        version: env!("CARGO_PKG_VERSION"),
        components: Components {
            jwt_auth: ComponentStatus::of(services.auth.config().jwt_enabled),
            cache: ComponentStatus::of(services.cache.is_enabled()),
            cors: ComponentStatus::of(services.cors.enabled),
        },
    })
}

#[derive(Debug, Serialize)]
struct AuthComponent {
    status: &'static str,
    enabled: bool,
    token_ttl_secs: i64,
    max_login_attempts: u32,
    lockout_secs: i64,
}

#[derive(Debug, Serialize)]
struct CacheComponent {
    status: &'static str,
    enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<CacheStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct CorsComponent {
    status: &'static str,
    enabled: bool,
    origins: Vec<String>,
}

#[derive(Debug, Serialize)]
struct DetailedComponents {
    jwt_auth: AuthComponent,
    cache: CacheComponent,
    cors: CorsComponent,
}

#[derive(Debug, Serialize)]
struct DetailedStatusResponse {
    status: &'static str,
    timestamp: i64,
    version: &'static str,
    components: DetailedComponents,
}

/// GET /wp-json/status/detailed
///
/// Administrators only. Any component reporting a warning downgrades the
/// overall status.
async fn detailed_status(State(services): State<Services>) -> Json<DetailedStatusResponse> {
    let auth_config = services.auth.config();
    let jwt_auth = AuthComponent {
        status: ComponentStatus::of(auth_config.jwt_enabled).status,
        enabled: auth_config.jwt_enabled,
        token_ttl_secs: auth_config.token_ttl_secs(),
        max_login_attempts: auth_config.max_login_attempts,
        lockout_secs: auth_config.lockout_secs(),
    };

    let cache = if services.cache.is_enabled() {
        match services.cache.stats().await {
            Ok(stats) => CacheComponent {
                status: "ok",
                enabled: true,
                stats: Some(stats),
                error: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Cache statistics unavailable");
                CacheComponent {
                    status: "warning",
                    enabled: true,
                    stats: None,
                    error: Some("cache directory unreadable"),
                }
            }
        }
    } else {
        CacheComponent {
            status: "disabled",
            enabled: false,
            stats: None,
            error: None,
        }
    };

    let cors = CorsComponent {
        status: ComponentStatus::of(services.cors.enabled).status,
        enabled: services.cors.enabled,
        origins: match &services.cors.origins {
            CorsOrigins::Any => vec!["*".to_string()],
            CorsOrigins::List(origins) => origins.clone(),
        },
    };

    let degraded = [jwt_auth.status, cache.status, cors.status].contains(&"warning");

    Json(DetailedStatusResponse {
        status: if degraded { "warning" } else { "ok" },
        timestamp: services.clock.now_unix(),
        version: env!("CARGO_PKG_VERSION"),
        components: DetailedComponents {
            jwt_auth,
            cache,
            cors,
        },
    })
}

async fn security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    response
}

/// CORS policy; credentials only with an explicit allow-list
pub fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-wp-nonce"),
        ]))
        .max_age(std::time::Duration::from_secs(86_400));

    match &settings.origins {
        CorsOrigins::Any => layer.allow_origin(AllowOrigin::any()),
        CorsOrigins::List(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            layer
                .allow_origin(AllowOrigin::list(allowed))
                .allow_credentials(true)
        }
    }
}

/// Build the full application router
///
/// The status route sits outside the cache so its timestamp stays live.
/// Cache administration and the detailed status require the admin role.
pub fn router(services: Services) -> Router {
    let mut api = Router::new();

    if services.auth.config().jwt_enabled {
        api = api.nest(AUTH_NAMESPACE, auth_router(services.auth.clone()));
    }

    let admin_only = middleware::from_fn_with_state(services.admin_role.clone(), require_role);
    api = api
        .nest(
            CACHE_NAMESPACE,
            cache_router(services.cache.clone()).route_layer(admin_only.clone()),
        )
        .route(
            DETAILED_STATUS_PATH,
            get(detailed_status)
                .with_state(services.clone())
                .route_layer(admin_only),
        );

    let api = with_identity(api, services.auth.clone());
    let mut app = with_cache(api, services.cache.clone())
        .route(STATUS_PATH, get(status).with_state(services.clone()))
        .layer(TraceLayer::new_for_http());

    if services.cors.enabled {
        app = app.layer(cors_layer(&services.cors));
    }

    app.layer(middleware::from_fn(security_headers))
}
