//! Domain Services
//!
//! Pure logic deciding what is cacheable and under which key.

use crate::application::config::CacheConfig;
use crate::domain::value_objects::CacheKey;

/// Query parameter that carries a bearer token
pub const TOKEN_PARAM: &str = "token";

/// Response headers never replayed from a stored entry
const UNSTORED_HEADERS: &[&str] = &[
    "content-type",
    "content-length",
    "transfer-encoding",
    "connection",
    "set-cookie",
    "x-cache",
];

/// Canonical form of a query string
///
/// Pairs are split on `&`, empty pairs dropped, and the rest sorted by name
/// then value so that parameter order does not change the key. Names stay
/// case-sensitive.
pub fn normalize_query(query: &str) -> String {
    let mut pairs: Vec<&str> = query.split('&').filter(|pair| !pair.is_empty()).collect();
    pairs.sort_unstable_by(|a, b| split_pair(a).cmp(&split_pair(b)));
    pairs.join("&")
}

fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Key of a request target
pub fn cache_key(path: &str, query: Option<&str>) -> CacheKey {
    let normalized = normalize_query(query.unwrap_or_default());
    if normalized.is_empty() {
        CacheKey::from_target(path)
    } else {
        CacheKey::from_target(&format!("{path}?{normalized}"))
    }
}

/// Whether a response header is kept with the stored entry
pub fn is_storable_header(name: &str) -> bool {
    !UNSTORED_HEADERS
        .iter()
        .any(|unstored| unstored.eq_ignore_ascii_case(name))
}

/// The request facts the cache decision depends on
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub has_authorization: bool,
    pub cookie_names: Vec<String>,
}

impl RequestContext {
    /// Capture the relevant parts of an HTTP request
    pub fn from_request<B>(req: &http::Request<B>) -> Self {
        let headers = req.headers();
        let cookie_names = headers
            .get_all(http::header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|cookie| {
                let name = cookie.split('=').next().unwrap_or_default().trim();
                (!name.is_empty()).then(|| name.to_string())
            })
            .collect();

        Self {
            method: req.method().as_str().to_string(),
            path: req.uri().path().to_string(),
            query: req.uri().query().map(str::to_string),
            has_authorization: headers.contains_key(http::header::AUTHORIZATION),
            cookie_names,
        }
    }

    /// Parameter names are compared after percent-decoding, the same way
    /// the token is read for authentication
    fn has_query_token(&self) -> bool {
        self.query.as_deref().is_some_and(|query| {
            url::form_urlencoded::parse(query.as_bytes()).any(|(name, _)| name == TOKEN_PARAM)
        })
    }

    /// Whether the request identifies a caller
    pub fn carries_credentials(&self, session_cookie_prefix: &str) -> bool {
        self.has_authorization
            || self.has_query_token()
            || self
                .cookie_names
                .iter()
                .any(|name| name.starts_with(session_cookie_prefix))
    }
}

/// Whether a request may be served from, and stored into, the cache
///
/// Only anonymous GETs under the API prefix qualify; responses that may be
/// personalized are never shared.
pub fn should_cache(config: &CacheConfig, request: &RequestContext) -> bool {
    config.enabled
        && request.method == "GET"
        && request.path.starts_with(&config.api_prefix)
        && !request.carries_credentials(&config.session_cookie_prefix)
        && !config
            .excluded_prefixes
            .iter()
            .any(|prefix| request.path.starts_with(prefix.as_str()))
}
