//! Request Extractors
//!
//! Client address, authenticated identity, and bodies that may arrive as
//! JSON or as `application/x-www-form-urlencoded`.

use std::net::{IpAddr, SocketAddr};

use axum::body::Bytes;
use axum::extract::{ConnectInfo, FromRequest, FromRequestParts, Request};
use axum::http::{HeaderMap, header, request::Parts};
use kernel::error::app_error::AppError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use platform::client::extract_client_ip;

use crate::application::authenticate::RequestCredentials;
use crate::domain::entity::identity::Identity;
use crate::error::AuthError;

/// Name of the query/body parameter that may carry a token
pub const TOKEN_PARAM: &str = "token";

/// Resolved client address (proxy headers first, then the socket peer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub Option<IpAddr>);

impl ClientIp {
    pub fn from_parts(headers: &HeaderMap, extensions: &http::Extensions) -> Self {
        let direct = extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());
        ClientIp(extract_client_ip(headers, direct))
    }

    /// Throttle key for this client
    pub fn key(&self) -> String {
        platform::client::client_key(self.0)
    }
}

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientIp::from_parts(&parts.headers, &parts.extensions))
    }
}

/// Identity attached by the identity middleware
///
/// Rejects with the uniform 401 when the request did not authenticate.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or(AuthError::Unauthenticated)
    }
}

/// Body deserialized from JSON or from a urlencoded form
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::bad_request("Request body could not be read"))?;

        let params = body_params(content_type.as_deref(), &bytes)
            .ok_or_else(|| AppError::bad_request("Malformed request body"))?;

        let value = serde_json::from_value(Value::Object(params))?;
        Ok(JsonOrForm(value))
    }
}

pub fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase())
}

pub fn is_form(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

pub fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| {
        let essence = ct.split(';').next().unwrap_or_default().trim();
        essence == "application/json" || essence.ends_with("+json")
    })
}

/// Parse a request body into a flat parameter map
///
/// An empty body yields an empty map. A form body maps every value to a
/// JSON string; a JSON body must be an object. Any other content type is
/// read as JSON when it parses, otherwise `None`.
pub fn body_params(content_type: Option<&str>, body: &[u8]) -> Option<Map<String, Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Some(Map::new());
    }

    if is_form(content_type) {
        return Some(
            url::form_urlencoded::parse(body)
                .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
                .collect(),
        );
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// `token` query parameter, if present
pub fn query_token(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == TOKEN_PARAM)
        .map(|(_, v)| v.into_owned())
}

/// `token` body parameter, if present and a string
pub fn body_token(content_type: Option<&str>, body: &[u8]) -> Option<String> {
    body_params(content_type, body)?
        .remove(TOKEN_PARAM)
        .and_then(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
}

/// Credentials visible without reading the body
pub fn credentials_from_parts(headers: &HeaderMap, query: Option<&str>) -> RequestCredentials {
    RequestCredentials {
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        query_token: query_token(query),
        body_token: None,
    }
}
