//! Scenario tests for the auth crate
//! Token lifecycle, throttling, identity resolution, and the HTTP surface

#[cfg(test)]
mod fixtures {
    use std::sync::Arc;
    use std::time::Duration;

    use platform::clock::ManualClock;
    use platform::password::{ClearTextPassword, low_cost_params};
    use platform::rate_limit::InMemoryAttemptStore;

    use crate::application::{LoginThrottle, TokenService};
    use crate::application::config::AuthConfig;
    use crate::domain::entity::identity::Identity;
    use crate::domain::value_object::user_id::UserId;
    use crate::infra::memory::InMemoryUserDirectory;
    use crate::presentation::handlers::AuthAppState;

    pub const SECRET: &[u8] = b"scenario-test-secret";
    pub const START: i64 = 1_700_000_000;
    pub const PASSWORD: &str = "correct horse battery staple";

    pub type TestState = AuthAppState<InMemoryUserDirectory, InMemoryAttemptStore>;

    pub fn config(max_attempts: u32, lockout_secs: u64) -> AuthConfig {
        AuthConfig {
            max_login_attempts: max_attempts,
            lockout_duration: Duration::from_secs(lockout_secs),
            ..AuthConfig::with_secret(SECRET.to_vec())
        }
    }

    pub fn alice() -> Identity {
        Identity {
            id: UserId::new(1),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            display_name: "Alice".to_string(),
            roles: vec!["administrator".to_string()],
            active: true,
        }
    }

    pub fn retired() -> Identity {
        Identity {
            id: UserId::new(2),
            username: "retired".to_string(),
            email: String::new(),
            display_name: "Retired".to_string(),
            roles: vec!["subscriber".to_string()],
            active: false,
        }
    }

    pub async fn directory() -> InMemoryUserDirectory {
        let directory = InMemoryUserDirectory::new();
        for identity in [alice(), retired()] {
            let hash = ClearTextPassword::new(PASSWORD.to_string())
                .unwrap()
                .hash_with(low_cost_params())
                .unwrap();
            directory.insert(identity, hash).await;
        }
        directory
    }

    pub async fn state(config: AuthConfig) -> (TestState, ManualClock) {
        let clock = ManualClock::new(START);
        let state = AuthAppState::new(
            directory().await,
            InMemoryAttemptStore::new(clock.shared()),
            config,
            clock.shared(),
        );
        (state, clock)
    }

    pub fn tokens(config: AuthConfig) -> (TokenService, ManualClock) {
        let clock = ManualClock::new(START);
        (TokenService::new(Arc::new(config), clock.shared()), clock)
    }

    pub fn throttle(
        config: AuthConfig,
    ) -> (
        LoginThrottle<InMemoryAttemptStore>,
        Arc<InMemoryAttemptStore>,
        ManualClock,
    ) {
        let clock = ManualClock::new(START);
        let store = Arc::new(InMemoryAttemptStore::new(clock.shared()));
        let throttle = LoginThrottle::new(store.clone(), Arc::new(config), clock.shared());
        (throttle, store, clock)
    }
}

#[cfg(test)]
mod token_tests {
    use super::fixtures::*;
    use crate::domain::token::TokenSegments;
    use crate::error::AuthError;
    use platform::crypto::{from_base64url, to_base64url};
    use std::time::Duration;

    /// Rebuild `token` with one segment replaced by `f(decoded bytes)`
    fn with_segment(token: &str, index: usize, f: impl Fn(&mut Vec<u8>)) -> String {
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let mut bytes = from_base64url(&parts[index]).unwrap();
        f(&mut bytes);
        parts[index] = to_base64url(&bytes);
        parts.join(".")
    }

    #[test]
    fn test_round_trip_recovers_subject() {
        let (service, _clock) = tokens(config(5, 3600));
        for subject in ["1", "42", "18446744073709551615"] {
            let issued = service.issue_token(subject).unwrap();
            assert_eq!(service.validate_token(&issued.token).unwrap().subject(), subject);
        }
    }

    #[test]
    fn test_valid_until_ttl_then_invalid() {
        let (service, clock) = tokens(config(5, 3600));
        let issued = service.issue_token("1").unwrap();

        clock.advance(Duration::from_secs(3599));
        assert!(service.validate_token(&issued.token).is_ok());

        clock.advance(Duration::from_secs(2));
        assert!(matches!(
            service.validate_token(&issued.token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_every_payload_bit_is_protected() {
        let (service, _clock) = tokens(config(5, 3600));
        let issued = service.issue_token("7").unwrap();
        let payload_len = from_base64url(issued.token.split('.').nth(1).unwrap())
            .unwrap()
            .len();

        for byte in 0..payload_len {
            for bit in 0..8 {
                let tampered = with_segment(&issued.token, 1, |b| b[byte] ^= 1 << bit);
                assert!(
                    service.validate_token(&tampered).is_err(),
                    "payload byte {byte} bit {bit} flip accepted"
                );
            }
        }
    }

    #[test]
    fn test_every_signature_bit_is_protected() {
        let (service, _clock) = tokens(config(5, 3600));
        let issued = service.issue_token("7").unwrap();

        for byte in 0..32 {
            for bit in 0..8 {
                let tampered = with_segment(&issued.token, 2, |b| b[byte] ^= 1 << bit);
                assert!(
                    service.validate_token(&tampered).is_err(),
                    "signature byte {byte} bit {bit} flip accepted"
                );
            }
        }
    }

    #[test]
    fn test_truncated_or_extended_signature_rejected() {
        let (service, _clock) = tokens(config(5, 3600));
        let issued = service.issue_token("7").unwrap();

        let truncated = with_segment(&issued.token, 2, |b| {
            b.pop();
        });
        let extended = with_segment(&issued.token, 2, |b| b.push(0));
        assert!(service.validate_token(&truncated).is_err());
        assert!(service.validate_token(&extended).is_err());
    }

    #[test]
    fn test_payload_swap_between_tokens_rejected() {
        let (service, _clock) = tokens(config(5, 3600));
        let a = service.issue_token("1").unwrap();
        let b = service.issue_token("2").unwrap();

        let a_segments = TokenSegments::split(&a.token).unwrap();
        let b_segments = TokenSegments::split(&b.token).unwrap();
        let spliced = format!(
            "{}.{}.{}",
            a_segments.header, b_segments.payload, a_segments.signature
        );
        assert!(service.validate_token(&spliced).is_err());
    }
}

#[cfg(test)]
mod throttle_tests {
    use super::fixtures::*;
    use crate::application::ThrottleDecision;
    use std::time::Duration;

    const IP: &str = "192.0.2.10";

    #[tokio::test]
    async fn test_boundary_n_minus_one_allowed_n_denied() {
        let (throttle, _store, _clock) = throttle(config(5, 3600));

        for _ in 0..4 {
            throttle.record_login_result(IP, false).await.unwrap();
        }
        assert!(throttle.check_login_allowed(IP).await.unwrap());

        throttle.record_login_result(IP, false).await.unwrap();
        assert!(!throttle.check_login_allowed(IP).await.unwrap());
    }

    #[tokio::test]
    async fn test_success_resets_counter() {
        let (throttle, store, _clock) = throttle(config(5, 3600));

        for _ in 0..4 {
            throttle.record_login_result(IP, false).await.unwrap();
        }
        throttle.record_login_result(IP, true).await.unwrap();
        assert_eq!(store.len().await, 0);

        for _ in 0..4 {
            throttle.record_login_result(IP, false).await.unwrap();
        }
        assert!(throttle.check_login_allowed(IP).await.unwrap());
    }

    #[tokio::test]
    async fn test_lockout_decays_and_clears_counter() {
        let (throttle, store, clock) = throttle(config(5, 3600));
        for _ in 0..5 {
            throttle.record_login_result(IP, false).await.unwrap();
        }

        clock.advance(Duration::from_secs(1800));
        assert_eq!(
            throttle.check(IP).await.unwrap(),
            ThrottleDecision::Locked {
                retry_after_secs: 1800
            }
        );

        clock.advance(Duration::from_secs(1801));
        assert!(throttle.check_login_allowed(IP).await.unwrap());
        assert_eq!(store.len().await, 0);

        // one more failure starts a fresh count
        throttle.record_login_result(IP, false).await.unwrap();
        assert!(throttle.check_login_allowed(IP).await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_counters_do_not_accumulate() {
        let (throttle, store, clock) = throttle(config(3, 600));
        let clients: Vec<String> = (0..200).map(|i| format!("198.51.100.{i}")).collect();
        for client in &clients {
            throttle.record_login_result(client, false).await.unwrap();
        }
        assert_eq!(store.len().await, clients.len());

        clock.advance(Duration::from_secs(10_000));
        for client in &clients {
            assert!(throttle.check_login_allowed(client).await.unwrap());
        }
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_lockout_window_restarts_on_each_failure() {
        let (throttle, _store, clock) = throttle(config(2, 600));
        throttle.record_login_result(IP, false).await.unwrap();

        clock.advance(Duration::from_secs(500));
        throttle.record_login_result(IP, false).await.unwrap();

        clock.advance(Duration::from_secs(500));
        assert!(!throttle.check_login_allowed(IP).await.unwrap());
    }
}

#[cfg(test)]
mod authenticate_tests {
    use super::fixtures::*;
    use crate::application::RequestCredentials;
    use crate::domain::value_object::user_id::UserId;
    use crate::error::AuthError;
    use std::time::Duration;

    #[tokio::test]
    async fn test_bearer_query_and_body_tokens() {
        let (state, _clock) = state(config(5, 3600)).await;
        let token = state.tokens.issue_token("1").unwrap().token;
        let use_case = state.authenticate_use_case();

        let by_header = RequestCredentials::bearer(&token);
        let by_query = RequestCredentials {
            query_token: Some(token.clone()),
            ..Default::default()
        };
        let by_body = RequestCredentials {
            body_token: Some(token.clone()),
            ..Default::default()
        };

        for credentials in [by_header, by_query, by_body] {
            let identity = use_case.execute(&credentials).await.unwrap();
            assert_eq!(identity.id, UserId::new(1));
        }
    }

    #[tokio::test]
    async fn test_header_wins_over_query() {
        let (state, _clock) = state(config(5, 3600)).await;
        let token = state.tokens.issue_token("1").unwrap().token;

        let credentials = RequestCredentials {
            authorization: Some("Bearer garbage".to_string()),
            query_token: Some(token),
            body_token: None,
        };
        assert!(state
            .authenticate_use_case()
            .execute(&credentials)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let (state, _clock) = state(config(5, 3600)).await;
        let result = state
            .authenticate_use_case()
            .execute(&RequestCredentials::default())
            .await;
        assert!(matches!(result, Err(AuthError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_unknown_inactive_or_malformed_subject() {
        let (state, _clock) = state(config(5, 3600)).await;
        let use_case = state.authenticate_use_case();

        for subject in ["99", "2", "alice"] {
            let token = state.tokens.issue_token(subject).unwrap().token;
            let result = use_case.execute(&RequestCredentials::bearer(token)).await;
            assert!(result.is_err(), "subject {subject:?} authenticated");
        }
    }

    #[tokio::test]
    async fn test_expired_token() {
        let (state, clock) = state(config(5, 3600)).await;
        let token = state.tokens.issue_token("1").unwrap().token;

        clock.advance(Duration::from_secs(3601));
        let result = state
            .authenticate_use_case()
            .execute(&RequestCredentials::bearer(token))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_disabled_jwt_never_authenticates() {
        let mut disabled = config(5, 3600);
        disabled.jwt_enabled = false;
        let (state, _clock) = state(disabled).await;
        let token = state.tokens.issue_token("1").unwrap().token;

        let result = state
            .authenticate_use_case()
            .execute(&RequestCredentials::bearer(token))
            .await;
        assert!(matches!(result, Err(AuthError::Unauthenticated)));
    }
}

#[cfg(test)]
mod login_tests {
    use super::fixtures::*;
    use crate::application::LoginInput;
    use crate::error::AuthError;
    use std::sync::Arc;

    fn input(username: &str, password: &str) -> LoginInput {
        LoginInput {
            username: username.to_string(),
            password: password.to_string(),
            client: "198.51.100.4".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_valid_token() {
        let (state, _clock) = state(config(5, 3600)).await;
        let output = state
            .login_use_case()
            .execute(input("alice", PASSWORD))
            .await
            .unwrap();

        assert_eq!(output.identity, alice());
        let validated = state.tokens.validate_token(&output.token.token).unwrap();
        assert_eq!(validated.subject(), "1");
    }

    #[tokio::test]
    async fn test_wrong_password_unknown_user_and_inactive_look_the_same() {
        let (state, _clock) = state(config(10, 3600)).await;
        let use_case = state.login_use_case();

        for (user, pass) in [
            ("alice", "wrong"),
            ("nobody", PASSWORD),
            ("retired", PASSWORD),
            ("", PASSWORD),
            ("alice", ""),
        ] {
            let err = use_case.execute(input(user, pass)).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
    }

    /// Concurrent failures from one client race the check against the
    /// update, so the counter may pass the limit before lockout engages.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_failures_overshoot_is_bounded() {
        const MAX: u32 = 5;
        const CONCURRENT: usize = 20;

        let (state, _clock) = state(config(MAX, 3600)).await;
        let use_case = Arc::new(state.login_use_case());

        let handles: Vec<_> = (0..CONCURRENT)
            .map(|_| {
                let use_case = use_case.clone();
                tokio::spawn(async move { use_case.execute(input("alice", "wrong")).await })
            })
            .collect();

        let mut rejected = 0;
        let mut throttled = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Err(AuthError::InvalidCredentials) => rejected += 1,
                Err(AuthError::TooManyAttempts { .. }) => throttled += 1,
                other => panic!("unexpected outcome: {other:?}"),
            }
        }

        assert_eq!(rejected + throttled, CONCURRENT);
        assert!(rejected >= MAX as usize);

        // Lost updates can leave the counter below the number of failures,
        // but sequential failures always reach the lockout within MAX more.
        let mut locked = false;
        for _ in 0..=MAX {
            if let Err(AuthError::TooManyAttempts { .. }) =
                use_case.execute(input("alice", "wrong")).await
            {
                locked = true;
                break;
            }
        }
        assert!(locked);
    }
}

#[cfg(test)]
mod http_tests {
    use super::fixtures::*;
    use crate::presentation::dto::{LoginResponse, RefreshResponse, VerifyResponse};
    use crate::presentation::router::{AUTH_NAMESPACE, auth_router, with_identity};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use serde_json::{Value, json};
    use std::time::Duration;
    use tower::ServiceExt;

    const CLIENT: &str = "203.0.113.50";

    fn app(state: TestState) -> Router {
        with_identity(
            Router::new().nest(AUTH_NAMESPACE, auth_router(state.clone())),
            state,
        )
    }

    fn login_request(username: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("{AUTH_NAMESPACE}/login"))
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-forwarded-for", CLIENT)
            .body(Body::from(
                json!({ "username": username, "password": password }).to_string(),
            ))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn login_token(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(login_request("alice", PASSWORD))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: LoginResponse = serde_json::from_value(body_json(response).await).unwrap();
        body.token
    }

    #[tokio::test]
    async fn test_login_response_shape() {
        let (state, _clock) = state(config(5, 3600)).await;
        let app = app(state);

        let response = app.oneshot(login_request("alice", PASSWORD)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["token_type"], "Bearer");
        assert_eq!(body["expires_in"], 3600);
        assert_eq!(body["user"]["id"], 1);
        assert_eq!(body["user"]["username"], "alice");
        assert_eq!(body["user"]["email"], "alice@example.com");
        assert_eq!(body["user"]["display_name"], "Alice");
        assert_eq!(body["user"]["roles"], json!(["administrator"]));
        assert!(body["user"].get("password_hash").is_none());
        assert!(body["user"].get("active").is_none());
    }

    #[tokio::test]
    async fn test_login_accepts_form_body() {
        let (state, _clock) = state(config(5, 3600)).await;
        let request = Request::builder()
            .method("POST")
            .uri(format!("{AUTH_NAMESPACE}/login"))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "username=alice&password=correct+horse+battery+staple",
            ))
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_malformed_json_is_bad_request() {
        let (state, _clock) = state(config(5, 3600)).await;
        let request = Request::builder()
            .method("POST")
            .uri(format!("{AUTH_NAMESPACE}/login"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// N = 5: failures one to five answer 401 and the fifth arms the lockout;
    /// the next attempt, even with the right password, answers 429 until the
    /// lockout has passed.
    #[tokio::test]
    async fn test_login_lockout_scenario() {
        let (state, clock) = state(config(5, 3600)).await;
        let tokens = state.tokens.clone();
        let app = app(state);

        for attempt in 1..=5 {
            let response = app
                .clone()
                .oneshot(login_request("alice", "wrong"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "attempt {attempt}");
            let body = body_json(response).await;
            assert_eq!(body["code"], "invalid_credentials");
        }

        let response = app
            .clone()
            .oneshot(login_request("alice", PASSWORD))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let retry_after: u64 = response.headers()[header::RETRY_AFTER]
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!(retry_after > 0);
        let body = body_json(response).await;
        assert_eq!(body["code"], "too_many_attempts");
        assert!(body["message"].as_str().unwrap().contains("60 minute(s)"));

        clock.advance(Duration::from_secs(3601));

        let response = app
            .clone()
            .oneshot(login_request("alice", PASSWORD))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: LoginResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(tokens.validate_token(&body.token).unwrap().subject(), "1");
    }

    #[tokio::test]
    async fn test_throttle_is_per_client_ip() {
        let (state, _clock) = state(config(1, 3600)).await;
        let app = app(state);

        let response = app
            .clone()
            .oneshot(login_request("alice", "wrong"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let mut other_client = login_request("alice", PASSWORD);
        other_client
            .headers_mut()
            .insert("x-forwarded-for", "203.0.113.51".parse().unwrap());
        let response = app.oneshot(other_client).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_verify_refresh_logout_with_bearer() {
        let (state, clock) = state(config(5, 3600)).await;
        let app = app(state);
        let token = login_token(&app).await;

        let verify = Request::builder()
            .uri(format!("{AUTH_NAMESPACE}/verify"))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(verify).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: VerifyResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert!(body.valid);
        assert_eq!(body.user.username, "alice");

        clock.advance(Duration::from_secs(10));
        let refresh = Request::builder()
            .method("POST")
            .uri(format!("{AUTH_NAMESPACE}/refresh?token={token}"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(refresh).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: RefreshResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_ne!(body.token, token);
        assert_eq!(body.token_type, "Bearer");

        let logout = Request::builder()
            .method("POST")
            .uri(format!("{AUTH_NAMESPACE}/logout"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "token": body.token }).to_string()))
            .unwrap();
        let response = app.oneshot(logout).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_json(response).await["message"].is_string());
    }

    #[tokio::test]
    async fn test_protected_routes_uniform_401() {
        let (state, clock) = state(config(5, 3600)).await;
        let app = app(state);
        let token = login_token(&app).await;
        clock.advance(Duration::from_secs(3601));

        let cases = [
            None,
            Some("Bearer not.a.token".to_string()),
            Some(format!("Bearer {token}")),
        ];

        for authorization in cases {
            let mut request = Request::builder().uri(format!("{AUTH_NAMESPACE}/verify"));
            if let Some(value) = &authorization {
                request = request.header(header::AUTHORIZATION, value);
            }
            let response = app
                .clone()
                .oneshot(request.body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let body = body_json(response).await;
            assert_eq!(body["code"], "invalid_token");
            assert_eq!(body["message"], "Invalid or expired token");
        }
    }

    #[tokio::test]
    async fn test_identity_and_role_guards() {
        use crate::presentation::middleware::{RequiredRole, require_identity, require_role};
        use axum::middleware::{from_fn, from_fn_with_state};
        use axum::routing::get;

        let (state, _clock) = state(config(5, 3600)).await;
        let guarded = Router::new()
            .route(
                "/member",
                get(|| async { "member" }).route_layer(from_fn(require_identity)),
            )
            .route(
                "/admin",
                get(|| async { "admin" }).route_layer(from_fn_with_state(
                    RequiredRole::new("administrator"),
                    require_role,
                )),
            )
            .route(
                "/editor",
                get(|| async { "editor" })
                    .route_layer(from_fn_with_state(RequiredRole::new("editor"), require_role)),
            );
        let app = with_identity(
            guarded.nest(AUTH_NAMESPACE, auth_router(state.clone())),
            state,
        );

        for uri in ["/member", "/admin", "/editor"] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(body_json(response).await["code"], "invalid_token");
        }

        let token = login_token(&app).await;
        let expected = [
            ("/member", StatusCode::OK),
            ("/admin", StatusCode::OK),
            ("/editor", StatusCode::FORBIDDEN),
        ];
        for (uri, status) in expected {
            let request = Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), status, "{uri}");
        }
    }
}
