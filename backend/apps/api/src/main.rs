//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.
//!
//! `api hash-password` reads a password from stdin and prints its Argon2id
//! PHC string for the users file.

mod app;
mod config;

use std::io::BufRead;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use auth::InMemoryUserDirectory;
use auth::presentation::{AuthAppState, RequiredRole};
use platform::clock::SystemClock;
use platform::password::ClearTextPassword;
use platform::rate_limit::{InMemoryAttemptStore, spawn_purge_task};
use response_cache::{FileCacheStore, ResponseCache, spawn_sweeper};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::Services;
use crate::config::Settings;

/// How often expired login-attempt counters are dropped
const ATTEMPT_PURGE_INTERVAL: Duration = Duration::from_secs(300);

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().nth(1).as_deref() == Some("hash-password") {
        return hash_password();
    }

    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,response_cache=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    if settings.generated_secret {
        tracing::warn!("JWT_SECRET not set; using a random secret, tokens will not survive a restart");
    }

    let clock = SystemClock::shared();

    // User directory
    let directory = match InMemoryUserDirectory::load(&settings.users_file).await {
        Ok(directory) => directory,
        Err(e) => {
            tracing::warn!(
                error = %e,
                path = %settings.users_file.display(),
                "Users file not loaded, continuing with no users"
            );
            InMemoryUserDirectory::new()
        }
    };

    let attempts = Arc::new(InMemoryAttemptStore::new(clock.clone()));
    let _attempt_purge = spawn_purge_task(attempts.clone(), ATTEMPT_PURGE_INTERVAL);

    let auth = AuthAppState::with_attempt_store(
        directory,
        attempts,
        settings.auth.clone(),
        clock.clone(),
    );

    // Response cache
    let store = if settings.cache.enabled {
        FileCacheStore::open(&settings.cache.cache_dir)
            .await
            .with_context(|| format!("cannot prepare {}", settings.cache.cache_dir.display()))?
    } else {
        FileCacheStore::new(&settings.cache.cache_dir)
    };
    let cache = Arc::new(ResponseCache::new(
        Arc::new(store),
        Arc::new(settings.cache.clone()),
        clock.clone(),
    ));

    // Startup cleanup: entries from a previous run may be arbitrarily old
    // Errors here should not prevent server startup
    if cache.is_enabled() {
        if let Err(e) = cache.purge_all().await {
            tracing::warn!(error = %e, "Startup cache cleanup failed, continuing anyway");
        }
    }
    let _sweeper = spawn_sweeper(cache.clone(), settings.cache.sweep_interval);

    tracing::info!(
        jwt_enabled = settings.auth.jwt_enabled,
        cache_enabled = settings.cache.enabled,
        cors_enabled = settings.cors.enabled,
        "Components configured"
    );

    // Build router
    let app = app::router(Services {
        auth,
        cache,
        cors: settings.cors.clone(),
        admin_role: RequiredRole::new(settings.admin_role.as_str()),
        clock,
    });

    // Start server
    tracing::info!("Listening on {}", settings.bind_addr);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn hash_password() -> anyhow::Result<()> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let raw = line.trim_end_matches(['\r', '\n']).to_string();

    let password = ClearTextPassword::new(raw).context("password must be 1-1024 characters")?;
    let hash = password.hash()?;
    println!("{}", hash.as_phc_string());
    Ok(())
}
