use anyhow::{Context, Result};
use axum::{error_handling::HandleErrorLayer, http::StatusCode, routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::{limit::ConcurrencyLimitLayer, timeout::TimeoutLayer, BoxError, ServiceBuilder};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;

use crate::api::handlers;
use crate::api::middleware::create_cors_layer;
use crate::api::server_config::*;
use crate::auth::{
    core::{PasswordService, TokenService},
    create_auth_routes, AuthConfig, AuthService, MemoryStorage, SqliteStorage, UserStorage,
};
use crate::config::{AppEnvConfig, StorageBackend};

#[derive(Clone)]
pub struct AuthServer {
    pub service: Arc<AuthService>,
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl AuthServer {
    /// Build storage, hasher and token issuer from configuration and wire
    /// them into a server.
    pub async fn new(env: &AppEnvConfig, auth: &AuthConfig) -> Result<Self> {
        let storage: Arc<dyn UserStorage> = match env.storage_backend() {
            StorageBackend::Memory => {
                tracing::warn!("using in-memory user storage; users are lost on restart");
                Arc::new(MemoryStorage::new())
            }
            StorageBackend::Sqlite(url) => Arc::new(
                SqliteStorage::connect(&url, env.database_max_connections)
                    .await
                    .context("Failed to open user database")?,
            ),
        };

        let service = build_auth_service(auth, storage)?;

        Ok(Self::with_service(
            Arc::new(service),
            env.host.clone(),
            env.port,
            env.cors_allow_origin.clone(),
        ))
    }

    pub fn with_service(
        service: Arc<AuthService>,
        host: String,
        port: u16,
        cors_origin: String,
    ) -> Self {
        Self {
            service,
            host,
            port,
            cors_origin,
        }
    }

    pub fn create_router(&self) -> Result<Router> {
        let cors = create_cors_layer(&self.cors_origin)
            .with_context(|| format!("Invalid CORS_ALLOW_ORIGIN: {}", self.cors_origin))?;

        info!("CORS configured to allow origin: {}", self.cors_origin);

        let router = Router::new()
            .route("/health", get(handlers::health_check))
            .merge(create_auth_routes(self.service.clone()))
            .layer(cors)
            .layer(
                ServiceBuilder::new()
                    // Convert middleware errors (timeout/overload) into HTTP responses
                    .layer(HandleErrorLayer::new(|err: BoxError| async move {
                        if err.is::<tower::timeout::error::Elapsed>() {
                            (StatusCode::REQUEST_TIMEOUT, "request timed out")
                        } else {
                            (StatusCode::SERVICE_UNAVAILABLE, "service overloaded")
                        }
                    }))
                    .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENCY))
                    .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
                    .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                    .layer(TraceLayer::new_for_http()),
            );

        Ok(router)
    }

    pub async fn start(self) -> Result<()> {
        let app = self.create_router()?;

        let addr = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        info!("Server stopped");
        Ok(())
    }
}

/// Wire an [`AuthService`] from configuration over the given store.
pub fn build_auth_service(config: &AuthConfig, storage: Arc<dyn UserStorage>) -> Result<AuthService> {
    let tokens = TokenService::new(config.jwt_secret.clone(), config.token_expiry)
        .context("Rejected JWT_SECRET")?;
    let secrets = PasswordService::new(config.password.clone());

    Ok(AuthService::new(storage, Arc::new(secrets), Arc::new(tokens)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
