//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, limits, compression, headers)
//! - Serve static assets, falling back to the 404 page
//! - Bind server to listener and shut down gracefully

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    handler::HandlerWithoutStateExt,
    http::Request,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::error::PanicResponder;
use crate::http::request::{MakeRequestUuidV4, RequestIdExt};
use crate::http::{api, health, pages, security};
use crate::observability::metrics;
use crate::security::{headers::apply_security_headers, limits::apply_limits};
use crate::supply_chain::{MockSecurityData, SupplyChainService};
use crate::upstream::{BackendClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub backend: BackendClient,
    pub supply_chain: SupplyChainService,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, UpstreamError> {
        let backend = BackendClient::new(&config.backend)?;
        let source = Arc::new(MockSecurityData::new(config.supply_chain.clone()));
        let supply_chain = SupplyChainService::new(
            source,
            config.supply_chain.clone(),
            config.catalog.clone(),
        );

        Ok(Self {
            config: Arc::new(config),
            backend,
            supply_chain,
            started_at: Instant::now(),
        })
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.config.backend.page_timeout_secs)
    }

    pub fn proxy_timeout(&self) -> Duration {
        Duration::from_secs(self.config.backend.proxy_timeout_secs)
    }
}

/// HTTP server for the dashboard frontend.
pub struct HttpServer {
    router: Router,
    config: Arc<AppConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, UpstreamError> {
        let state = AppState::new(config)?;
        Ok(Self::with_state(state))
    }

    /// Create a server around prebuilt state.
    pub fn with_state(state: AppState) -> Self {
        let config = state.config.clone();
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Self::apply_layers(Self::routes(config, state), config)
    }

    fn routes(config: &AppConfig, state: AppState) -> Router {
        let static_files = ServeDir::new(&config.server.static_dir)
            .call_fallback_on_method_not_allowed(true)
            .fallback(pages::not_found.into_service());

        Router::new()
            .route("/health", get(health::health))
            .route("/", get(pages::home))
            .route("/users", get(pages::users))
            .route("/api/users", get(api::list_users).post(api::create_user))
            .route(
                "/api/users/{id}",
                get(api::get_user).put(api::update_user).delete(api::delete_user),
            )
            .route("/api/stats", get(api::stats))
            .route("/api/security/extensions", get(security::extensions))
            .route("/api/security/overview", post(security::overview_for))
            .route("/api/security/{entity}", get(security::entity_overview))
            .route("/api/security/{entity}/{component}", get(security::entity_component))
            .route("/security/{entity}", get(security::page))
            .route_layer(middleware::from_fn(metrics::track_requests))
            .fallback_service(static_files)
            .with_state(state)
    }

    /// Wrap a router in the server's middleware stack.
    pub fn apply_layers(mut router: Router, config: &AppConfig) -> Router {
        if config.security.enable_headers {
            router = apply_security_headers(router);
        }
        if config.security.compression {
            router = router.layer(CompressionLayer::new());
        }
        router = apply_limits(router, &config.security);

        router
            .layer(CatchPanicLayer::custom(PanicResponder {
                expose_details: config.is_development(),
            }))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = request.headers().request_id().unwrap_or("-"),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend = %self.config.backend.base_url,
            environment = %self.config.server.environment,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received: closing HTTP server");
            })
            .await?;

        tracing::info!("HTTP server closed");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
