use crate::config::Config;
use crate::handlers;
use crate::middleware::auth;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use crate::services::JwtService;
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::request_id_middleware;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub text_provider: Arc<dyn TextProvider>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Build the application with the Gemini provider from config.
    pub async fn build(config: Config) -> Result<Self, AppError> {
        let provider: Arc<dyn TextProvider> = Arc::new(GeminiTextProvider::new(GeminiConfig {
            api_key: config.gemini.api_key.clone(),
            model: config.gemini.model.clone(),
            api_base_url: config.gemini.api_base_url.clone(),
            timeout: Duration::from_secs(config.gemini.timeout_seconds),
        }));

        if provider.health_check().await.is_ok() {
            tracing::info!(model = %config.gemini.model, "Initialized Gemini text provider");
        } else {
            tracing::warn!("Gemini API key not configured - packet screening will be unavailable");
        }

        Self::build_with_provider(config, provider).await
    }

    /// Build with an explicit provider; tests inject mocks here.
    pub async fn build_with_provider(
        config: Config,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState { text_provider };

        let packet_routes = if config.auth.require_auth {
            let jwt = JwtService::new(
                &config.auth.jwt_secret,
                config.auth.access_token_expiry_minutes,
            );
            tracing::info!("Bearer-token auth enforced on /postPacket");
            Router::new()
                .route("/postPacket", post(handlers::post_packet))
                .layer(from_fn_with_state(jwt, auth::require_auth))
        } else {
            Router::new().route("/postPacket", post(handlers::post_packet))
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .merge(packet_routes)
            .layer(from_fn(request_id_middleware))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");

                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                }),
            )
            .layer(CorsLayer::permissive())
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.server.listen_port()));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(backend_ip = %config.server.backend_ip, "Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
