//! Eventdash REST API
//!
//! HTTP API layer for Eventdash, built with Axum.
//!
//! # Endpoints
//!
//! ## Events
//! - `GET /api/events` - List all events
//! - `POST /api/events` - Create an event
//! - `GET /api/events/:id` - Get an event
//! - `PUT /api/events/:id` - Update an event
//! - `DELETE /api/events/:id` - Delete an event
//!
//! ## Members
//! - `GET /api/members` - List team members
//!
//! ## Uploads
//! - `POST /api/upload` - Upload an event image (multipart field `file`)
//! - `GET /uploads/:file` - Serve an uploaded image
//!
//! ## Auth
//! - `POST /api/auth/login` - Sign in with a member email
//! - `GET /api/auth/session` - Current session
//! - `POST /api/auth/logout` - Sign out
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! Every `/api` route except login and logout requires
//! `Authorization: Bearer <token>`.
//!
//! # Example
//!
//! ```rust,ignore
//! use eventdash::api::{serve, ApiConfig, AppState};
//! use eventdash::auth::AuthConfig;
//! use eventdash::store::Store;
//! use eventdash::uploads::{UploadConfig, UploadStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(Store::open("eventdash_data".as_ref())?);
//!     let uploads = Arc::new(UploadStore::new(UploadConfig::default())?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, uploads, AuthConfig::default(), config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use extract::AuthSession;
pub use state::{ApiConfig, AppState};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Room for multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.uploads.max_bytes() + MULTIPART_OVERHEAD;
    let upload_dir = state.uploads.dir().to_path_buf();
    let public_path = format!("/{}", state.uploads.public_path().trim_matches('/'));
    let timeout = Duration::from_millis(state.config.request_timeout_ms);
    let cors = cors_layer(&state.config.cors_origins);

    let api_routes = Router::new()
        // Event routes
        .route(
            "/events",
            get(routes::events::list_events).post(routes::events::create_event),
        )
        .route(
            "/events/:id",
            get(routes::events::get_event)
                .put(routes::events::update_event)
                .delete(routes::events::delete_event),
        )
        // Member routes
        .route("/members", get(routes::members::list_members))
        // Upload route - body limit follows the configured image size
        .route(
            "/upload",
            post(routes::upload::upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Auth routes
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/session", get(routes::auth::current_session))
        .route("/auth/logout", post(routes::auth::logout));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Uploaded files are only ever displayed as images, never rendered as documents
    let upload_service = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'"),
        ))
        .service(ServeDir::new(upload_dir));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .nest_service(&public_path, upload_service)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the configured dashboard origins; any origin when none are set
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Eventdash API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Eventdash API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
