//! Axum web server for the metadata context API.
//!
//! Routes:
//!
//! ```text
//! GET  /health
//! GET  /metadata/context?app_name=..&schema=..
//! GET  /metadata/context/multi?app_name_1=..&app_name_2=..&app_name_3=..
//! POST /metadata/context/multi   {"app_names": [..], "schema": null}
//! ```

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use super::error::ApiError;
use super::validation::{validate_app_name, AppNames};
use crate::config::ServerSettings;
use crate::context::{AppContext, ContextSynthesizer, MultiAppContext};

/// Application state shared across handlers.
pub struct AppState {
    pub synthesizer: ContextSynthesizer,
    /// Reported by the health endpoint.
    pub service_name: String,
}

impl AppState {
    pub fn new(synthesizer: ContextSynthesizer, service_name: impl Into<String>) -> Self {
        Self {
            synthesizer,
            service_name: service_name.into(),
        }
    }
}

/// Build the axum router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/metadata/context", get(get_context))
        .route(
            "/metadata/context/multi",
            get(get_multi_context).post(post_multi_context),
        )
        .layer(cors)
        .with_state(state)
}

/// Serve until Ctrl+C.
pub async fn serve(
    settings: &ServerSettings,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, service = %state.service_name, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

// ============================================================================
// API Handlers
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: String,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: state.service_name.clone(),
    })
}

#[derive(Debug, Deserialize)]
struct ContextQuery {
    app_name: String,
    schema: Option<String>,
}

/// GET /metadata/context - AI-ready context for one application
async fn get_context(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContextQuery>,
) -> Result<Json<AppContext>, ApiError> {
    validate_app_name(&query.app_name, 0)?;
    tracing::info!(app_name = %query.app_name, schema = ?query.schema, "Fetching metadata context for app");

    let context = state
        .synthesizer
        .build_app_context(&query.app_name, query.schema.as_deref())
        .await?;
    Ok(Json(context))
}

#[derive(Debug, Deserialize)]
struct MultiContextQuery {
    app_name_1: String,
    app_name_2: Option<String>,
    app_name_3: Option<String>,
}

impl MultiContextQuery {
    /// Present, non-empty names in parameter order.
    fn into_names(self) -> Vec<String> {
        [Some(self.app_name_1), self.app_name_2, self.app_name_3]
            .into_iter()
            .flatten()
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// GET /metadata/context/multi - context for 1-3 applications
async fn get_multi_context(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MultiContextQuery>,
) -> Result<Json<MultiAppContext>, ApiError> {
    let app_names = AppNames::parse(query.into_names())?;
    build_multi(&state, &app_names, None).await
}

#[derive(Debug, Deserialize)]
struct MultiContextRequest {
    app_names: Vec<String>,
    #[serde(default)]
    schema: Option<String>,
}

/// POST /metadata/context/multi - context for 1-3 applications with a schema filter
async fn post_multi_context(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MultiContextRequest>,
) -> Result<Json<MultiAppContext>, ApiError> {
    let app_names = AppNames::parse(request.app_names)?;
    build_multi(&state, &app_names, request.schema.as_deref()).await
}

async fn build_multi(
    state: &AppState,
    app_names: &AppNames,
    schema: Option<&str>,
) -> Result<Json<MultiAppContext>, ApiError> {
    tracing::info!(app_names = ?app_names.as_slice(), schema = ?schema, "Fetching metadata context for multiple apps");

    let apps = state
        .synthesizer
        .build_multi_app_context(app_names.as_slice(), schema)
        .await?;
    Ok(Json(MultiAppContext::new(apps)))
}
