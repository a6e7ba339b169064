// 🌐 Web Server - Dashboard page and JSON API with Axum

use crate::config::Settings;
use crate::dashboard::{load_dashboard, Dashboard};
use crate::error::{DashboardError, DashboardResult};
use crate::graphql::{build_http_client, GraphqlClient};
use crate::params::DashboardParams;
use crate::render::{render_dashboard, render_error_page};
use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state (read-only)
#[derive(Clone)]
pub struct AppState {
    settings: Arc<Settings>,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(settings: Settings) -> DashboardResult<Self> {
        let http = build_http_client(&settings)?;
        Ok(AppState {
            settings: Arc::new(settings),
            http,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// A GraphQL client scoped to one incoming request
    fn client_for(&self, headers: &HeaderMap) -> GraphqlClient {
        let authorization = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        GraphqlClient::new(self.http.clone(), self.settings.graphql_url.clone())
            .with_authorization(authorization)
    }
}

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn failed(error: &DashboardError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }
}

fn status_for(error: &DashboardError) -> StatusCode {
    match error {
        DashboardError::AccountNotFound(_) => StatusCode::NOT_FOUND,
        DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let title = status.canonical_reason().unwrap_or("Error");
        (status, Html(render_error_page(title, &self.to_string()))).into_response()
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

async fn build(
    state: &AppState,
    headers: &HeaderMap,
    slug: &str,
    params: DashboardParams,
) -> DashboardResult<Dashboard> {
    let client = state.client_for(headers);
    load_dashboard(&client, slug, params, Utc::now())
        .await
        .map_err(|e| {
            log::error!("Failed to build dashboard for {}: {}", slug, e);
            e
        })
}

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /funders-dashboard/:slug - Render the dashboard page
async fn dashboard_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<DashboardParams>,
    headers: HeaderMap,
) -> Result<Html<String>, DashboardError> {
    let dashboard = build(&state, &headers, &slug, params).await?;
    Ok(Html(render_dashboard(&dashboard, state.settings())))
}

/// GET /api/funders-dashboard/:slug - Dashboard data as JSON
async fn dashboard_json(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<DashboardParams>,
    headers: HeaderMap,
) -> Response {
    match build(&state, &headers, &slug, params).await {
        Ok(dashboard) => (StatusCode::OK, Json(ApiResponse::ok(dashboard))).into_response(),
        Err(e) => (status_for(&e), Json(ApiResponse::<Dashboard>::failed(&e))).into_response(),
    }
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/funders-dashboard/:slug", get(dashboard_json))
        .with_state(state.clone());

    Router::new()
        .route("/funders-dashboard/:slug", get(dashboard_page))
        .with_state(state)
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}
