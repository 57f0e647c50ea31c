use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shared::{
    error::{ApiError, ErrorCode},
    protocol::TimelineResponse,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::{
    health_route, load_entries, parse_year_param, ready_route, timeline, timeline_route,
    ApiContext, HealthStatus, ReadyStatus, ServiceInfo,
};
use app_state::AppState;
use config::load_settings;

#[derive(Debug, Deserialize)]
struct TimelineQuery {
    year: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings();
    let api = match &settings.timeline_path {
        Some(path) => {
            let entries = load_entries(path).map_err(|error| {
                error!(path = %path.display(), %error, "failed to load timeline file");
                error
            })?;
            info!(path = %path.display(), entries = entries.len(), "timeline file loaded");
            ApiContext::new(entries)
        }
        None => {
            info!("no timeline file configured; serving seed entries");
            ApiContext::seeded()
        }
    };

    let service = ServiceInfo {
        name: settings.app_name.clone(),
        env: settings.env.clone(),
    };
    let app = build_router(Arc::new(AppState { api, service }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(health_route(), get(health))
        .route(ready_route(), get(ready))
        .route(timeline_route(), get(http_timeline))
        .fallback(not_found)
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(api::health(&state.service))
}

async fn ready() -> Json<ReadyStatus> {
    Json(api::ready())
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(
            ErrorCode::NotFound,
            format!("no route for {}", uri.path()),
        )),
    )
}

async fn http_timeline(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TimelineQuery>,
) -> Result<Json<TimelineResponse>, (StatusCode, Json<ApiError>)> {
    let year = parse_year_param(q.year.as_deref())
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ApiError::from(e))))?;
    let response = timeline(&state.api, year);
    info!(?year, items = response.items.len(), "served timeline");
    Ok(Json(response))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
