use crate::config::Config;
use crate::github::GithubClient;
use crate::html::render_page;
use crate::page::{AppState, load};
use crate::stats::RepoStats;
use anyhow::{Context, Result};
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tracing::{debug, info, warn};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/repo", get(repo_stats))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    debug!(repo = %state.repo, "rendering landing page");
    let stats = load(&state).resolve().await;
    if let Some(RepoStats::Empty(reason)) = &stats {
        debug!("rendering without stats: {reason}");
    }
    Html(render_page(stats.as_ref()))
}

async fn repo_stats(State(state): State<AppState>) -> Response {
    match load(&state).resolve().await {
        Some(stats) => Json(stats).into_response(),
        None => Json(json!({})).into_response(),
    }
}

/// Builds the shared state from configuration. A missing token is not an
/// error: the site runs with empty stats.
pub fn app_state(config: &Config) -> AppState {
    let client = match &config.token {
        Some(token) => Some(GithubClient::with_base_url(token, &config.api_url)),
        None => {
            warn!("missing github token, repository stats will be empty");
            None
        }
    };
    AppState {
        client,
        repo: config.repository.clone(),
    }
}

pub async fn serve(config: Config) -> Result<()> {
    let app = router(app_state(&config));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!(addr = %config.addr, repo = %config.repository, "serving site");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
        .context("server error")
}
