//! Gateway HTTP server: LINE webhook, health probe and static assets (single port).

use crate::config::{self, BotSettings, Config};
use crate::gateway::assets::{asset_base_url, content_type_for, resolve_asset_path};
use crate::handler::TextMessageHandler;
use crate::line::{signature, LineApi, LineClient, LineError, WebhookRequest};
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared state for the gateway. Immutable after startup.
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<Config>,
    /// Channel secret used to verify X-Line-Signature.
    pub channel_secret: Arc<str>,
    pub api: Arc<dyn LineApi>,
    /// Resolved directory served under /static.
    pub static_dir: Arc<PathBuf>,
}

impl GatewayState {
    pub fn new(config: Config, config_path: &std::path::Path, bot: &BotSettings, api: Arc<dyn LineApi>) -> Self {
        let static_dir = config::resolve_relative(config_path, &config.server.static_dir);
        Self {
            config: Arc::new(config),
            channel_secret: Arc::from(bot.channel_secret.as_str()),
            api,
            static_dir: Arc::new(static_dir),
        }
    }
}

/// Routes: GET / (health), POST /callback (webhook), GET /static/*path.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(health_http))
        .route("/callback", post(callback))
        .route("/static/*path", get(static_asset))
        .with_state(state)
}

/// Run the gateway with credentials resolved from the process environment.
pub async fn run_gateway(config: Config, config_path: PathBuf) -> Result<()> {
    let bot = BotSettings::from_env(&config);
    run_gateway_with(config, config_path, bot).await
}

pub async fn run_gateway_with(config: Config, config_path: PathBuf, bot: BotSettings) -> Result<()> {
    let bind = config.server.bind.trim().to_string();
    let port = config.server.port;
    let client = LineClient::new(bot.channel_token.clone(), bot.api_endpoint_base.clone());
    log::info!("line api endpoint: {}", client.base_url());
    let state = GatewayState::new(config, &config_path, &bot, Arc::new(client));
    log::debug!("serving static assets from {}", state.static_dir.display());

    let app = router(state);

    let bind_addr = format!("{}:{}", bind, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding to {}", bind_addr))?;
    log::info!("gateway listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server exited")?;
    log::info!("gateway stopped");
    Ok(())
}

/// Future that completes when the process should shut down (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutdown signal received, draining connections");
}

/// POST /callback — verifies X-Line-Signature, decodes events, dispatches text messages in order.
async fn callback(State(state): State<GatewayState>, headers: HeaderMap, body: Bytes) -> Response {
    let Some(sig) = headers
        .get(signature::SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
    else {
        return (StatusCode::BAD_REQUEST, "Bad Request").into_response();
    };
    if !signature::verify(&state.channel_secret, &body, sig) {
        log::warn!("webhook rejected: invalid signature");
        return (StatusCode::BAD_REQUEST, "Invalid signature").into_response();
    }
    let request: WebhookRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("webhook rejected: {}", e);
            return (StatusCode::BAD_REQUEST, "Invalid request body").into_response();
        }
    };

    let base_url = asset_base_url(state.config.server.public_base_url.as_deref(), &headers);
    let handler = TextMessageHandler::new(state.api.as_ref(), &base_url);
    for event in request.events {
        let Some(text_event) = event.into_text_message() else {
            log::info!("non-text event has come, skipping");
            continue;
        };
        if let Err(e) = handler.handle(&text_event).await {
            log::error!("handling text message {} failed: {}", text_event.reply_token, e);
            return error_response(&state.config, &e);
        }
    }
    (StatusCode::OK, "OK").into_response()
}

fn error_response(config: &Config, err: &LineError) -> Response {
    let body = if config.settings.display_error_details {
        err.to_string()
    } else {
        "Internal Server Error".to_string()
    };
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

/// GET / returns a simple health JSON (for probes).
async fn health_http(State(state): State<GatewayState>) -> Json<serde_json::Value> {
    Json(json!({
        "runtime": "running",
        "port": state.config.server.port,
    }))
}

/// GET /static/*path serves files from the static directory.
async fn static_asset(State(state): State<GatewayState>, Path(path): Path<String>) -> Response {
    let Some(file) = resolve_asset_path(&state.static_dir, &path) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match tokio::fs::read(&file).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type_for(&file))], bytes).into_response(),
        Err(e) => {
            log::debug!("static asset {} not served: {}", file.display(), e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
