//! Webhook ingress: Telegram POSTs each update to `/{token}`.
//!
//! `GET /` is a health check. Updates must be `application/json` (anything else is 403), are
//! parsed as teloxide [`Update`]s (400 when malformed) and, when they carry a message, handed to
//! the [`MessageProcessor`] queue of their user. The provider always gets 200 once the update is
//! accepted; the outcome of processing is not reported back. TLS is terminated in front of
//! this server.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use dbot_core::{Message, ToCoreMessage};
use teloxide::prelude::*;
use teloxide::types::{InputFile, Update, UpdateKind};
use tracing::{debug, info, instrument, warn};

use crate::adapters::TelegramMessageWrapper;
use crate::config::WebhookConfig;
use crate::processor::MessageProcessor;

struct WebhookState {
    token: String,
    processor: MessageProcessor,
}

/// Router with the health check and the update endpoint for `token`.
pub fn webhook_router(token: &str, processor: MessageProcessor) -> Router {
    let state = Arc::new(WebhookState {
        token: token.to_string(),
        processor,
    });
    Router::new()
        .route("/", get(index))
        .route("/{token}", post(receive_update))
        .with_state(state)
}

async fn index() -> StatusCode {
    StatusCode::OK
}

/// Media type without parameters, e.g. `application/json` for `application/json; charset=utf-8`.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

/// The core message carried by an update, if it is a new message.
pub fn update_to_message(update: &Update) -> Option<Message> {
    match &update.kind {
        UpdateKind::Message(msg) => Some(TelegramMessageWrapper(msg).to_core()),
        _ => None,
    }
}

async fn receive_update(
    State(state): State<Arc<WebhookState>>,
    Path(token): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if token != state.token {
        debug!("Update posted to unknown path");
        return StatusCode::NOT_FOUND;
    }
    if !is_json(&headers) {
        warn!(
            content_type = ?headers.get(header::CONTENT_TYPE),
            "Rejected update with non-JSON content type"
        );
        return StatusCode::FORBIDDEN;
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, "Rejected malformed update");
            return StatusCode::BAD_REQUEST;
        }
    };

    match update_to_message(&update) {
        Some(message) => {
            info!(
                update_id = update.id.0,
                user_id = message.user_id(),
                "Update accepted"
            );
            state.processor.enqueue(message);
        }
        None => debug!(update_id = update.id.0, "Ignored update without a message"),
    }
    StatusCode::OK
}

/// Drops any previous webhook and, when a public URL is configured, registers `{url}/{token}`
/// (with the certificate, if any).
#[instrument(skip(bot, token, config))]
pub async fn register_webhook(bot: &teloxide::Bot, token: &str, config: &WebhookConfig) -> Result<()> {
    bot.delete_webhook()
        .await
        .context("Failed to delete previous webhook")?;

    let Some(url) = config.webhook_url(token)? else {
        info!("SERVER_URL not set, webhook registration skipped");
        return Ok(());
    };

    let request = bot.set_webhook(url);
    let request = match &config.certificate {
        Some(path) => request.certificate(InputFile::file(path.clone())),
        None => request,
    };
    request.await.context("Failed to set webhook")?;
    info!(has_certificate = config.certificate.is_some(), "Webhook registered");
    Ok(())
}

/// Binds the ingress and serves until the process stops.
#[instrument(skip(token, processor, config), fields(listen_addr = %config.listen_addr))]
pub async fn serve_webhook(
    token: &str,
    processor: MessageProcessor,
    config: &WebhookConfig,
) -> Result<()> {
    let app = webhook_router(token, processor);
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!(addr = %listener.local_addr()?, "Webhook server listening");
    axum::serve(listener, app).await.context("Webhook server error")?;
    Ok(())
}
