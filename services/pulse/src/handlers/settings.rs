use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::PulseServiceError;
use crate::extract::AdminSession;
use crate::state::AppState;
use crate::usecase::settings::{GetWebhookUseCase, SetWebhookUseCase};

#[derive(Serialize, Deserialize)]
pub struct WebhookBody {
    pub url: Option<String>,
}

// ── GET /settings/webhook ────────────────────────────────────────────────────

pub async fn get_webhook(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<WebhookBody>, PulseServiceError> {
    let usecase = GetWebhookUseCase {
        config: state.config_repo(),
    };
    Ok(Json(WebhookBody {
        url: usecase.execute().await?,
    }))
}

// ── PUT /settings/webhook ────────────────────────────────────────────────────

pub async fn set_webhook(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(body): Json<WebhookBody>,
) -> Result<Json<WebhookBody>, PulseServiceError> {
    let raw = body.url.ok_or(PulseServiceError::InvalidWebhookUrl)?;
    let usecase = SetWebhookUseCase {
        config: state.config_repo(),
    };
    let url = usecase.execute(&raw).await?;
    Ok(Json(WebhookBody { url: Some(url) }))
}
