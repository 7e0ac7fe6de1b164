use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::Announcement;
use crate::error::PulseServiceError;
use crate::extract::{AdminSession, MemberSession};
use crate::state::AppState;
use crate::usecase::announcement::{BroadcastUseCase, GetAnnouncementUseCase};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementResponse {
    pub message: String,
    #[serde(serialize_with = "leadtrack_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
}

impl From<Announcement> for AnnouncementResponse {
    fn from(a: Announcement) -> Self {
        Self {
            message: a.message,
            updated_at: a.updated_at,
            updated_by: a.updated_by,
        }
    }
}

// ── GET /announcement ────────────────────────────────────────────────────────

pub async fn get_announcement(
    _session: MemberSession,
    State(state): State<AppState>,
) -> Result<Json<AnnouncementResponse>, PulseServiceError> {
    let usecase = GetAnnouncementUseCase {
        repo: state.announcement_repo(),
    };
    Ok(Json(usecase.execute().await?.into()))
}

// ── PUT /announcement ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct BroadcastRequest {
    pub message: String,
}

pub async fn broadcast(
    admin: AdminSession,
    State(state): State<AppState>,
    Json(body): Json<BroadcastRequest>,
) -> Result<Json<AnnouncementResponse>, PulseServiceError> {
    let usecase = BroadcastUseCase {
        repo: state.announcement_repo(),
    };
    let announcement = usecase
        .execute(&body.message, admin.display_name(), Utc::now())
        .await?;
    Ok(Json(announcement.into()))
}
