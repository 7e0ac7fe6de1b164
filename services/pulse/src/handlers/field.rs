use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::schema::FieldSchema;
use crate::domain::types::FieldDefinition;
use crate::error::PulseServiceError;
use crate::extract::{AdminSession, MemberSession};
use crate::handlers::stream::watch_snapshots;
use crate::infra::feed::Collection;
use crate::state::AppState;
use crate::usecase::field::{AddFieldUseCase, ListFieldsUseCase, RemoveFieldUseCase};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldResponse {
    pub id: Uuid,
    pub name: String,
    pub label: String,
    pub placeholder: String,
    #[serde(serialize_with = "leadtrack_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<FieldDefinition> for FieldResponse {
    fn from(field: FieldDefinition) -> Self {
        Self {
            id: field.id,
            name: field.name,
            label: field.label,
            placeholder: field.placeholder,
            created_at: field.created_at,
        }
    }
}

pub fn schema_response(schema: &FieldSchema) -> Vec<FieldResponse> {
    schema.fields().iter().cloned().map(Into::into).collect()
}

/// Current schema, shared by the list endpoint and its stream.
pub async fn load_schema(state: &AppState) -> Result<FieldSchema, PulseServiceError> {
    ListFieldsUseCase {
        repo: state.field_repo(),
    }
    .execute()
    .await
}

// ── GET /fields ──────────────────────────────────────────────────────────────

pub async fn list_fields(
    _session: MemberSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<FieldResponse>>, PulseServiceError> {
    let schema = load_schema(&state).await?;
    Ok(Json(schema_response(&schema)))
}

// ── GET /fields/stream ───────────────────────────────────────────────────────

pub async fn stream_fields(
    _session: MemberSession,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let feed = state.feed.clone();
    watch_snapshots(&feed, &[Collection::TaskFields], move || {
        let state = state.clone();
        async move { Ok(schema_response(&load_schema(&state).await?)) }
    })
}

// ── POST /fields ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddFieldRequest {
    pub label: String,
    pub placeholder: String,
}

pub async fn add_field(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(body): Json<AddFieldRequest>,
) -> Result<(StatusCode, Json<FieldResponse>), PulseServiceError> {
    let usecase = AddFieldUseCase {
        repo: state.field_repo(),
    };
    let field = usecase.execute(&body.label, &body.placeholder).await?;
    Ok((StatusCode::CREATED, Json(field.into())))
}

// ── DELETE /fields/{id} ──────────────────────────────────────────────────────

pub async fn remove_field(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, PulseServiceError> {
    let usecase = RemoveFieldUseCase {
        repo: state.field_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
