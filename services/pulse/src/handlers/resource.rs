use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{Resource, ResourceGroup};
use crate::error::PulseServiceError;
use crate::extract::{AdminSession, MemberSession};
use crate::state::AppState;
use crate::usecase::resource::{
    AddResourceInput, AddResourceUseCase, DeleteResourceUseCase, ListResourcesUseCase,
    SeedResourcesUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: Uuid,
    pub category: String,
    pub title: String,
    pub content: String,
    #[serde(serialize_with = "leadtrack_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Resource> for ResourceResponse {
    fn from(r: Resource) -> Self {
        Self {
            id: r.id,
            category: r.category,
            title: r.title,
            content: r.content,
            created_at: r.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct ResourceGroupResponse {
    pub category: String,
    pub resources: Vec<ResourceResponse>,
}

impl From<ResourceGroup> for ResourceGroupResponse {
    fn from(group: ResourceGroup) -> Self {
        Self {
            category: group.category,
            resources: group.resources.into_iter().map(Into::into).collect(),
        }
    }
}

pub async fn load_groups(state: &AppState) -> Result<Vec<ResourceGroupResponse>, PulseServiceError> {
    let groups = ListResourcesUseCase {
        repo: state.resource_repo(),
    }
    .execute()
    .await?;
    Ok(groups.into_iter().map(Into::into).collect())
}

// ── GET /resources ───────────────────────────────────────────────────────────

pub async fn list_resources(
    _session: MemberSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<ResourceGroupResponse>>, PulseServiceError> {
    Ok(Json(load_groups(&state).await?))
}

// ── POST /resources ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddResourceRequest {
    pub category: String,
    pub custom_category: Option<String>,
    pub title: String,
    pub content: String,
}

pub async fn add_resource(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(body): Json<AddResourceRequest>,
) -> Result<(StatusCode, Json<ResourceResponse>), PulseServiceError> {
    let usecase = AddResourceUseCase {
        repo: state.resource_repo(),
    };
    let resource = usecase
        .execute(
            AddResourceInput {
                category: body.category,
                custom_category: body.custom_category,
                title: body.title,
                content: body.content,
            },
            Utc::now(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(resource.into())))
}

// ── DELETE /resources/{id} ───────────────────────────────────────────────────

pub async fn delete_resource(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, PulseServiceError> {
    let usecase = DeleteResourceUseCase {
        repo: state.resource_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /resources/seed ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SeedResponse {
    pub inserted: usize,
}

pub async fn seed_resources(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<SeedResponse>, PulseServiceError> {
    let usecase = SeedResourcesUseCase {
        repo: state.resource_repo(),
    };
    let inserted = usecase.execute(Utc::now()).await?;
    Ok(Json(SeedResponse { inserted }))
}
