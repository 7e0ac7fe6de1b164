use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use leadtrack_domain::role::UserRole;

use crate::domain::types::User;
use crate::error::PulseServiceError;
use crate::extract::{AdminSession, MemberSession};
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, GetUserUseCase, ListEmployeesUseCase,
    UpdateProfileUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar: String,
    #[serde(serialize_with = "leadtrack_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "leadtrack_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            avatar: user.avatar,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(session: MemberSession) -> Json<UserResponse> {
    Json(session.user.into())
}

// ── PATCH /users/@me ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
}

pub async fn update_me(
    session: MemberSession,
    State(state): State<AppState>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<Json<UserResponse>, PulseServiceError> {
    let name = body.name.ok_or(PulseServiceError::MissingData)?;
    let usecase = UpdateProfileUseCase {
        repo: state.user_repo(),
        gateway: state.identity.clone(),
    };
    usecase.execute(&session.user.id, &name).await?;

    let user = GetUserUseCase {
        repo: state.user_repo(),
    }
    .execute(&session.user.id)
    .await?;
    Ok(Json(user.into()))
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub name: Option<String>,
}

pub async fn create_user(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), PulseServiceError> {
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
        gateway: state.identity.clone(),
    };
    let user = usecase
        .execute(CreateUserInput {
            email: body.email,
            password: body.password,
            role: body.role,
            name: body.name,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /employees ───────────────────────────────────────────────────────────

pub async fn list_employees(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, PulseServiceError> {
    let usecase = ListEmployeesUseCase {
        repo: state.user_repo(),
    };
    let employees = usecase.execute().await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}
