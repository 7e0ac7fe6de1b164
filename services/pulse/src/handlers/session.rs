use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use leadtrack_auth_types::identity::PrincipalHeaders;
use leadtrack_domain::role::UserRole;

use crate::domain::types::{Portal, Principal};
use crate::error::PulseServiceError;
use crate::extract::portal_guard;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::role::Entry;
use crate::usecase::session::{SignInInput, SignInUseCase, SignOutUseCase};

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Unauthenticated,
    Employee,
    Admin,
}

impl From<UserRole> for SessionState {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Employee => Self::Employee,
            UserRole::Admin => Self::Admin,
        }
    }
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

// ── POST /session ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub portal: Portal,
}

pub async fn sign_in(
    State(state): State<AppState>,
    Json(body): Json<SignInRequest>,
) -> Result<Json<SessionResponse>, PulseServiceError> {
    let usecase = SignInUseCase {
        guard: portal_guard(&state),
    };
    let signed_in = usecase
        .execute(SignInInput {
            email: body.email,
            password: body.password,
            portal: body.portal,
        })
        .await?;
    Ok(Json(SessionResponse {
        state: signed_in.user.role.into(),
        user: Some(signed_in.user.into()),
        token: Some(signed_in.token),
    }))
}

// ── GET /session ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SessionQuery {
    #[serde(default)]
    pub portal: Portal,
}

/// Resolve the current principal as a login surface would: a principal that
/// does not fit `portal`, or has no record, is signed out.
pub async fn get_session(
    principal: Option<PrincipalHeaders>,
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<SessionResponse>, PulseServiceError> {
    let Some(principal) = principal.map(Principal::from) else {
        return Ok(Json(SessionResponse {
            state: SessionState::Unauthenticated,
            user: None,
            token: None,
        }));
    };
    let user = portal_guard(&state)
        .execute(Some(&principal), query.portal, Entry::SignIn)
        .await?;
    Ok(Json(SessionResponse {
        state: user.role.into(),
        user: Some(user.into()),
        token: None,
    }))
}

// ── DELETE /session ──────────────────────────────────────────────────────────

pub async fn sign_out(
    principal: PrincipalHeaders,
    State(state): State<AppState>,
) -> Result<StatusCode, PulseServiceError> {
    let usecase = SignOutUseCase {
        gateway: state.identity.clone(),
    };
    usecase.execute(&principal.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
