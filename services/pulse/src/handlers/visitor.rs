use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use leadtrack_domain::pagination::PageRequest;

use crate::domain::types::VisitorLog;
use crate::error::PulseServiceError;
use crate::extract::AdminSession;
use crate::state::AppState;
use crate::usecase::visitor::ListVisitsUseCase;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitResponse {
    pub id: Uuid,
    pub employee_id: String,
    pub employee_name: String,
    pub employee_email: String,
    #[serde(serialize_with = "leadtrack_core::serde::to_rfc3339_ms")]
    pub login_time: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
}

impl From<VisitorLog> for VisitResponse {
    fn from(v: VisitorLog) -> Self {
        Self {
            id: v.id,
            employee_id: v.employee_id,
            employee_name: v.employee_name,
            employee_email: v.employee_email,
            login_time: v.login_time,
            ip_address: v.ip_address,
            user_agent: v.user_agent,
        }
    }
}

// ── GET /visits ──────────────────────────────────────────────────────────────

pub async fn list_visits(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<VisitResponse>>, PulseServiceError> {
    let usecase = ListVisitsUseCase {
        visits: state.visitor_repo(),
    };
    let visits = usecase.execute(page).await?;
    Ok(Json(visits.into_iter().map(Into::into).collect()))
}
