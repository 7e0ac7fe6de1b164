//! Everything the employee home screen needs in one round trip.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header::USER_AGENT},
};
use chrono::Utc;
use serde::Serialize;

use crate::domain::repository::AnnouncementRepository;
use crate::error::PulseServiceError;
use crate::extract::EmployeeSession;
use crate::handlers::announcement::AnnouncementResponse;
use crate::handlers::daily_log::WeeklyPointResponse;
use crate::handlers::field::{FieldResponse, load_schema, schema_response};
use crate::handlers::resource::{ResourceGroupResponse, load_groups};
use crate::handlers::task::TaskResponse;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::performance::WeeklySeriesUseCase;
use crate::usecase::task::ListTasksUseCase;
use crate::usecase::visitor::{RecordVisitUseCase, VisitInput};

const FORWARDED_FOR: &str = "x-forwarded-for";

#[derive(Serialize)]
pub struct DashboardResponse {
    pub user: UserResponse,
    pub fields: Vec<FieldResponse>,
    pub tasks: Vec<TaskResponse>,
    pub weekly: Vec<WeeklyPointResponse>,
    pub announcement: Option<AnnouncementResponse>,
    pub resources: Vec<ResourceGroupResponse>,
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

// ── GET /dashboard ───────────────────────────────────────────────────────────

pub async fn dashboard(
    session: EmployeeSession,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardResponse>, PulseServiceError> {
    let record = RecordVisitUseCase {
        visits: state.visitor_repo(),
        ip_lookup: state.ip_lookup(),
    };
    let visit = VisitInput {
        forwarded_for: header_string(&headers, FORWARDED_FOR),
        user_agent: header_string(&headers, USER_AGENT.as_str()),
        login_time: Utc::now(),
    };
    let visitor = session.user.clone();
    tokio::spawn(async move {
        record.execute(&visitor, visit).await;
    });

    let schema = load_schema(&state).await?;
    let tasks = ListTasksUseCase {
        tasks: state.task_repo(),
        view: state.task_view.clone(),
    };
    let weekly = WeeklySeriesUseCase {
        repo: state.daily_log_repo(),
    };
    let announcement = state.announcement_repo();
    let (tasks, weekly, announcement, resources) = tokio::try_join!(
        tasks.execute(&session.user.id),
        weekly.execute(&schema, &session.user.id),
        announcement.latest(),
        load_groups(&state),
    )?;

    Ok(Json(DashboardResponse {
        user: session.user.into(),
        fields: schema_response(&schema),
        tasks: tasks.into_iter().map(Into::into).collect(),
        weekly: weekly.into_iter().map(Into::into).collect(),
        announcement: announcement.map(Into::into),
        resources,
    }))
}
