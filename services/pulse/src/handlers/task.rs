use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::AssignedTask;
use crate::error::PulseServiceError;
use crate::extract::{AdminSession, EmployeeSession};
use crate::state::AppState;
use crate::usecase::task::{AssignTaskInput, AssignTaskUseCase, ListTasksUseCase, ToggleTaskUseCase};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub employee_id: String,
    pub task: String,
    pub assigned_by: String,
    pub is_completed: bool,
    #[serde(serialize_with = "leadtrack_core::serde::to_rfc3339_ms")]
    pub assigned_at: DateTime<Utc>,
}

impl From<AssignedTask> for TaskResponse {
    fn from(task: AssignedTask) -> Self {
        Self {
            id: task.id,
            employee_id: task.employee_id,
            task: task.task,
            assigned_by: task.assigned_by,
            is_completed: task.is_completed,
            assigned_at: task.assigned_at,
        }
    }
}

// ── POST /tasks ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTaskRequest {
    pub employee_id: String,
    pub task: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub async fn assign_task(
    admin: AdminSession,
    State(state): State<AppState>,
    Json(body): Json<AssignTaskRequest>,
) -> Result<(StatusCode, Json<Vec<TaskResponse>>), PulseServiceError> {
    let usecase = AssignTaskUseCase {
        users: state.user_repo(),
        tasks: state.task_repo(),
    };
    let tasks = usecase
        .execute(
            AssignTaskInput {
                employee_id: body.employee_id,
                task: body.task,
                from: body.from,
                to: body.to,
                assigned_by: admin.display_name().to_owned(),
            },
            Utc::now(),
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(tasks.into_iter().map(Into::into).collect()),
    ))
}

// ── GET /users/@me/tasks ─────────────────────────────────────────────────────

pub async fn my_tasks(
    session: EmployeeSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskResponse>>, PulseServiceError> {
    let usecase = ListTasksUseCase {
        tasks: state.task_repo(),
        view: state.task_view.clone(),
    };
    let tasks = usecase.execute(&session.user.id).await?;
    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}

// ── PATCH /tasks/{id} ────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleTaskRequest {
    pub is_completed: bool,
}

pub async fn toggle_task(
    session: EmployeeSession,
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(body): Json<ToggleTaskRequest>,
) -> Result<Json<TaskResponse>, PulseServiceError> {
    let usecase = ToggleTaskUseCase {
        tasks: state.task_repo(),
        view: state.task_view.clone(),
    };
    let task = usecase
        .execute(&session.user.id, task_id, body.is_completed)
        .await?;
    Ok(Json(task.into()))
}
