use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::domain::schema::{FieldSchema, MetricCell};
use crate::error::PulseServiceError;
use crate::extract::AdminSession;
use crate::handlers::daily_log::WeeklyPointResponse;
use crate::handlers::field::{FieldResponse, load_schema, schema_response};
use crate::handlers::stream::watch_snapshots;
use crate::handlers::user::UserResponse;
use crate::infra::feed::Collection;
use crate::state::AppState;
use crate::usecase::performance::{
    LatestPerformanceUseCase, LeaderboardUseCase, PerformanceRow, WeeklySeriesUseCase,
};
use crate::usecase::user::ListEmployeesUseCase;

#[derive(Serialize)]
pub struct PerformanceRowResponse {
    pub employee: UserResponse,
    pub cells: Vec<MetricCell>,
}

impl From<PerformanceRow> for PerformanceRowResponse {
    fn from(row: PerformanceRow) -> Self {
        Self {
            employee: row.employee.into(),
            cells: row.cells,
        }
    }
}

#[derive(Serialize)]
pub struct PerformanceTableResponse {
    pub fields: Vec<FieldResponse>,
    pub rows: Vec<PerformanceRowResponse>,
}

async fn latest_rows(
    state: &AppState,
    schema: &FieldSchema,
) -> Result<Vec<PerformanceRow>, PulseServiceError> {
    let employees = ListEmployeesUseCase {
        repo: state.user_repo(),
    }
    .execute()
    .await?;
    LatestPerformanceUseCase {
        repo: state.daily_log_repo(),
    }
    .execute(schema, employees)
    .await
}

async fn performance_table(state: &AppState) -> Result<PerformanceTableResponse, PulseServiceError> {
    let schema = load_schema(state).await?;
    let rows = latest_rows(state, &schema).await?;
    Ok(PerformanceTableResponse {
        fields: schema_response(&schema),
        rows: rows.into_iter().map(Into::into).collect(),
    })
}

// ── GET /performance ─────────────────────────────────────────────────────────

pub async fn latest_performance(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<PerformanceTableResponse>, PulseServiceError> {
    Ok(Json(performance_table(&state).await?))
}

// ── GET /performance/stream ──────────────────────────────────────────────────

pub async fn stream_performance(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let feed = state.feed.clone();
    let watched = [
        Collection::Users,
        Collection::TaskFields,
        Collection::DailyLogs,
    ];
    watch_snapshots(&feed, &watched, move || {
        let state = state.clone();
        async move { performance_table(&state).await }
    })
}

// ── GET /performance/weekly ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EmployeeSeriesResponse {
    pub employee: UserResponse,
    pub points: Vec<WeeklyPointResponse>,
}

pub async fn weekly_performance(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeSeriesResponse>>, PulseServiceError> {
    let schema = load_schema(&state).await?;
    let employees = ListEmployeesUseCase {
        repo: state.user_repo(),
    }
    .execute()
    .await?;
    let series = WeeklySeriesUseCase {
        repo: state.daily_log_repo(),
    }
    .execute_all(&schema, employees)
    .await?;
    Ok(Json(
        series
            .into_iter()
            .map(|(employee, points)| EmployeeSeriesResponse {
                employee: employee.into(),
                points: points.into_iter().map(Into::into).collect(),
            })
            .collect(),
    ))
}

// ── GET /performance/leaderboard ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    pub field: Option<String>,
}

#[derive(Serialize)]
pub struct LeaderboardEntryResponse {
    pub rank: usize,
    pub employee: UserResponse,
    pub value: MetricCell,
}

#[derive(Serialize)]
pub struct LeaderboardResponse {
    pub field: Option<String>,
    pub entries: Vec<LeaderboardEntryResponse>,
}

pub async fn leaderboard(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, PulseServiceError> {
    let schema = load_schema(&state).await?;
    let employees = ListEmployeesUseCase {
        repo: state.user_repo(),
    }
    .execute()
    .await?;
    let board = LeaderboardUseCase {
        repo: state.daily_log_repo(),
    }
    .execute(&schema, employees, query.field.as_deref())
    .await?;
    Ok(Json(LeaderboardResponse {
        field: board.field,
        entries: board
            .entries
            .into_iter()
            .map(|entry| LeaderboardEntryResponse {
                rank: entry.rank,
                employee: entry.employee.into(),
                value: entry.value,
            })
            .collect(),
    }))
}
