use std::collections::BTreeMap;

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::schema::WeeklyPoint;
use crate::domain::types::DailyLog;
use crate::error::PulseServiceError;
use crate::extract::{EmployeeSession, MemberSession};
use crate::handlers::field::load_schema;
use crate::state::AppState;
use crate::usecase::daily_log::{
    MirrorDailyLogUseCase, SubmitDailyLogInput, SubmitDailyLogUseCase,
};
use crate::usecase::performance::WeeklySeriesUseCase;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogResponse {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    #[serde(serialize_with = "leadtrack_core::serde::to_rfc3339_ms")]
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub metrics: BTreeMap<String, f64>,
}

impl From<DailyLog> for DailyLogResponse {
    fn from(log: DailyLog) -> Self {
        Self {
            id: log.id,
            employee_id: log.employee_id,
            date: log.date,
            timestamp: log.timestamp,
            notes: log.notes,
            metrics: log.metrics,
        }
    }
}

#[derive(Serialize)]
pub struct WeeklyPointResponse {
    pub date: NaiveDate,
    pub day: String,
    pub values: BTreeMap<String, f64>,
}

impl From<WeeklyPoint> for WeeklyPointResponse {
    fn from(point: WeeklyPoint) -> Self {
        Self {
            date: point.date,
            day: point.day,
            values: point.values,
        }
    }
}

// ── POST /logs ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SubmitDailyLogRequest {
    #[serde(default)]
    pub values: Map<String, Value>,
    pub notes: Option<String>,
}

pub async fn submit_daily_log(
    session: EmployeeSession,
    State(state): State<AppState>,
    Json(body): Json<SubmitDailyLogRequest>,
) -> Result<(StatusCode, Json<DailyLogResponse>), PulseServiceError> {
    let schema = load_schema(&state).await?;
    let usecase = SubmitDailyLogUseCase {
        repo: state.daily_log_repo(),
        mode: state.settings.daily_log_mode,
    };
    let log = usecase
        .execute(
            &schema,
            SubmitDailyLogInput {
                employee_id: session.user.id.clone(),
                date: Local::now().date_naive(),
                timestamp: Utc::now(),
                values: body.values,
                notes: body.notes,
            },
        )
        .await?;

    let mirror = MirrorDailyLogUseCase {
        config: state.config_repo(),
        mirror: state.log_mirror(),
    };
    let mirrored = log.clone();
    tokio::spawn(async move {
        mirror.execute(&mirrored, &session.user).await;
    });

    Ok((StatusCode::CREATED, Json(log.into())))
}

// ── GET /users/@me/logs/weekly ───────────────────────────────────────────────

pub async fn my_weekly_series(
    session: MemberSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<WeeklyPointResponse>>, PulseServiceError> {
    let schema = load_schema(&state).await?;
    let usecase = WeeklySeriesUseCase {
        repo: state.daily_log_repo(),
    };
    let points = usecase.execute(&schema, &session.user.id).await?;
    Ok(Json(points.into_iter().map(Into::into).collect()))
}
