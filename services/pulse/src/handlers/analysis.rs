use axum::{
    Json,
    extract::{Path, State},
};

use crate::domain::types::Analysis;
use crate::error::PulseServiceError;
use crate::extract::AdminSession;
use crate::handlers::field::load_schema;
use crate::state::AppState;
use crate::usecase::analysis::AnalyzeEmployeeUseCase;

// ── POST /employees/{id}/analysis ────────────────────────────────────────────

pub async fn analyze_employee(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<Json<Analysis>, PulseServiceError> {
    let schema = load_schema(&state).await?;
    let usecase = AnalyzeEmployeeUseCase {
        users: state.user_repo(),
        logs: state.daily_log_repo(),
        analysis: state.analysis(),
    };
    Ok(Json(usecase.execute(&schema, &employee_id).await?))
}
