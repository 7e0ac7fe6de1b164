use std::fmt::Write as _;

use crate::domain::repository::{AnalysisPort, DailyLogRepository, UserRepository};
use crate::domain::schema::FieldSchema;
use crate::domain::types::{Analysis, DailyLog};
use crate::error::PulseServiceError;
use crate::usecase::performance::WEEKLY_WINDOW;

/// Plain-text summary of an employee's recent logs for the analysis service:
/// per-field total and daily average, then the latest notes.
pub fn weekly_report(schema: &FieldSchema, logs_chronological: &[DailyLog]) -> String {
    if logs_chronological.is_empty() {
        return "No daily logs submitted in the last week.".to_owned();
    }
    let days = logs_chronological.len();
    let mut report = format!("Daily logs submitted: {days}\n");
    for field in schema.fields() {
        let total: f64 = logs_chronological
            .iter()
            .map(|log| log.metrics.get(&field.name).copied().unwrap_or(0.0))
            .sum();
        let average = total / days as f64;
        let _ = writeln!(
            report,
            "{}: total {total}, daily average {average:.1}",
            field.label
        );
    }
    if let Some(notes) = logs_chronological.iter().rev().find_map(|l| l.notes.as_deref()) {
        let _ = writeln!(report, "Latest notes: {notes}");
    }
    report
}

pub struct AnalyzeEmployeeUseCase<U: UserRepository, L: DailyLogRepository, A: AnalysisPort> {
    pub users: U,
    pub logs: L,
    pub analysis: A,
}

impl<U: UserRepository, L: DailyLogRepository, A: AnalysisPort> AnalyzeEmployeeUseCase<U, L, A> {
    pub async fn execute(
        &self,
        schema: &FieldSchema,
        employee_id: &str,
    ) -> Result<Analysis, PulseServiceError> {
        let employee = self
            .users
            .find_by_id(employee_id)
            .await?
            .ok_or(PulseServiceError::UserNotFound)?;
        let mut logs = self.logs.latest(employee_id, WEEKLY_WINDOW).await?;
        logs.reverse();
        let report = weekly_report(schema, &logs);
        self.analysis.analyze(&employee.name, &report).await
    }
}
