use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use leadtrack_pulse_schema::app_config::SHEET_WEBHOOK_URL;

use crate::domain::repository::{ConfigRepository, DailyLogRepository, LogMirrorPort};
use crate::domain::schema::FieldSchema;
use crate::domain::types::{DailyLog, DailyLogMode, User};
use crate::error::PulseServiceError;

// ── SubmitDailyLog ───────────────────────────────────────────────────────────

pub struct SubmitDailyLogInput {
    pub employee_id: String,
    /// Calendar day the log is for, `yyyy-MM-dd` on the wire.
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub values: Map<String, Value>,
    pub notes: Option<String>,
}

pub struct SubmitDailyLogUseCase<L: DailyLogRepository> {
    pub repo: L,
    pub mode: DailyLogMode,
}

impl<L: DailyLogRepository> SubmitDailyLogUseCase<L> {
    /// Coerce the values against `schema` and persist the log.
    pub async fn execute(
        &self,
        schema: &FieldSchema,
        input: SubmitDailyLogInput,
    ) -> Result<DailyLog, PulseServiceError> {
        let id = match self.mode {
            DailyLogMode::Upsert => DailyLog::daily_id(&input.employee_id, input.date),
            DailyLogMode::Append => Uuid::now_v7().to_string(),
        };
        let log = DailyLog {
            id,
            employee_id: input.employee_id,
            date: input.date,
            timestamp: input.timestamp,
            notes: input
                .notes
                .map(|n| n.trim().to_owned())
                .filter(|n| !n.is_empty()),
            metrics: schema.coerce(&input.values),
        };
        match self.mode {
            DailyLogMode::Upsert => self.repo.upsert(&log).await?,
            DailyLogMode::Append => self.repo.insert(&log).await?,
        }
        tracing::info!(log_id = %log.id, employee_id = %log.employee_id, "daily log submitted");
        Ok(log)
    }
}

// ── MirrorDailyLog ───────────────────────────────────────────────────────────

/// Flat JSON of a log as sent to the mirror: the metrics sit next to the
/// log's own keys (which win on a name clash), plus the employee's name and
/// email.
pub fn mirror_payload(log: &DailyLog, employee: &User) -> Value {
    let mut payload = Map::new();
    for (name, value) in &log.metrics {
        payload.insert(name.clone(), json!(value));
    }
    payload.insert("id".into(), json!(log.id));
    payload.insert("employeeId".into(), json!(log.employee_id));
    payload.insert(
        "date".into(),
        json!(log.date.format("%Y-%m-%d").to_string()),
    );
    payload.insert(
        "timestamp".into(),
        json!(log.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    if let Some(notes) = &log.notes {
        payload.insert("notes".into(), json!(notes));
    }
    payload.insert("employeeName".into(), json!(employee.name));
    payload.insert("employeeEmail".into(), json!(employee.email));
    Value::Object(payload)
}

/// Fire-and-forget mirror of a stored log to the configured webhook.
pub struct MirrorDailyLogUseCase<C: ConfigRepository, M: LogMirrorPort> {
    pub config: C,
    pub mirror: M,
}

impl<C: ConfigRepository, M: LogMirrorPort> MirrorDailyLogUseCase<C, M> {
    /// Returns whether the log was sent. Failures are logged, never returned.
    pub async fn execute(&self, log: &DailyLog, employee: &User) -> bool {
        let url = match self.config.get(SHEET_WEBHOOK_URL).await {
            Ok(Some(url)) => url,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!(log_id = %log.id, error = %e, "webhook config unreadable");
                return false;
            }
        };
        match self.mirror.mirror(&url, &mirror_payload(log, employee)).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(log_id = %log.id, error = %e, "webhook mirror failed");
                false
            }
        }
    }
}
