use std::cmp::Ordering;

use futures::future::try_join_all;

use crate::domain::repository::DailyLogRepository;
use crate::domain::schema::{FieldSchema, MetricCell, WeeklyPoint};
use crate::domain::types::User;
use crate::error::PulseServiceError;

/// Number of most recent logs in a weekly series.
pub const WEEKLY_WINDOW: u64 = 7;

/// Latest known value of every field for one employee.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRow {
    pub employee: User,
    /// One cell per schema field, in schema order.
    pub cells: Vec<MetricCell>,
}

// ── LatestPerformance ────────────────────────────────────────────────────────

pub struct LatestPerformanceUseCase<L: DailyLogRepository> {
    pub repo: L,
}

impl<L: DailyLogRepository> LatestPerformanceUseCase<L> {
    /// Fetch every employee's latest log concurrently and build one row each.
    pub async fn execute(
        &self,
        schema: &FieldSchema,
        employees: Vec<User>,
    ) -> Result<Vec<PerformanceRow>, PulseServiceError> {
        latest_rows(&self.repo, schema, employees).await
    }
}

async fn latest_rows<L: DailyLogRepository>(
    repo: &L,
    schema: &FieldSchema,
    employees: Vec<User>,
) -> Result<Vec<PerformanceRow>, PulseServiceError> {
    let latest = try_join_all(employees.iter().map(|e| repo.latest(&e.id, 1))).await?;
    Ok(employees
        .into_iter()
        .zip(latest)
        .map(|(employee, logs)| PerformanceRow {
            cells: schema.latest_cells(logs.first()),
            employee,
        })
        .collect())
}

// ── WeeklySeries ─────────────────────────────────────────────────────────────

pub struct WeeklySeriesUseCase<L: DailyLogRepository> {
    pub repo: L,
}

impl<L: DailyLogRepository> WeeklySeriesUseCase<L> {
    /// The most recent logs of one employee in chronological order.
    pub async fn execute(
        &self,
        schema: &FieldSchema,
        employee_id: &str,
    ) -> Result<Vec<WeeklyPoint>, PulseServiceError> {
        let mut logs = self.repo.latest(employee_id, WEEKLY_WINDOW).await?;
        logs.reverse();
        Ok(logs.iter().map(|log| schema.weekly_point(log)).collect())
    }

    pub async fn execute_all(
        &self,
        schema: &FieldSchema,
        employees: Vec<User>,
    ) -> Result<Vec<(User, Vec<WeeklyPoint>)>, PulseServiceError> {
        let series = try_join_all(employees.iter().map(|e| self.execute(schema, &e.id))).await?;
        Ok(employees.into_iter().zip(series).collect())
    }
}

// ── Leaderboard ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub employee: User,
    pub value: MetricCell,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    /// Field the board is ranked by; `None` when the schema is empty.
    pub field: Option<String>,
    pub entries: Vec<LeaderboardEntry>,
}

/// Ranks employees by the latest value of one field.
pub struct LeaderboardUseCase<L: DailyLogRepository> {
    pub repo: L,
}

impl<L: DailyLogRepository> LeaderboardUseCase<L> {
    /// Rank by `field` (default: the last field in schema order), highest
    /// first, `N/A` last. Equal values keep the order of `employees`.
    pub async fn execute(
        &self,
        schema: &FieldSchema,
        employees: Vec<User>,
        field: Option<&str>,
    ) -> Result<Leaderboard, PulseServiceError> {
        let field = match field {
            Some(name) => Some(name),
            None => schema.fields().last().map(|f| f.name.as_str()),
        };
        let Some(field) = field else {
            return Ok(Leaderboard {
                field: None,
                entries: Vec::new(),
            });
        };
        let column = schema
            .names()
            .position(|name| name == field)
            .ok_or_else(|| PulseServiceError::InvalidField(format!("unknown field: {field}")))?;

        let rows = latest_rows(&self.repo, schema, employees).await?;
        Ok(Leaderboard {
            field: Some(field.to_owned()),
            entries: rank_by_column(rows, column),
        })
    }
}

fn rank_by_column(rows: Vec<PerformanceRow>, column: usize) -> Vec<LeaderboardEntry> {
    let mut scored: Vec<(User, MetricCell)> = rows
        .into_iter()
        .map(|row| {
            let value = row
                .cells
                .get(column)
                .copied()
                .unwrap_or(MetricCell::NotAvailable);
            (row.employee, value)
        })
        .collect();
    scored.sort_by(|(_, a), (_, b)| match (a.value(), b.value()) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    scored
        .into_iter()
        .enumerate()
        .map(|(i, (employee, value))| LeaderboardEntry {
            rank: i + 1,
            employee,
            value,
        })
        .collect()
}
