use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use leadtrack_domain::role::UserRole;

use crate::domain::repository::{TaskRepository, UserRepository};
use crate::domain::types::AssignedTask;
use crate::error::PulseServiceError;
use crate::usecase::optimistic::{OptimisticView, TaskStatusView, apply_optimistic};

/// Longest date range a recurring assignment may span, in days.
pub const MAX_RECURRING_DAYS: i64 = 366;

// ── AssignTask ───────────────────────────────────────────────────────────────

pub struct AssignTaskInput {
    pub employee_id: String,
    pub task: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Name recorded as the assigner.
    pub assigned_by: String,
}

pub struct AssignTaskUseCase<U: UserRepository, T: TaskRepository> {
    pub users: U,
    pub tasks: T,
}

impl<U: UserRepository, T: TaskRepository> AssignTaskUseCase<U, T> {
    /// Assign one task now, or one task per day of `from..=to` in a single
    /// atomic batch.
    pub async fn execute(
        &self,
        input: AssignTaskInput,
        now: DateTime<Utc>,
    ) -> Result<Vec<AssignedTask>, PulseServiceError> {
        let text = input.task.trim();
        if text.is_empty() {
            return Err(PulseServiceError::InvalidTask("task text is required".into()));
        }
        let employee = self
            .users
            .find_by_id(&input.employee_id)
            .await?
            .ok_or(PulseServiceError::UserNotFound)?;
        if employee.role != UserRole::Employee {
            return Err(PulseServiceError::InvalidTask(
                "tasks can only be assigned to employees".into(),
            ));
        }

        let days = assignment_days(input.from, input.to)?;
        let new_task = |assigned_at| AssignedTask {
            id: Uuid::now_v7(),
            employee_id: employee.id.clone(),
            task: text.to_owned(),
            assigned_by: input.assigned_by.clone(),
            is_completed: false,
            assigned_at,
        };
        let batch: Vec<AssignedTask> = match days {
            None => vec![new_task(now)],
            Some(days) => days
                .into_iter()
                .map(|day| new_task(day.and_time(NaiveTime::MIN).and_utc()))
                .collect(),
        };

        self.tasks.create_batch(&batch).await?;
        tracing::info!(employee_id = %employee.id, count = batch.len(), "tasks assigned");
        Ok(batch)
    }
}

/// Expand an optional date range into its days. `None` means "no dates given".
pub fn assignment_days(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Option<Vec<NaiveDate>>, PulseServiceError> {
    let from = match (from, to) {
        (None, None) => return Ok(None),
        (None, Some(_)) => {
            return Err(PulseServiceError::InvalidTask(
                "an end date needs a start date".into(),
            ));
        }
        (Some(from), _) => from,
    };
    let to = to.unwrap_or(from);
    if from > to {
        return Err(PulseServiceError::InvalidDateRange);
    }
    if (to - from).num_days() >= MAX_RECURRING_DAYS {
        return Err(PulseServiceError::InvalidTask(format!(
            "date range cannot exceed {MAX_RECURRING_DAYS} days"
        )));
    }
    Ok(Some(from.iter_days().take_while(|d| *d <= to).collect()))
}

// ── ListTasks ────────────────────────────────────────────────────────────────

pub struct ListTasksUseCase<T: TaskRepository> {
    pub tasks: T,
    pub view: TaskStatusView,
}

impl<T: TaskRepository> ListTasksUseCase<T> {
    /// The employee's tasks as currently shown, including toggles still in
    /// flight.
    pub async fn execute(&self, employee_id: &str) -> Result<Vec<AssignedTask>, PulseServiceError> {
        let mut tasks = self.tasks.list_by_employee(employee_id).await?;
        for task in &mut tasks {
            if let Some(shown) = self.view.read(&task.id) {
                task.is_completed = shown;
            }
        }
        Ok(tasks)
    }
}

// ── ToggleTask ───────────────────────────────────────────────────────────────

pub struct ToggleTaskUseCase<T: TaskRepository> {
    pub tasks: T,
    pub view: TaskStatusView,
}

impl<T: TaskRepository> ToggleTaskUseCase<T> {
    /// Mark a task (in)complete. Only its owner may toggle it. The view
    /// shows the new state until the store settles the update; a rejected
    /// update falls back to the stored state.
    pub async fn execute(
        &self,
        employee_id: &str,
        task_id: Uuid,
        is_completed: bool,
    ) -> Result<AssignedTask, PulseServiceError> {
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(PulseServiceError::TaskNotFound)?;
        if task.employee_id != employee_id {
            return Err(PulseServiceError::Forbidden);
        }
        apply_optimistic(&self.view, task_id, is_completed, || {
            self.tasks.set_completed(task_id, is_completed)
        })
        .await?;
        task.is_completed = is_completed;
        Ok(task)
    }
}
