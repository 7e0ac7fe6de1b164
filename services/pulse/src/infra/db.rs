use std::collections::BTreeMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use leadtrack_domain::pagination::PageRequest;
use leadtrack_domain::role::UserRole;
use leadtrack_pulse_schema::{
    announcements, app_config, daily_logs, resources, task_fields, tasks, users, visitor_logs,
};

use crate::domain::repository::{
    AnnouncementRepository, ConfigRepository, DailyLogRepository, FieldRepository,
    ResourceRepository, TaskRepository, UserRepository, VisitorLogRepository,
};
use crate::domain::types::{
    Announcement, AssignedTask, DailyLog, FieldDefinition, Resource, User, VisitorLog,
};
use crate::error::PulseServiceError;
use crate::infra::feed::{ChangeFeed, Collection};

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn write_failed(err: DbErr, what: &'static str) -> PulseServiceError {
    PulseServiceError::store_write(anyhow::Error::new(err).context(what))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
    pub feed: ChangeFeed,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, PulseServiceError> {
        let model = users::Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), PulseServiceError> {
        user_active_model(user)
            .insert(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    PulseServiceError::UserAlreadyExists
                } else {
                    write_failed(e, "create user")
                }
            })?;
        self.feed.publish(Collection::Users);
        Ok(())
    }

    async fn upsert_admin(&self, user: &User) -> Result<User, PulseServiceError> {
        users::Entity::insert(user_active_model(user))
            .on_conflict(
                OnConflict::column(users::Column::Id)
                    .update_columns([
                        users::Column::Role,
                        users::Column::Email,
                        users::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| write_failed(e, "upsert admin user"))?;
        self.feed.publish(Collection::Users);
        self.find_by_id(&user.id)
            .await?
            .context("admin record missing after upsert")
            .map_err(PulseServiceError::Internal)
    }

    async fn update_name(&self, id: &str, name: &str) -> Result<(), PulseServiceError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::Name, Expr::value(name))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| write_failed(e, "update user name"))?;
        if result.rows_affected == 0 {
            return Err(PulseServiceError::UserNotFound);
        }
        self.feed.publish(Collection::Users);
        Ok(())
    }

    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, PulseServiceError> {
        users::Entity::find()
            .filter(users::Column::Role.eq(role.as_str()))
            .order_by_asc(users::Column::Name)
            .all(&self.db)
            .await
            .context("list users by role")?
            .into_iter()
            .map(user_from_model)
            .collect()
    }
}

fn user_active_model(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id.clone()),
        name: Set(user.name.clone()),
        email: Set(user.email.clone()),
        role: Set(user.role.as_str().to_owned()),
        avatar: Set(user.avatar.clone()),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }
}

fn user_from_model(model: users::Model) -> Result<User, PulseServiceError> {
    let role = model
        .role
        .parse::<UserRole>()
        .with_context(|| format!("user {} has an invalid role", model.id))?;
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        role,
        avatar: model.avatar,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Field repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFieldRepository {
    pub db: DatabaseConnection,
    pub feed: ChangeFeed,
}

impl FieldRepository for DbFieldRepository {
    async fn list(&self) -> Result<Vec<FieldDefinition>, PulseServiceError> {
        let models = task_fields::Entity::find()
            .order_by_asc(task_fields::Column::CreatedAt)
            .order_by_asc(task_fields::Column::Id)
            .all(&self.db)
            .await
            .context("list task fields")?;
        Ok(models
            .into_iter()
            .map(|m| FieldDefinition {
                id: m.id,
                name: m.name,
                label: m.label,
                placeholder: m.placeholder,
                created_at: m.created_at,
            })
            .collect())
    }

    async fn create(&self, field: &FieldDefinition) -> Result<(), PulseServiceError> {
        task_fields::ActiveModel {
            id: Set(field.id),
            name: Set(field.name.clone()),
            label: Set(field.label.clone()),
            placeholder: Set(field.placeholder.clone()),
            created_at: Set(field.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                PulseServiceError::FieldNameTaken(field.name.clone())
            } else {
                write_failed(e, "create task field")
            }
        })?;
        self.feed.publish(Collection::TaskFields);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, PulseServiceError> {
        let result = task_fields::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_failed(e, "delete task field"))?;
        let deleted = result.rows_affected > 0;
        if deleted {
            self.feed.publish(Collection::TaskFields);
        }
        Ok(deleted)
    }
}

// ── Daily log repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDailyLogRepository {
    pub db: DatabaseConnection,
    pub feed: ChangeFeed,
}

impl DailyLogRepository for DbDailyLogRepository {
    async fn insert(&self, log: &DailyLog) -> Result<(), PulseServiceError> {
        daily_log_active_model(log)?
            .insert(&self.db)
            .await
            .map_err(|e| write_failed(e, "insert daily log"))?;
        self.feed.publish(Collection::DailyLogs);
        Ok(())
    }

    async fn upsert(&self, log: &DailyLog) -> Result<(), PulseServiceError> {
        daily_logs::Entity::insert(daily_log_active_model(log)?)
            .on_conflict(
                OnConflict::column(daily_logs::Column::Id)
                    .update_columns([
                        daily_logs::Column::Date,
                        daily_logs::Column::Timestamp,
                        daily_logs::Column::Notes,
                        daily_logs::Column::Metrics,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| write_failed(e, "upsert daily log"))?;
        self.feed.publish(Collection::DailyLogs);
        Ok(())
    }

    async fn latest(
        &self,
        employee_id: &str,
        limit: u64,
    ) -> Result<Vec<DailyLog>, PulseServiceError> {
        let models = daily_logs::Entity::find()
            .filter(daily_logs::Column::EmployeeId.eq(employee_id))
            .order_by_desc(daily_logs::Column::Date)
            .order_by_desc(daily_logs::Column::Timestamp)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list latest daily logs")?;
        Ok(models.into_iter().map(daily_log_from_model).collect())
    }
}

fn daily_log_active_model(log: &DailyLog) -> Result<daily_logs::ActiveModel, PulseServiceError> {
    let metrics = serde_json::to_value(&log.metrics).context("encode daily log metrics")?;
    Ok(daily_logs::ActiveModel {
        id: Set(log.id.clone()),
        employee_id: Set(log.employee_id.clone()),
        date: Set(log.date),
        timestamp: Set(log.timestamp),
        notes: Set(log.notes.clone()),
        metrics: Set(metrics),
    })
}

fn daily_log_from_model(model: daily_logs::Model) -> DailyLog {
    // Non-numeric values can only come from outside this service; skip them.
    let metrics: BTreeMap<String, f64> = model
        .metrics
        .as_object()
        .map(|obj| {
            obj.iter()
                .filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
                .collect()
        })
        .unwrap_or_default();
    DailyLog {
        id: model.id,
        employee_id: model.employee_id,
        date: model.date,
        timestamp: model.timestamp,
        notes: model.notes,
        metrics,
    }
}

// ── Task repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTaskRepository {
    pub db: DatabaseConnection,
    pub feed: ChangeFeed,
}

impl TaskRepository for DbTaskRepository {
    async fn create_batch(&self, batch: &[AssignedTask]) -> Result<(), PulseServiceError> {
        if batch.is_empty() {
            return Ok(());
        }
        let models = batch.iter().map(|t| tasks::ActiveModel {
            id: Set(t.id),
            employee_id: Set(t.employee_id.clone()),
            task: Set(t.task.clone()),
            assigned_by: Set(t.assigned_by.clone()),
            is_completed: Set(t.is_completed),
            assigned_at: Set(t.assigned_at),
        });
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| write_failed(e, "begin task batch"))?;
        tasks::Entity::insert_many(models)
            .exec(&txn)
            .await
            .map_err(|e| write_failed(e, "insert task batch"))?;
        txn.commit()
            .await
            .map_err(|e| write_failed(e, "commit task batch"))?;
        self.feed.publish(Collection::Tasks);
        Ok(())
    }

    async fn list_by_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AssignedTask>, PulseServiceError> {
        let models = tasks::Entity::find()
            .filter(tasks::Column::EmployeeId.eq(employee_id))
            .order_by_desc(tasks::Column::AssignedAt)
            .all(&self.db)
            .await
            .context("list tasks by employee")?;
        Ok(models.into_iter().map(task_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AssignedTask>, PulseServiceError> {
        let model = tasks::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find task by id")?;
        Ok(model.map(task_from_model))
    }

    async fn set_completed(&self, id: Uuid, is_completed: bool) -> Result<(), PulseServiceError> {
        let result = tasks::Entity::update_many()
            .col_expr(tasks::Column::IsCompleted, Expr::value(is_completed))
            .filter(tasks::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| write_failed(e, "update task completion"))?;
        if result.rows_affected == 0 {
            return Err(PulseServiceError::TaskNotFound);
        }
        self.feed.publish(Collection::Tasks);
        Ok(())
    }
}

fn task_from_model(model: tasks::Model) -> AssignedTask {
    AssignedTask {
        id: model.id,
        employee_id: model.employee_id,
        task: model.task,
        assigned_by: model.assigned_by,
        is_completed: model.is_completed,
        assigned_at: model.assigned_at,
    }
}

// ── Announcement repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAnnouncementRepository {
    pub db: DatabaseConnection,
    pub feed: ChangeFeed,
}

impl AnnouncementRepository for DbAnnouncementRepository {
    async fn latest(&self) -> Result<Option<Announcement>, PulseServiceError> {
        let model = announcements::Entity::find_by_id(announcements::LATEST.to_owned())
            .one(&self.db)
            .await
            .context("find latest announcement")?;
        Ok(model.map(|m| Announcement {
            message: m.message,
            updated_at: m.updated_at,
            updated_by: m.updated_by,
        }))
    }

    async fn put(&self, announcement: &Announcement) -> Result<(), PulseServiceError> {
        announcements::Entity::insert(announcements::ActiveModel {
            id: Set(announcements::LATEST.to_owned()),
            message: Set(announcement.message.clone()),
            updated_at: Set(announcement.updated_at),
            updated_by: Set(announcement.updated_by.clone()),
        })
        .on_conflict(
            OnConflict::column(announcements::Column::Id)
                .update_columns([
                    announcements::Column::Message,
                    announcements::Column::UpdatedAt,
                    announcements::Column::UpdatedBy,
                ])
                .to_owned(),
        )
        .exec(&self.db)
        .await
        .map_err(|e| write_failed(e, "put announcement"))?;
        self.feed.publish(Collection::Announcements);
        Ok(())
    }
}

// ── Resource repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbResourceRepository {
    pub db: DatabaseConnection,
    pub feed: ChangeFeed,
}

impl ResourceRepository for DbResourceRepository {
    async fn list(&self) -> Result<Vec<Resource>, PulseServiceError> {
        let models = resources::Entity::find()
            .order_by_asc(resources::Column::CreatedAt)
            .order_by_asc(resources::Column::Id)
            .all(&self.db)
            .await
            .context("list resources")?;
        Ok(models.into_iter().map(resource_from_model).collect())
    }

    async fn create(&self, resource: &Resource) -> Result<(), PulseServiceError> {
        resource_active_model(resource)
            .insert(&self.db)
            .await
            .map_err(|e| write_failed(e, "create resource"))?;
        self.feed.publish(Collection::Resources);
        Ok(())
    }

    async fn seed_if_empty(&self, seed: &[Resource]) -> Result<bool, PulseServiceError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| write_failed(e, "begin resource seed"))?;
        let existing = resources::Entity::find()
            .count(&txn)
            .await
            .context("count resources")?;
        if existing > 0 || seed.is_empty() {
            return Ok(false);
        }
        resources::Entity::insert_many(seed.iter().map(resource_active_model))
            .exec(&txn)
            .await
            .map_err(|e| write_failed(e, "insert resource seed"))?;
        txn.commit()
            .await
            .map_err(|e| write_failed(e, "commit resource seed"))?;
        self.feed.publish(Collection::Resources);
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, PulseServiceError> {
        let result = resources::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_failed(e, "delete resource"))?;
        let deleted = result.rows_affected > 0;
        if deleted {
            self.feed.publish(Collection::Resources);
        }
        Ok(deleted)
    }
}

fn resource_active_model(resource: &Resource) -> resources::ActiveModel {
    resources::ActiveModel {
        id: Set(resource.id),
        category: Set(resource.category.clone()),
        title: Set(resource.title.clone()),
        content: Set(resource.content.clone()),
        created_at: Set(resource.created_at),
    }
}

fn resource_from_model(model: resources::Model) -> Resource {
    Resource {
        id: model.id,
        category: model.category,
        title: model.title,
        content: model.content,
        created_at: model.created_at,
    }
}

// ── Visitor log repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVisitorLogRepository {
    pub db: DatabaseConnection,
    pub feed: ChangeFeed,
}

impl VisitorLogRepository for DbVisitorLogRepository {
    async fn create(&self, visit: &VisitorLog) -> Result<(), PulseServiceError> {
        visitor_logs::ActiveModel {
            id: Set(visit.id),
            employee_id: Set(visit.employee_id.clone()),
            employee_name: Set(visit.employee_name.clone()),
            employee_email: Set(visit.employee_email.clone()),
            login_time: Set(visit.login_time),
            ip_address: Set(visit.ip_address.clone()),
            user_agent: Set(visit.user_agent.clone()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_failed(e, "create visitor log"))?;
        self.feed.publish(Collection::VisitorLogs);
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<VisitorLog>, PulseServiceError> {
        let models = visitor_logs::Entity::find()
            .order_by_desc(visitor_logs::Column::LoginTime)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list visitor logs")?;
        Ok(models
            .into_iter()
            .map(|m| VisitorLog {
                id: m.id,
                employee_id: m.employee_id,
                employee_name: m.employee_name,
                employee_email: m.employee_email,
                login_time: m.login_time,
                ip_address: m.ip_address,
                user_agent: m.user_agent,
            })
            .collect())
    }
}

// ── Config repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbConfigRepository {
    pub db: DatabaseConnection,
    pub feed: ChangeFeed,
}

impl ConfigRepository for DbConfigRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, PulseServiceError> {
        let model = app_config::Entity::find_by_id(key.to_owned())
            .one(&self.db)
            .await
            .context("find app config")?;
        Ok(model.map(|m| m.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PulseServiceError> {
        app_config::Entity::insert(app_config::ActiveModel {
            key: Set(key.to_owned()),
            value: Set(value.to_owned()),
            updated_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(app_config::Column::Key)
                .update_columns([app_config::Column::Value, app_config::Column::UpdatedAt])
                .to_owned(),
        )
        .exec(&self.db)
        .await
        .map_err(|e| write_failed(e, "set app config"))?;
        self.feed.publish(Collection::AppConfig);
        Ok(())
    }
}
