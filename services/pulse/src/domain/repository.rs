#![allow(async_fn_in_trait)]

use uuid::Uuid;

use leadtrack_domain::pagination::PageRequest;
use leadtrack_domain::role::UserRole;

use crate::domain::types::{
    Analysis, Announcement, AssignedTask, DailyLog, FieldDefinition, Resource, Session, User,
    VisitorLog,
};
use crate::error::PulseServiceError;

/// Repository for user records.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, PulseServiceError>;

    /// Insert a new record. Fails with `UserAlreadyExists` when the id or
    /// email is taken.
    async fn create(&self, user: &User) -> Result<(), PulseServiceError>;

    /// Merge an admin record: insert it, or on id conflict update only
    /// `role`, `email` and `updated_at`. Returns the stored record.
    async fn upsert_admin(&self, user: &User) -> Result<User, PulseServiceError>;

    async fn update_name(&self, id: &str, name: &str) -> Result<(), PulseServiceError>;

    /// Users with the given role, ordered by name.
    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, PulseServiceError>;
}

/// Repository for the daily-log field definitions.
pub trait FieldRepository: Send + Sync {
    /// All definitions in creation order.
    async fn list(&self) -> Result<Vec<FieldDefinition>, PulseServiceError>;

    /// Fails with `FieldNameTaken` when another definition has the same name.
    async fn create(&self, field: &FieldDefinition) -> Result<(), PulseServiceError>;

    /// Delete a definition. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, PulseServiceError>;
}

/// Repository for submitted daily logs.
pub trait DailyLogRepository: Send + Sync {
    /// Insert a new document; used in append mode.
    async fn insert(&self, log: &DailyLog) -> Result<(), PulseServiceError>;

    /// Insert or replace the document with the same id; used in upsert mode.
    async fn upsert(&self, log: &DailyLog) -> Result<(), PulseServiceError>;

    /// At most `limit` logs of one employee, newest first: `date` desc, ties
    /// broken by `timestamp` desc.
    async fn latest(
        &self,
        employee_id: &str,
        limit: u64,
    ) -> Result<Vec<DailyLog>, PulseServiceError>;
}

/// Repository for assigned tasks.
pub trait TaskRepository: Send + Sync {
    /// Insert every task or none.
    async fn create_batch(&self, tasks: &[AssignedTask]) -> Result<(), PulseServiceError>;

    /// Tasks of one employee, most recently assigned first.
    async fn list_by_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AssignedTask>, PulseServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AssignedTask>, PulseServiceError>;

    async fn set_completed(&self, id: Uuid, is_completed: bool) -> Result<(), PulseServiceError>;
}

/// Repository for the singleton announcement.
pub trait AnnouncementRepository: Send + Sync {
    async fn latest(&self) -> Result<Option<Announcement>, PulseServiceError>;

    /// Overwrite the singleton wholesale.
    async fn put(&self, announcement: &Announcement) -> Result<(), PulseServiceError>;
}

/// Repository for the resource library.
pub trait ResourceRepository: Send + Sync {
    /// All resources in creation order.
    async fn list(&self) -> Result<Vec<Resource>, PulseServiceError>;

    async fn create(&self, resource: &Resource) -> Result<(), PulseServiceError>;

    /// Atomically insert `resources` when the library is empty. Returns
    /// `false` without writing when it already has entries.
    async fn seed_if_empty(&self, resources: &[Resource]) -> Result<bool, PulseServiceError>;

    /// Delete a resource. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, PulseServiceError>;
}

/// Repository for employee dashboard visits.
pub trait VisitorLogRepository: Send + Sync {
    async fn create(&self, visit: &VisitorLog) -> Result<(), PulseServiceError>;

    /// Visits ordered by login time desc.
    async fn list(&self, page: PageRequest) -> Result<Vec<VisitorLog>, PulseServiceError>;
}

/// Key/value runtime configuration editable by admins.
pub trait ConfigRepository: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, PulseServiceError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), PulseServiceError>;
}

/// Port to the identity provider.
pub trait IdentityGateway: Send + Sync {
    /// Fails with `AuthRejected` on bad credentials and `UnknownPrincipal`
    /// when no principal has this email.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, PulseServiceError>;

    async fn sign_out(&self, principal_id: &str) -> Result<(), PulseServiceError>;

    /// Fails with `UserAlreadyExists` when the email is taken.
    async fn create_principal(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, PulseServiceError>;

    async fn update_display_name(
        &self,
        principal_id: &str,
        display_name: &str,
    ) -> Result<(), PulseServiceError>;

    /// Removes the principal. An already missing principal is not an error.
    async fn delete_principal(&self, principal_id: &str) -> Result<(), PulseServiceError>;
}

/// Outbound mirror of submitted logs (e.g. a spreadsheet webhook).
pub trait LogMirrorPort: Send + Sync {
    async fn mirror(&self, url: &str, payload: &serde_json::Value)
    -> Result<(), PulseServiceError>;
}

/// Public "what is my IP" lookup.
pub trait IpLookupPort: Send + Sync {
    async fn lookup_ip(&self) -> Result<String, PulseServiceError>;
}

/// Generative text analysis of an employee's week.
pub trait AnalysisPort: Send + Sync {
    async fn analyze(
        &self,
        employee_name: &str,
        weekly_report: &str,
    ) -> Result<Analysis, PulseServiceError>;
}
