#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use leadtrack_domain::pagination::PageRequest;
use leadtrack_domain::role::UserRole;
use leadtrack_pulse::domain::repository::{
    AnnouncementRepository, ConfigRepository, DailyLogRepository, FieldRepository,
    IdentityGateway, IpLookupPort, LogMirrorPort, ResourceRepository, TaskRepository,
    UserRepository, VisitorLogRepository,
};
use leadtrack_pulse::domain::schema::FieldSchema;
use leadtrack_pulse::domain::types::{
    Announcement, AssignedTask, DailyLog, FieldDefinition, Principal, Resource, Session, User,
    VisitorLog, default_avatar,
};
use leadtrack_pulse::error::PulseServiceError;

pub type Shared<T> = Arc<Mutex<Vec<T>>>;

fn shared<T>(items: Vec<T>) -> Shared<T> {
    Arc::new(Mutex::new(items))
}

fn store_down() -> PulseServiceError {
    PulseServiceError::Internal(anyhow::anyhow!("store unavailable"))
}

// ── Builders ─────────────────────────────────────────────────────────────────

pub fn test_user(id: &str, role: UserRole) -> User {
    let email = format!("{id}@example.com");
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    User {
        id: id.to_owned(),
        name: id.to_owned(),
        avatar: default_avatar(&email),
        email,
        role,
        created_at: created,
        updated_at: created,
    }
}

pub fn principal_of(user: &User) -> Principal {
    Principal {
        id: user.id.clone(),
        email: user.email.clone(),
        display_name: None,
    }
}

pub fn field(name: &str) -> FieldDefinition {
    FieldDefinition {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        label: name.to_owned(),
        placeholder: "e.g. 10".to_owned(),
        created_at: Utc::now(),
    }
}

pub fn schema(names: &[&str]) -> FieldSchema {
    FieldSchema::new(names.iter().map(|n| field(n)).collect())
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    date.and_hms_opt(hour, 0, 0).unwrap().and_utc()
}

pub fn daily_log(employee_id: &str, date: NaiveDate, metrics: &[(&str, f64)]) -> DailyLog {
    DailyLog {
        id: DailyLog::daily_id(employee_id, date),
        employee_id: employee_id.to_owned(),
        date,
        timestamp: at(date, 18),
        notes: None,
        metrics: metrics
            .iter()
            .map(|(k, v)| ((*k).to_owned(), *v))
            .collect::<BTreeMap<_, _>>(),
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Shared<User>,
    pub fail: bool,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: shared(users),
            fail: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, PulseServiceError> {
        if self.fail {
            return Err(store_down());
        }
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), PulseServiceError> {
        if self.fail {
            return Err(store_down());
        }
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.id == user.id) {
            return Err(PulseServiceError::UserAlreadyExists);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn upsert_admin(&self, user: &User) -> Result<User, PulseServiceError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                existing.role = user.role;
                existing.email = user.email.clone();
                existing.updated_at = user.updated_at;
                Ok(existing.clone())
            }
            None => {
                users.push(user.clone());
                Ok(user.clone())
            }
        }
    }

    async fn update_name(&self, id: &str, name: &str) -> Result<(), PulseServiceError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(PulseServiceError::UserNotFound)?;
        user.name = name.to_owned();
        Ok(())
    }

    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, PulseServiceError> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }
}

// ── MockFieldRepo ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockFieldRepo {
    pub fields: Shared<FieldDefinition>,
}

impl MockFieldRepo {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self {
            fields: shared(fields),
        }
    }
}

impl FieldRepository for MockFieldRepo {
    async fn list(&self) -> Result<Vec<FieldDefinition>, PulseServiceError> {
        Ok(self.fields.lock().unwrap().clone())
    }

    async fn create(&self, field: &FieldDefinition) -> Result<(), PulseServiceError> {
        let mut fields = self.fields.lock().unwrap();
        if fields.iter().any(|f| f.name == field.name) {
            return Err(PulseServiceError::FieldNameTaken(field.name.clone()));
        }
        fields.push(field.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, PulseServiceError> {
        let mut fields = self.fields.lock().unwrap();
        let before = fields.len();
        fields.retain(|f| f.id != id);
        Ok(fields.len() < before)
    }
}

// ── MockDailyLogRepo ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockDailyLogRepo {
    pub logs: Shared<DailyLog>,
}

impl MockDailyLogRepo {
    pub fn new(logs: Vec<DailyLog>) -> Self {
        Self { logs: shared(logs) }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl DailyLogRepository for MockDailyLogRepo {
    async fn insert(&self, log: &DailyLog) -> Result<(), PulseServiceError> {
        self.logs.lock().unwrap().push(log.clone());
        Ok(())
    }

    async fn upsert(&self, log: &DailyLog) -> Result<(), PulseServiceError> {
        let mut logs = self.logs.lock().unwrap();
        logs.retain(|l| l.id != log.id);
        logs.push(log.clone());
        Ok(())
    }

    async fn latest(
        &self,
        employee_id: &str,
        limit: u64,
    ) -> Result<Vec<DailyLog>, PulseServiceError> {
        let mut logs: Vec<DailyLog> = self
            .logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.employee_id == employee_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date).then(b.timestamp.cmp(&a.timestamp)));
        logs.truncate(limit as usize);
        Ok(logs)
    }
}

// ── MockTaskRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockTaskRepo {
    pub tasks: Shared<AssignedTask>,
    pub fail_updates: bool,
    /// Writes of this completion state wait before landing.
    pub slow_writes: Option<(bool, Duration)>,
}

impl MockTaskRepo {
    pub fn new(tasks: Vec<AssignedTask>) -> Self {
        Self {
            tasks: shared(tasks),
            fail_updates: false,
            slow_writes: None,
        }
    }

    pub fn failing_updates(tasks: Vec<AssignedTask>) -> Self {
        Self {
            fail_updates: true,
            ..Self::new(tasks)
        }
    }

    pub fn slow_when(mut self, is_completed: bool, delay: Duration) -> Self {
        self.slow_writes = Some((is_completed, delay));
        self
    }
}

impl TaskRepository for MockTaskRepo {
    async fn create_batch(&self, tasks: &[AssignedTask]) -> Result<(), PulseServiceError> {
        self.tasks.lock().unwrap().extend(tasks.iter().cloned());
        Ok(())
    }

    async fn list_by_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AssignedTask>, PulseServiceError> {
        let mut tasks: Vec<AssignedTask> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.employee_id == employee_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.assigned_at.cmp(&a.assigned_at));
        Ok(tasks)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AssignedTask>, PulseServiceError> {
        Ok(self.tasks.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn set_completed(&self, id: Uuid, is_completed: bool) -> Result<(), PulseServiceError> {
        if self.fail_updates {
            return Err(PulseServiceError::store_write(anyhow::anyhow!("write rejected")));
        }
        if let Some((_, delay)) = self.slow_writes.filter(|(slow, _)| *slow == is_completed) {
            tokio::time::sleep(delay).await;
        }
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(PulseServiceError::TaskNotFound)?;
        task.is_completed = is_completed;
        Ok(())
    }
}

// ── MockAnnouncementRepo ─────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockAnnouncementRepo {
    pub latest: Arc<Mutex<Option<Announcement>>>,
}

impl AnnouncementRepository for MockAnnouncementRepo {
    async fn latest(&self) -> Result<Option<Announcement>, PulseServiceError> {
        Ok(self.latest.lock().unwrap().clone())
    }

    async fn put(&self, announcement: &Announcement) -> Result<(), PulseServiceError> {
        *self.latest.lock().unwrap() = Some(announcement.clone());
        Ok(())
    }
}

// ── MockResourceRepo ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockResourceRepo {
    pub resources: Shared<Resource>,
}

impl MockResourceRepo {
    pub fn empty() -> Self {
        Self {
            resources: shared(vec![]),
        }
    }
}

impl ResourceRepository for MockResourceRepo {
    async fn list(&self) -> Result<Vec<Resource>, PulseServiceError> {
        let mut resources = self.resources.lock().unwrap().clone();
        resources.sort_by_key(|r| r.created_at);
        Ok(resources)
    }

    async fn create(&self, resource: &Resource) -> Result<(), PulseServiceError> {
        self.resources.lock().unwrap().push(resource.clone());
        Ok(())
    }

    async fn seed_if_empty(&self, resources: &[Resource]) -> Result<bool, PulseServiceError> {
        let mut stored = self.resources.lock().unwrap();
        if !stored.is_empty() {
            return Ok(false);
        }
        stored.extend(resources.iter().cloned());
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, PulseServiceError> {
        let mut resources = self.resources.lock().unwrap();
        let before = resources.len();
        resources.retain(|r| r.id != id);
        Ok(resources.len() < before)
    }
}

// ── MockVisitorLogRepo ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockVisitorLogRepo {
    pub visits: Shared<VisitorLog>,
}

impl MockVisitorLogRepo {
    pub fn empty() -> Self {
        Self {
            visits: shared(vec![]),
        }
    }
}

impl VisitorLogRepository for MockVisitorLogRepo {
    async fn create(&self, visit: &VisitorLog) -> Result<(), PulseServiceError> {
        self.visits.lock().unwrap().push(visit.clone());
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<VisitorLog>, PulseServiceError> {
        let mut visits = self.visits.lock().unwrap().clone();
        visits.sort_by(|a, b| b.login_time.cmp(&a.login_time));
        Ok(visits
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }
}

// ── MockConfigRepo ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockConfigRepo {
    pub values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MockConfigRepo {
    pub fn with(key: &str, value: &str) -> Self {
        let repo = Self::default();
        repo.values
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        repo
    }
}

impl ConfigRepository for MockConfigRepo {
    async fn get(&self, key: &str) -> Result<Option<String>, PulseServiceError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PulseServiceError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// ── MockGateway ──────────────────────────────────────────────────────────────

/// Identity provider holding `(principal, password)` pairs.
#[derive(Clone, Default)]
pub struct MockGateway {
    pub principals: Shared<(Principal, String)>,
    pub signed_out: Shared<String>,
    pub display_names: Shared<(String, String)>,
}

impl MockGateway {
    pub fn with_principal(principal: Principal, password: &str) -> Self {
        let gateway = Self::default();
        gateway
            .principals
            .lock()
            .unwrap()
            .push((principal, password.to_owned()));
        gateway
    }

    pub fn signed_out(&self) -> Vec<String> {
        self.signed_out.lock().unwrap().clone()
    }
}

fn session_for(principal: &Principal) -> Session {
    Session {
        principal: principal.clone(),
        token: format!("token-{}", principal.id),
    }
}

impl IdentityGateway for MockGateway {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, PulseServiceError> {
        let principals = self.principals.lock().unwrap();
        let (principal, expected) = principals
            .iter()
            .find(|(p, _)| p.email == email)
            .ok_or(PulseServiceError::UnknownPrincipal)?;
        if expected != password {
            return Err(PulseServiceError::AuthRejected);
        }
        Ok(session_for(principal))
    }

    async fn sign_out(&self, principal_id: &str) -> Result<(), PulseServiceError> {
        self.signed_out.lock().unwrap().push(principal_id.to_owned());
        Ok(())
    }

    async fn create_principal(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, PulseServiceError> {
        let mut principals = self.principals.lock().unwrap();
        if principals.iter().any(|(p, _)| p.email == email) {
            return Err(PulseServiceError::UserAlreadyExists);
        }
        let principal = Principal {
            id: format!("uid-{}", principals.len() + 1),
            email: email.to_owned(),
            display_name: None,
        };
        principals.push((principal.clone(), password.to_owned()));
        Ok(session_for(&principal))
    }

    async fn update_display_name(
        &self,
        principal_id: &str,
        display_name: &str,
    ) -> Result<(), PulseServiceError> {
        self.display_names
            .lock()
            .unwrap()
            .push((principal_id.to_owned(), display_name.to_owned()));
        Ok(())
    }

    async fn delete_principal(&self, principal_id: &str) -> Result<(), PulseServiceError> {
        self.principals
            .lock()
            .unwrap()
            .retain(|(p, _)| p.id != principal_id);
        Ok(())
    }
}

// ── Outbound ports ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockMirror {
    pub sent: Shared<(String, serde_json::Value)>,
    pub fail: bool,
}

impl LogMirrorPort for MockMirror {
    async fn mirror(&self, url: &str, payload: &serde_json::Value) -> Result<(), PulseServiceError> {
        if self.fail {
            return Err(PulseServiceError::Internal(anyhow::anyhow!("webhook down")));
        }
        self.sent
            .lock()
            .unwrap()
            .push((url.to_owned(), payload.clone()));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockIpLookup {
    pub ip: Option<String>,
    pub calls: Arc<Mutex<usize>>,
}

impl MockIpLookup {
    pub fn returning(ip: &str) -> Self {
        Self {
            ip: Some(ip.to_owned()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl IpLookupPort for MockIpLookup {
    async fn lookup_ip(&self) -> Result<String, PulseServiceError> {
        *self.calls.lock().unwrap() += 1;
        self.ip
            .clone()
            .ok_or_else(|| PulseServiceError::Internal(anyhow::anyhow!("lookup failed")))
    }
}
