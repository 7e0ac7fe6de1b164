use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use leadtrack_auth_types::identity::PrincipalHeaders;
use leadtrack_domain::role::UserRole;

/// Authenticated identity issued by the identity gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl From<PrincipalHeaders> for Principal {
    fn from(headers: PrincipalHeaders) -> Self {
        Self {
            id: headers.id,
            email: headers.email,
            display_name: headers.display_name,
        }
    }
}

/// A principal plus the session token the gateway issued on sign-in.
#[derive(Debug, Clone)]
pub struct Session {
    pub principal: Principal,
    pub token: String,
}

/// The application's own profile/role record, keyed by principal id.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Placeholder avatar derived from the email, used when a record is created
/// without one.
pub fn default_avatar(email: &str) -> String {
    format!("https://picsum.photos/seed/{email}/100/100")
}

/// Outcome of classifying a principal.
#[derive(Debug, Clone, PartialEq)]
pub enum RoleResolution {
    Unauthenticated,
    Employee(User),
    Admin(User),
    Inconsistent,
}

/// Login surface a principal is entering through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Portal {
    Employee,
    Admin,
    #[default]
    Any,
}

impl Portal {
    pub fn admits(self, role: UserRole) -> bool {
        match self {
            Self::Employee => role == UserRole::Employee,
            Self::Admin => role == UserRole::Admin,
            Self::Any => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub id: Uuid,
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub created_at: DateTime<Utc>,
}

/// One employee's reported metrics for one date.
///
/// `metrics` keeps every key it was written with, including keys whose field
/// definition has since been removed.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyLog {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
    pub metrics: BTreeMap<String, f64>,
}

impl DailyLog {
    /// Deterministic document id used when logs are upserted per day.
    pub fn daily_id(employee_id: &str, date: NaiveDate) -> String {
        format!("{employee_id}_{}", date.format("%Y-%m-%d"))
    }
}

/// How resubmissions on the same day are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DailyLogMode {
    /// One document per employee per day, keyed `{employeeId}_{date}`.
    #[default]
    Upsert,
    /// A fresh document per submission.
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown daily log mode: {0}")]
pub struct UnknownDailyLogMode(pub String);

impl FromStr for DailyLogMode {
    type Err = UnknownDailyLogMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upsert" => Ok(Self::Upsert),
            "append" => Ok(Self::Append),
            other => Err(UnknownDailyLogMode(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedTask {
    pub id: Uuid,
    pub employee_id: String,
    pub task: String,
    pub assigned_by: String,
    pub is_completed: bool,
    pub assigned_at: DateTime<Utc>,
}

/// Singleton broadcast message; overwritten on every broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub message: String,
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: Uuid,
    pub category: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGroup {
    pub category: String,
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorLog {
    pub id: Uuid,
    pub employee_id: String,
    pub employee_name: String,
    pub employee_email: String,
    pub login_time: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
}

/// Free-text result of the generative analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub analysis: String,
    pub suggestions: String,
}
