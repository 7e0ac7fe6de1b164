use chrono::{DateTime, Utc};
use uuid::Uuid;

use leadtrack_domain::pagination::PageRequest;

use crate::domain::repository::{IpLookupPort, VisitorLogRepository};
use crate::domain::types::{User, VisitorLog};
use crate::error::PulseServiceError;

const UNKNOWN_USER_AGENT: &str = "unknown";

pub struct VisitInput {
    /// Raw `x-forwarded-for` header value.
    pub forwarded_for: Option<String>,
    pub user_agent: Option<String>,
    pub login_time: DateTime<Utc>,
}

/// First address of an `x-forwarded-for` chain.
pub fn client_ip(forwarded_for: Option<&str>) -> Option<String> {
    forwarded_for?
        .split(',')
        .next()
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_owned)
}

// ── RecordVisit ──────────────────────────────────────────────────────────────

pub struct RecordVisitUseCase<V: VisitorLogRepository, I: IpLookupPort> {
    pub visits: V,
    pub ip_lookup: I,
}

impl<V: VisitorLogRepository, I: IpLookupPort> RecordVisitUseCase<V, I> {
    /// Best-effort: returns whether a visit was stored, never an error.
    pub async fn execute(&self, employee: &User, input: VisitInput) -> bool {
        let ip_address = match client_ip(input.forwarded_for.as_deref()) {
            Some(ip) => ip,
            None => match self.ip_lookup.lookup_ip().await {
                Ok(ip) => ip,
                Err(e) => {
                    tracing::warn!(employee_id = %employee.id, error = %e, "visitor ip lookup failed");
                    return false;
                }
            },
        };
        let visit = VisitorLog {
            id: Uuid::now_v7(),
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            employee_email: employee.email.clone(),
            login_time: input.login_time,
            ip_address,
            user_agent: input
                .user_agent
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_USER_AGENT.to_owned()),
        };
        match self.visits.create(&visit).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(employee_id = %employee.id, error = %e, "visitor log not stored");
                false
            }
        }
    }
}

// ── ListVisits ───────────────────────────────────────────────────────────────

pub struct ListVisitsUseCase<V: VisitorLogRepository> {
    pub visits: V,
}

impl<V: VisitorLogRepository> ListVisitsUseCase<V> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<VisitorLog>, PulseServiceError> {
        self.visits.list(page.clamped()).await
    }
}
