use chrono::Utc;

use leadtrack_domain::role::UserRole;

use crate::domain::repository::{IdentityGateway, UserRepository};
use crate::domain::types::{Portal, Principal, RoleResolution, User, default_avatar};
use crate::error::PulseServiceError;

/// Name given to a self-healed super-admin record without a display name.
pub const DEFAULT_ADMIN_NAME: &str = "Admin";

/// Case-insensitive, whitespace-tolerant match against the configured
/// super-admin email. Always `false` when none is configured.
pub fn is_super_admin(configured: Option<&str>, email: &str) -> bool {
    configured.is_some_and(|c| {
        let c = c.trim();
        !c.is_empty() && c.eq_ignore_ascii_case(email.trim())
    })
}

// ── ResolveRole ──────────────────────────────────────────────────────────────

/// Classifies a principal as employee or admin, self-healing the
/// super-admin record. Never fails: a store failure resolves to
/// `Inconsistent`.
pub struct ResolveRoleUseCase<R: UserRepository> {
    pub repo: R,
    pub super_admin_email: Option<String>,
}

impl<R: UserRepository> ResolveRoleUseCase<R> {
    pub async fn execute(&self, principal: Option<&Principal>) -> RoleResolution {
        let Some(principal) = principal else {
            return RoleResolution::Unauthenticated;
        };

        let record = match self.repo.find_by_id(&principal.id).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(principal_id = %principal.id, error = %e, "user lookup failed");
                return RoleResolution::Inconsistent;
            }
        };

        let super_admin = is_super_admin(self.super_admin_email.as_deref(), &principal.email);
        match record {
            Some(user) if user.role == UserRole::Admin => RoleResolution::Admin(user),
            Some(_) | None if super_admin => match self.self_heal(principal).await {
                Ok(user) => RoleResolution::Admin(user),
                Err(e) => {
                    tracing::warn!(principal_id = %principal.id, error = %e, "super-admin self-heal failed");
                    RoleResolution::Inconsistent
                }
            },
            Some(user) => RoleResolution::Employee(user),
            None => RoleResolution::Inconsistent,
        }
    }

    /// Merge an admin record for `principal`. Idempotent: repeated calls keep
    /// one record with the same id.
    pub async fn self_heal(&self, principal: &Principal) -> Result<User, PulseServiceError> {
        let now = Utc::now();
        let user = User {
            id: principal.id.clone(),
            name: principal
                .display_name
                .clone()
                .unwrap_or_else(|| DEFAULT_ADMIN_NAME.to_owned()),
            email: principal.email.clone(),
            role: UserRole::Admin,
            avatar: default_avatar(&principal.email),
            created_at: now,
            updated_at: now,
        };
        let user = self.repo.upsert_admin(&user).await?;
        tracing::info!(principal_id = %principal.id, "super-admin record healed");
        Ok(user)
    }
}

// ── GuardPortal ──────────────────────────────────────────────────────────────

/// Where the principal is entering from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// A login surface: a role that does not fit the portal is signed out.
    SignIn,
    /// An API call: a role that does not fit is refused but stays signed in.
    Request,
}

pub struct GuardPortalUseCase<R: UserRepository, G: IdentityGateway> {
    pub resolver: ResolveRoleUseCase<R>,
    pub gateway: G,
}

impl<R: UserRepository, G: IdentityGateway> GuardPortalUseCase<R, G> {
    /// Admit `principal` into `portal`, or reject it.
    ///
    /// A principal without a usable record is always signed out. A role that
    /// does not match the portal is signed out only on `Entry::SignIn`.
    pub async fn execute(
        &self,
        principal: Option<&Principal>,
        portal: Portal,
        entry: Entry,
    ) -> Result<User, PulseServiceError> {
        let Some(principal) = principal else {
            return Err(PulseServiceError::Unauthenticated);
        };
        match self.resolver.execute(Some(principal)).await {
            RoleResolution::Unauthenticated => Err(PulseServiceError::Unauthenticated),
            RoleResolution::Inconsistent => {
                self.sign_out(principal).await;
                Err(PulseServiceError::RecordInconsistent)
            }
            RoleResolution::Admin(user) | RoleResolution::Employee(user) => {
                if portal.admits(user.role) {
                    return Ok(user);
                }
                match entry {
                    Entry::SignIn => {
                        self.sign_out(principal).await;
                        Err(PulseServiceError::AuthorizationMismatch)
                    }
                    Entry::Request => Err(PulseServiceError::Forbidden),
                }
            }
        }
    }

    async fn sign_out(&self, principal: &Principal) {
        if let Err(e) = self.gateway.sign_out(&principal.id).await {
            tracing::warn!(principal_id = %principal.id, error = %e, "sign-out failed");
        }
    }
}
