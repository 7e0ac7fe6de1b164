use chrono::Utc;

use leadtrack_domain::role::UserRole;

use crate::domain::repository::{IdentityGateway, UserRepository};
use crate::domain::types::{User, default_avatar};
use crate::error::PulseServiceError;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_NAME_LEN: usize = 80;

fn validate_email(email: &str) -> bool {
    let mut parts = email.split('@');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
    )
}

fn validate_name(name: &str) -> Result<String, PulseServiceError> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(PulseServiceError::InvalidUser(format!(
            "name must be 1-{MAX_NAME_LEN} characters"
        )));
    }
    Ok(name.to_owned())
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub name: Option<String>,
}

/// Creates the principal at the identity provider, then its user record.
/// A principal whose record cannot be written is removed again.
pub struct CreateUserUseCase<R: UserRepository, G: IdentityGateway> {
    pub repo: R,
    pub gateway: G,
}

impl<R: UserRepository, G: IdentityGateway> CreateUserUseCase<R, G> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, PulseServiceError> {
        let email = input.email.trim().to_owned();
        if !validate_email(&email) {
            return Err(PulseServiceError::InvalidUser("invalid email".into()));
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(PulseServiceError::InvalidUser(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let name = match input.name.as_deref() {
            Some(name) => validate_name(name)?,
            None => email.split('@').next().unwrap_or_default().to_owned(),
        };

        let session = self.gateway.create_principal(&email, &input.password).await?;
        if let Err(e) = self
            .gateway
            .update_display_name(&session.principal.id, &name)
            .await
        {
            tracing::warn!(principal_id = %session.principal.id, error = %e, "display name not set");
        }

        let now = Utc::now();
        let user = User {
            id: session.principal.id,
            name,
            avatar: default_avatar(&email),
            email,
            role: input.role,
            created_at: now,
            updated_at: now,
        };
        if let Err(e) = self.repo.create(&user).await {
            if let Err(cleanup) = self.gateway.delete_principal(&user.id).await {
                tracing::error!(principal_id = %user.id, error = %cleanup, "principal left without a record");
            }
            return Err(e);
        }
        tracing::info!(user_id = %user.id, role = %user.role, "user created");
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: &str) -> Result<User, PulseServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(PulseServiceError::UserNotFound)
    }
}

// ── ListEmployees ────────────────────────────────────────────────────────────

pub struct ListEmployeesUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListEmployeesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, PulseServiceError> {
        self.repo.list_by_role(UserRole::Employee).await
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<R: UserRepository, G: IdentityGateway> {
    pub repo: R,
    pub gateway: G,
}

impl<R: UserRepository, G: IdentityGateway> UpdateProfileUseCase<R, G> {
    /// Rename the user. The record is authoritative; the identity provider's
    /// display name follows on a best-effort basis.
    pub async fn execute(&self, user_id: &str, name: &str) -> Result<String, PulseServiceError> {
        let name = validate_name(name)?;
        self.repo.update_name(user_id, &name).await?;
        if let Err(e) = self.gateway.update_display_name(user_id, &name).await {
            tracing::warn!(user_id, error = %e, "display name not synced");
        }
        Ok(name)
    }
}
