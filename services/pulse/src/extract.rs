//! Role-gated session extractors.
//!
//! Handlers take one of these instead of raw principal headers, so every
//! route gets the same lookup, self-heal and rejection behaviour.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use leadtrack_auth_types::identity::PrincipalHeaders;

use crate::domain::types::{Portal, Principal, User};
use crate::error::PulseServiceError;
use crate::infra::db::DbUserRepository;
use crate::infra::identity::HttpIdentityGateway;
use crate::state::AppState;
use crate::usecase::role::{
    DEFAULT_ADMIN_NAME, Entry, GuardPortalUseCase, ResolveRoleUseCase,
};

pub fn portal_guard(state: &AppState) -> GuardPortalUseCase<DbUserRepository, HttpIdentityGateway> {
    GuardPortalUseCase {
        resolver: ResolveRoleUseCase {
            repo: state.user_repo(),
            super_admin_email: state.settings.super_admin_email.clone(),
        },
        gateway: state.identity.clone(),
    }
}

async fn admit(
    state: AppState,
    principal: Option<Principal>,
    portal: Portal,
) -> Result<(User, Principal), PulseServiceError> {
    let principal = principal.ok_or(PulseServiceError::Unauthenticated)?;
    let user = portal_guard(&state)
        .execute(Some(&principal), portal, Entry::Request)
        .await?;
    Ok((user, principal))
}

/// Signed-in admin.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub user: User,
    pub principal: Principal,
}

impl AdminSession {
    /// Name recorded on things this admin creates: the identity display
    /// name, falling back to "Admin".
    pub fn display_name(&self) -> &str {
        self.principal
            .display_name
            .as_deref()
            .unwrap_or(DEFAULT_ADMIN_NAME)
    }
}

/// Signed-in employee.
#[derive(Debug, Clone)]
pub struct EmployeeSession {
    pub user: User,
}

/// Any signed-in user with a valid record.
#[derive(Debug, Clone)]
pub struct MemberSession {
    pub user: User,
}

// Headers are read synchronously and the state cloned so the returned future
// does not borrow either.

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = PulseServiceError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let principal = PrincipalHeaders::read(parts).map(Principal::from);
        let state = state.clone();
        async move {
            let (user, principal) = admit(state, principal, Portal::Admin).await?;
            Ok(Self { user, principal })
        }
    }
}

impl FromRequestParts<AppState> for EmployeeSession {
    type Rejection = PulseServiceError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let principal = PrincipalHeaders::read(parts).map(Principal::from);
        let state = state.clone();
        async move {
            let (user, _) = admit(state, principal, Portal::Employee).await?;
            Ok(Self { user })
        }
    }
}

impl FromRequestParts<AppState> for MemberSession {
    type Rejection = PulseServiceError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let principal = PrincipalHeaders::read(parts).map(Principal::from);
        let state = state.clone();
        async move {
            let (user, _) = admit(state, principal, Portal::Any).await?;
            Ok(Self { user })
        }
    }
}
