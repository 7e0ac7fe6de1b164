use crate::domain::repository::{IdentityGateway, UserRepository};
use crate::domain::types::{Portal, Session, User};
use crate::error::PulseServiceError;
use crate::usecase::role::{DEFAULT_ADMIN_NAME, Entry, GuardPortalUseCase, is_super_admin};

// ── SignIn ───────────────────────────────────────────────────────────────────

pub struct SignInInput {
    pub email: String,
    pub password: String,
    pub portal: Portal,
}

#[derive(Debug)]
pub struct SignedIn {
    pub user: User,
    pub token: String,
}

pub struct SignInUseCase<R: UserRepository, G: IdentityGateway> {
    pub guard: GuardPortalUseCase<R, G>,
}

impl<R: UserRepository, G: IdentityGateway> SignInUseCase<R, G> {
    pub async fn execute(&self, input: SignInInput) -> Result<SignedIn, PulseServiceError> {
        let email = input.email.trim();
        if email.is_empty() || input.password.is_empty() {
            return Err(PulseServiceError::MissingData);
        }

        let session = match self.guard.gateway.sign_in(email, &input.password).await {
            Ok(session) => session,
            Err(PulseServiceError::UnknownPrincipal)
                if input.portal == Portal::Admin && self.is_super_admin(email) =>
            {
                self.bootstrap_super_admin(email, &input.password).await?
            }
            Err(e) => return Err(e),
        };

        let user = self
            .guard
            .execute(Some(&session.principal), input.portal, Entry::SignIn)
            .await?;
        tracing::info!(user_id = %user.id, role = %user.role, "signed in");
        Ok(SignedIn {
            user,
            token: session.token,
        })
    }

    fn is_super_admin(&self, email: &str) -> bool {
        is_super_admin(self.guard.resolver.super_admin_email.as_deref(), email)
    }

    /// First admin-portal sign-in of the super-admin: create the principal
    /// and name it. The guard then heals the record.
    async fn bootstrap_super_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, PulseServiceError> {
        let mut session = self.guard.gateway.create_principal(email, password).await?;
        self.guard
            .gateway
            .update_display_name(&session.principal.id, DEFAULT_ADMIN_NAME)
            .await?;
        session.principal.display_name = Some(DEFAULT_ADMIN_NAME.to_owned());
        tracing::info!(principal_id = %session.principal.id, "super-admin principal bootstrapped");
        Ok(session)
    }
}

// ── SignOut ──────────────────────────────────────────────────────────────────

pub struct SignOutUseCase<G: IdentityGateway> {
    pub gateway: G,
}

impl<G: IdentityGateway> SignOutUseCase<G> {
    pub async fn execute(&self, principal_id: &str) -> Result<(), PulseServiceError> {
        self.gateway.sign_out(principal_id).await
    }
}
