//! HTTP adapter for the identity provider.

use anyhow::Context as _;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::repository::IdentityGateway;
use crate::domain::types::{Principal, Session};
use crate::error::PulseServiceError;

#[derive(Clone)]
pub struct HttpIdentityGateway {
    pub client: reqwest::Client,
    pub base_url: String,
}

impl HttpIdentityGateway {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DisplayNameBody<'a> {
    display_name: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    principal_id: String,
    email: String,
    display_name: Option<String>,
    token: String,
}

impl From<SessionResponse> for Session {
    fn from(r: SessionResponse) -> Self {
        Self {
            principal: Principal {
                id: r.principal_id,
                email: r.email,
                display_name: r.display_name.filter(|n| !n.trim().is_empty()),
            },
            token: r.token,
        }
    }
}

impl IdentityGateway for HttpIdentityGateway {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, PulseServiceError> {
        let resp = self
            .client
            .post(self.url("/identity/sessions"))
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .context("identity sign-in request")?;
        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(PulseServiceError::AuthRejected),
            StatusCode::NOT_FOUND => Err(PulseServiceError::UnknownPrincipal),
            _ => {
                let body: SessionResponse = resp
                    .error_for_status()
                    .context("identity sign-in status")?
                    .json()
                    .await
                    .context("decode identity session")?;
                Ok(body.into())
            }
        }
    }

    async fn sign_out(&self, principal_id: &str) -> Result<(), PulseServiceError> {
        self.client
            .delete(self.url(&format!("/identity/sessions/{principal_id}")))
            .send()
            .await
            .context("identity sign-out request")?
            .error_for_status()
            .context("identity sign-out status")?;
        Ok(())
    }

    async fn create_principal(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, PulseServiceError> {
        let resp = self
            .client
            .post(self.url("/identity/principals"))
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .context("identity create principal request")?;
        if resp.status() == StatusCode::CONFLICT {
            return Err(PulseServiceError::UserAlreadyExists);
        }
        let body: SessionResponse = resp
            .error_for_status()
            .context("identity create principal status")?
            .json()
            .await
            .context("decode identity principal")?;
        Ok(body.into())
    }

    async fn update_display_name(
        &self,
        principal_id: &str,
        display_name: &str,
    ) -> Result<(), PulseServiceError> {
        self.client
            .patch(self.url(&format!("/identity/principals/{principal_id}")))
            .json(&DisplayNameBody { display_name })
            .send()
            .await
            .context("identity update display name request")?
            .error_for_status()
            .context("identity update display name status")?;
        Ok(())
    }

    async fn delete_principal(&self, principal_id: &str) -> Result<(), PulseServiceError> {
        let resp = self
            .client
            .delete(self.url(&format!("/identity/principals/{principal_id}")))
            .send()
            .await
            .context("identity delete principal request")?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        resp.error_for_status()
            .context("identity delete principal status")?;
        Ok(())
    }
}
