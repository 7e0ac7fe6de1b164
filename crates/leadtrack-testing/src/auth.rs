//! Mock principal helpers for integration tests.
//!
//! Services behind the gateway receive `x-leadtrack-principal-*` headers
//! injected by the gateway. In tests, `MockPrincipal` produces those headers
//! directly so no identity provider is needed.

use http::{HeaderMap, HeaderName, HeaderValue};
use leadtrack_auth_types::identity::{
    PRINCIPAL_EMAIL_HEADER, PRINCIPAL_ID_HEADER, PRINCIPAL_NAME_HEADER,
};
use uuid::Uuid;

/// Configurable identity injected into test requests.
#[derive(Debug, Clone)]
pub struct MockPrincipal {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl MockPrincipal {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: None,
        }
    }

    /// A principal with a fresh random id.
    pub fn random(email: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), email)
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Header pairs, convenient for request builders that take `(name, value)`.
    pub fn header_pairs(&self) -> Vec<(HeaderName, HeaderValue)> {
        let mut pairs = vec![
            (
                HeaderName::from_static(PRINCIPAL_ID_HEADER),
                HeaderValue::from_str(&self.id).unwrap(),
            ),
            (
                HeaderName::from_static(PRINCIPAL_EMAIL_HEADER),
                HeaderValue::from_str(&self.email).unwrap(),
            ),
        ];
        if let Some(name) = &self.display_name {
            pairs.push((
                HeaderName::from_static(PRINCIPAL_NAME_HEADER),
                HeaderValue::from_str(name).unwrap(),
            ));
        }
        pairs
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        self.header_pairs().into_iter().collect()
    }
}
