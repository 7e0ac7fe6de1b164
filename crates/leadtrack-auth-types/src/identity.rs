//! Gateway-injected principal headers extractor.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::StatusCode;
use http::request::Parts;

pub const PRINCIPAL_ID_HEADER: &str = "x-leadtrack-principal-id";
pub const PRINCIPAL_EMAIL_HEADER: &str = "x-leadtrack-principal-email";
pub const PRINCIPAL_NAME_HEADER: &str = "x-leadtrack-principal-name";

/// Authenticated principal injected by the identity gateway.
///
/// `x-leadtrack-principal-id` and `x-leadtrack-principal-email` are required;
/// `x-leadtrack-principal-name` carries the optional display name.
///
/// Extracting `PrincipalHeaders` directly returns 401 when the principal is
/// absent. Extract `Option<PrincipalHeaders>` where "nobody signed in" is a
/// valid state rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalHeaders {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl PrincipalHeaders {
    /// Read the principal from request headers. Blank values count as absent.
    pub fn read(parts: &Parts) -> Option<Self> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };
        Some(Self {
            id: header(PRINCIPAL_ID_HEADER)?,
            email: header(PRINCIPAL_EMAIL_HEADER)?,
            display_name: header(PRINCIPAL_NAME_HEADER),
        })
    }
}

impl<S> FromRequestParts<S> for PrincipalHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Values are read synchronously and moved into a 'static future so the
    // returned future does not borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let principal = Self::read(parts);
        async move { principal.ok_or(StatusCode::UNAUTHORIZED) }
    }
}

impl<S> OptionalFromRequestParts<S> for PrincipalHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let principal = Self::read(parts);
        async move { Ok(principal) }
    }
}
