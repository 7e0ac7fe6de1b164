use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Pulse service error variants.
#[derive(Debug, thiserror::Error)]
pub enum PulseServiceError {
    #[error("not signed in")]
    Unauthenticated,
    #[error("invalid credentials")]
    AuthRejected,
    // Rendered exactly like `AuthRejected` so sign-in never reveals which
    // emails have an account.
    #[error("invalid credentials")]
    UnknownPrincipal,
    #[error("access denied for this portal")]
    AuthorizationMismatch,
    #[error("no user record for this principal")]
    RecordInconsistent,
    #[error("forbidden")]
    Forbidden,
    #[error("invalid field: {0}")]
    InvalidField(String),
    #[error("field name already in use: {0}")]
    FieldNameTaken(String),
    #[error("field not found")]
    FieldNotFound,
    #[error("invalid task: {0}")]
    InvalidTask(String),
    #[error("start date cannot be after end date")]
    InvalidDateRange,
    #[error("task not found")]
    TaskNotFound,
    #[error("announcement message cannot be empty")]
    EmptyAnnouncement,
    #[error("announcement not found")]
    AnnouncementNotFound,
    #[error("invalid resource: {0}")]
    InvalidResource(String),
    #[error("resource not found")]
    ResourceNotFound,
    #[error("webhook url must be an absolute http(s) url")]
    InvalidWebhookUrl,
    #[error("user not found")]
    UserNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("invalid user: {0}")]
    InvalidUser(String),
    #[error("missing data")]
    MissingData,
    #[error("analysis service unavailable")]
    AnalysisUnavailable,
    #[error("store write failed")]
    StoreWrite(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PulseServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::AuthRejected | Self::UnknownPrincipal => "AUTH_REJECTED",
            Self::AuthorizationMismatch => "AUTHORIZATION_MISMATCH",
            Self::RecordInconsistent => "RECORD_INCONSISTENT",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidField(_) => "INVALID_FIELD",
            Self::FieldNameTaken(_) => "FIELD_NAME_TAKEN",
            Self::FieldNotFound => "FIELD_NOT_FOUND",
            Self::InvalidTask(_) => "INVALID_TASK",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::EmptyAnnouncement => "EMPTY_ANNOUNCEMENT",
            Self::AnnouncementNotFound => "ANNOUNCEMENT_NOT_FOUND",
            Self::InvalidResource(_) => "INVALID_RESOURCE",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::InvalidWebhookUrl => "INVALID_WEBHOOK_URL",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::InvalidUser(_) => "INVALID_USER",
            Self::MissingData => "MISSING_DATA",
            Self::AnalysisUnavailable => "ANALYSIS_UNAVAILABLE",
            Self::StoreWrite(_) => "STORE_WRITE_FAILURE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Wrap a failed write so callers can tell it apart from read failures.
    pub fn store_write(error: impl Into<anyhow::Error>) -> Self {
        Self::StoreWrite(error.into())
    }
}

impl IntoResponse for PulseServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unauthenticated
            | Self::AuthRejected
            | Self::UnknownPrincipal
            | Self::RecordInconsistent => StatusCode::UNAUTHORIZED,
            Self::AuthorizationMismatch | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::FieldNotFound
            | Self::TaskNotFound
            | Self::AnnouncementNotFound
            | Self::ResourceNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::FieldNameTaken(_) | Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::InvalidField(_)
            | Self::InvalidTask(_)
            | Self::InvalidDateRange
            | Self::EmptyAnnouncement
            | Self::InvalidResource(_)
            | Self::InvalidWebhookUrl
            | Self::InvalidUser(_)
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::AnalysisUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::StoreWrite(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &self {
            Self::StoreWrite(e) | Self::Internal(e) => {
                tracing::error!(error = format!("{e:#}"), kind = self.kind(), "request failed");
            }
            Self::AuthorizationMismatch | Self::RecordInconsistent => {
                tracing::warn!(kind = self.kind(), "principal rejected");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
