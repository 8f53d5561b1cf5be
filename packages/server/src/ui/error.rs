//! Mapping of use case errors to HTTP responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};

use crate::{
    infrastructure::dto::http::ErrorResponseDto,
    usecase::{
        AuthError, GetUserError, ListMessagesError, LoginError, PostMessageError, RegisterError,
        RoomQueryError,
    },
};

/// Error returned by HTTP handlers, rendered as `{"detail": "..."}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    /// Rendered with `WWW-Authenticate: Bearer`
    Unauthorized(String),
    NotFound(String),
    Unprocessable(String),
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Self::BadRequest(detail)
            | Self::Unauthorized(detail)
            | Self::NotFound(detail)
            | Self::Unprocessable(detail) => detail,
            Self::Internal => "Internal server error",
        }
    }

    pub fn credentials() -> Self {
        Self::Unauthorized("Could not validate credentials".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponseDto {
            detail: self.detail().to_string(),
        });
        let mut response = (self.status(), body).into_response();
        if matches!(self, Self::Unauthorized(_)) {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}

impl From<RegisterError> for ApiError {
    fn from(e: RegisterError) -> Self {
        match e {
            RegisterError::InvalidInput(e) => Self::Unprocessable(e.to_string()),
            RegisterError::UsernameTaken => Self::BadRequest(e.to_string()),
            RegisterError::Hashing(e) => {
                tracing::error!(error = %e, "Failed to hash password");
                Self::Internal
            }
            RegisterError::Repository(e) => {
                tracing::error!(error = %e, "Failed to register user");
                Self::Internal
            }
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(e: LoginError) -> Self {
        match e {
            LoginError::InvalidCredentials => Self::Unauthorized(e.to_string()),
            LoginError::Hashing(e) => {
                tracing::error!(error = %e, "Failed to verify password");
                Self::Internal
            }
            LoginError::TokenIssue(e) => {
                tracing::error!(error = %e, "Failed to issue access token");
                Self::Internal
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        tracing::debug!(error = ?e, "Rejected credentials");
        Self::credentials()
    }
}

impl From<RoomQueryError> for ApiError {
    fn from(e: RoomQueryError) -> Self {
        Self::NotFound(e.to_string())
    }
}

impl From<PostMessageError> for ApiError {
    fn from(e: PostMessageError) -> Self {
        match e {
            PostMessageError::InvalidInput(e) => Self::Unprocessable(e.to_string()),
            PostMessageError::RoomNotFound => Self::NotFound(e.to_string()),
            PostMessageError::Repository(e) => {
                tracing::error!(error = %e, "Failed to store message");
                Self::Internal
            }
        }
    }
}

impl From<ListMessagesError> for ApiError {
    fn from(e: ListMessagesError) -> Self {
        Self::NotFound(e.to_string())
    }
}

impl From<GetUserError> for ApiError {
    fn from(e: GetUserError) -> Self {
        Self::NotFound(e.to_string())
    }
}
