//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug)]
pub enum AuthError {
    MissingCredentials,
    InvalidAuthorizationFormat,
    InvalidToken,
    InvalidUserId,
    UserNotFound,
    UserLoadError,
    TokenSigningFailed,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingCredentials => (
                StatusCode::UNAUTHORIZED,
                "MISSING_CREDENTIALS",
                "Not authenticated",
            ),
            AuthError::InvalidAuthorizationFormat => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTHORIZATION",
                "Invalid authorization header format",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid or expired token",
            ),
            AuthError::InvalidUserId => (
                StatusCode::UNAUTHORIZED,
                "INVALID_USER_ID",
                "Token carries an invalid user id",
            ),
            AuthError::UserNotFound => {
                (StatusCode::UNAUTHORIZED, "USER_NOT_FOUND", "User not found")
            }
            AuthError::UserLoadError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "USER_LOAD_ERROR",
                "Failed to load user",
            ),
            AuthError::TokenSigningFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TOKEN_SIGNING_FAILED",
                "Failed to issue session token",
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<AuthError> for clubhub_common::Error {
    fn from(err: AuthError) -> Self {
        use clubhub_common::Error;
        match err {
            AuthError::UserLoadError => Error::Internal("Failed to load user".to_string()),
            AuthError::TokenSigningFailed => {
                Error::Internal("Failed to issue session token".to_string())
            }
            AuthError::MissingCredentials => Error::Authentication("Not authenticated".to_string()),
            AuthError::InvalidAuthorizationFormat => {
                Error::Authentication("Invalid authorization header format".to_string())
            }
            AuthError::InvalidToken => {
                Error::Authentication("Invalid or expired token".to_string())
            }
            AuthError::InvalidUserId => {
                Error::Authentication("Token carries an invalid user id".to_string())
            }
            AuthError::UserNotFound => Error::Authentication("User not found".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(
            AuthError::MissingCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::InvalidToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::UserNotFound.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::UserLoadError.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
