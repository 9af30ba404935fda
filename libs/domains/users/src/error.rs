use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Failures reported by the user directory.
///
/// Every variant is detected before the table is touched, so a failed call
/// never leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    /// A business rule rejected the request (blank name, bad email, unknown role)
    #[error("{0}")]
    InvalidInput(String),

    /// Another user already holds this email (compared ignoring case)
    #[error("Email already in use: {0}")]
    Conflict(String),

    #[error("User not found: {0}")]
    NotFound(i64),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidInput(msg) => AppError::UnprocessableEntity(msg),
            UserError::Conflict(_) => AppError::Conflict(err.to_string()),
            UserError::NotFound(_) => AppError::NotFound(err.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (
                UserError::InvalidInput("Invalid email".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (UserError::Conflict("a@ex.com".into()), StatusCode::CONFLICT),
            (UserError::NotFound(7), StatusCode::NOT_FOUND),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            UserError::InvalidInput("Name cannot be blank".into()).to_string(),
            "Name cannot be blank"
        );
        assert_eq!(
            UserError::Conflict("a@ex.com".into()).to_string(),
            "Email already in use: a@ex.com"
        );
        assert_eq!(UserError::NotFound(999).to_string(), "User not found: 999");
    }
}
