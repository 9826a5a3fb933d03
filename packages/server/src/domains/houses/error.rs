use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Constraints whose unique violation means "this (house, user) pair is already active".
const ACTIVE_PAIR_CONSTRAINTS: &[&str] = &[
    "house_memberships_active_pair_idx",
    "house_memberships_activation_seq_key",
];

/// Every failure a house operation can report to its caller.
#[derive(Error, Debug)]
pub enum HouseError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User already belongs to this house")]
    DuplicateMembership,

    #[error("User does not belong to this house")]
    NotAMember,

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Tagged error payload handed to front ends.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
}

impl HouseError {
    /// Stable tag for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            HouseError::Validation(_) => "validation_error",
            HouseError::Unauthorized(_) => "unauthorized",
            HouseError::NotFound(_) => "not_found",
            HouseError::UserNotFound(_) => "user_not_found",
            HouseError::DuplicateMembership => "duplicate_membership",
            HouseError::NotAMember => "not_a_member",
            HouseError::OperationFailed(_) => "operation_failed",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            kind: self.kind(),
            message: self.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        HouseError::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        HouseError::Unauthorized(message.into())
    }
}

impl From<sqlx::Error> for HouseError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => HouseError::NotFound("record not found".to_string()),
            sqlx::Error::Database(db_err)
                if db_err.is_unique_violation()
                    && db_err
                        .constraint()
                        .is_some_and(|c| ACTIVE_PAIR_CONSTRAINTS.contains(&c)) =>
            {
                HouseError::DuplicateMembership
            }
            _ => {
                error!(error = %err, "Database operation failed");
                HouseError::OperationFailed(format!("database error: {}", err))
            }
        }
    }
}
