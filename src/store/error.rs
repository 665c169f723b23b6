//! Store error types
//!
//! Defines all errors that can occur in the persistence layer.

use thiserror::Error;

/// Errors that can occur in the store
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite returned an error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Requested event does not exist
    #[error("Event not found: {0}")]
    EventNotFound(String),

    /// Requested member does not exist
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    /// A member with this email is already registered
    #[error("Member already exists: {0}")]
    DuplicateMember(String),
}

impl StoreError {
    /// True if the underlying SQLite error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::Database(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::EventNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Event not found: abc");

        let err = StoreError::DuplicateMember("ada@example.com".to_string());
        assert_eq!(err.to_string(), "Member already exists: ada@example.com");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let store_err: StoreError = io_err.into();
        assert!(matches!(store_err, StoreError::Io(_)));
        assert!(!store_err.is_constraint_violation());
    }
}
