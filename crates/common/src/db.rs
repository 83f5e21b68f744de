//! Translation of storage-level constraint violations into the API
//! error taxonomy.

use crate::error::Error;

/// PostgreSQL SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Check whether a sqlx error is a unique constraint violation.
///
/// Uniqueness rules (one club per owner, one member per event) are
/// enforced by the database; the application-level checks are only a
/// fast path with a friendlier message. The authoritative rejection is
/// the constraint violation, which callers translate to `Conflict`.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code == UNIQUE_VIOLATION),
        _ => false,
    }
}

/// Translate a sqlx error into the API taxonomy, turning unique
/// violations into `Conflict` with the supplied message.
pub fn conflict_on_unique(err: sqlx::Error, message: &str) -> Error {
    if is_unique_violation(&err) {
        Error::Conflict(message.to_string())
    } else {
        Error::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn test_conflict_on_unique_passthrough() {
        let err = conflict_on_unique(sqlx::Error::RowNotFound, "dup");
        assert!(matches!(err, Error::Database(_)));
    }
}
