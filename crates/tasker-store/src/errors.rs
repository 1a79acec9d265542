//! Error types for the task store.

use thiserror::Error;

/// Errors returned by [`TaskStore`](crate::TaskStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The category is not on the whitelist. Raised before any SQL is built.
    #[error("invalid category: {0:?}")]
    InvalidCategory(String),

    /// A delete was attempted without criteria.
    #[error("safety violation: {0}")]
    SafetyViolation(String),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// A stored value could not be decoded.
    #[error("corrupt row in {table}.{column}: {detail}")]
    CorruptRow {
        table: &'static str,
        column: &'static str,
        detail: String,
    },

    #[error("IO error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_category_display() {
        let err = StoreError::InvalidCategory("blargh".into());
        assert_eq!(err.to_string(), "invalid category: \"blargh\"");
    }

    #[test]
    fn sqlite_error_from_conversion() {
        let err: StoreError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, StoreError::Sqlite(_)));
        assert!(err.to_string().contains("sqlite error"));
    }

    #[test]
    fn corrupt_row_display() {
        let err = StoreError::CorruptRow {
            table: "daily",
            column: "completed",
            detail: "expected 0 or 1, got 7".into(),
        };
        assert_eq!(
            err.to_string(),
            "corrupt row in daily.completed: expected 0 or 1, got 7"
        );
    }
}
