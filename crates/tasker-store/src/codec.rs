//! The one valid encoding of `completed` at rest: `false` is 0, `true` is 1.

use crate::errors::{Result, StoreError};

pub fn encode_completed(completed: bool) -> i64 {
    i64::from(completed)
}

/// Decode a stored flag. Any value other than 0 or 1 is a corrupt row.
pub fn decode_completed(raw: i64, table: &'static str) -> Result<bool> {
    match raw {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StoreError::CorruptRow {
            table,
            column: "completed",
            detail: format!("expected 0 or 1, got {other}"),
        }),
    }
}
