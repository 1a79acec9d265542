//! Conjunctive deletion criteria.

use std::ops::Deref;

use rusqlite::types::Value;

use crate::codec::encode_completed;
use crate::errors::StoreError;

/// One `field = value` constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Criterion {
    Id(i64),
    LastUpdated(String),
    Name(String),
    Completed(bool),
}

impl Criterion {
    /// Column addressed by this criterion. The `id` pseudo-field maps to
    /// SQLite's native `rowid`.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id(_) => "rowid",
            Self::LastUpdated(_) => "lastUpdated",
            Self::Name(_) => "name",
            Self::Completed(_) => "completed",
        }
    }

    /// Value to bind, with `completed` run through the codec.
    pub fn to_sql_value(&self) -> Value {
        match self {
            Self::Id(id) => Value::Integer(*id),
            Self::LastUpdated(s) | Self::Name(s) => Value::Text(s.clone()),
            Self::Completed(flag) => Value::Integer(encode_completed(*flag)),
        }
    }
}

/// An ordered, never-empty list of criteria, all of which must match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Criteria(Vec<Criterion>);

impl Criteria {
    pub fn new(first: Criterion) -> Self {
        Self(vec![first])
    }

    pub fn by_id(id: i64) -> Self {
        Self::new(Criterion::Id(id))
    }

    pub fn completed(flag: bool) -> Self {
        Self::new(Criterion::Completed(flag))
    }

    #[must_use]
    pub fn and(mut self, next: Criterion) -> Self {
        self.0.push(next);
        self
    }
}

impl Deref for Criteria {
    type Target = [Criterion];

    fn deref(&self) -> &[Criterion] {
        &self.0
    }
}

impl TryFrom<Vec<Criterion>> for Criteria {
    type Error = StoreError;

    fn try_from(items: Vec<Criterion>) -> Result<Self, Self::Error> {
        if items.is_empty() {
            return Err(StoreError::SafetyViolation(
                "delete criteria must not be empty".into(),
            ));
        }
        Ok(Self(items))
    }
}

/// Build `col1 = ?1 AND col2 = ?2 ...` plus its bound values.
pub(crate) fn where_clause(criteria: &[Criterion]) -> (String, Vec<Value>) {
    let clause = criteria
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ?{}", c.column(), i + 1))
        .collect::<Vec<_>>()
        .join(" AND ");
    let values = criteria.iter().map(Criterion::to_sql_value).collect();
    (clause, values)
}
