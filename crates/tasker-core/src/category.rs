use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of task groupings.
///
/// Each category owns exactly one storage table. The table name is a
/// `&'static str` baked in here, so nothing a caller sends can ever end up
/// in an identifier position of a SQL statement.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Daily,
    Weekly,
    LongTerm,
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown category: {0:?}")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 3] = [Category::Daily, Category::Weekly, Category::LongTerm];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::LongTerm => "longterm",
        }
    }

    /// Name of the table holding this category's rows.
    pub fn table_name(self) -> &'static str {
        self.as_str()
    }

    /// Exact, case-sensitive whitelist lookup.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }

    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_some()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}
