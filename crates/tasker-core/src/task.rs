use serde::{Deserialize, Serialize};

/// A persisted task. `id` is only meaningful together with the category
/// the task was read from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub last_updated: String,
    pub name: String,
    pub completed: bool,
}

/// A task that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub last_updated: String,
    pub name: String,
    pub completed: bool,
}

impl NewTask {
    pub fn new(name: impl Into<String>, completed: bool, last_updated: impl Into<String>) -> Self {
        Self {
            last_updated: last_updated.into(),
            name: name.into(),
            completed,
        }
    }

    /// Attach the store-assigned id.
    pub fn with_id(self, id: i64) -> Task {
        Task {
            id,
            last_updated: self.last_updated,
            name: self.name,
            completed: self.completed,
        }
    }
}
