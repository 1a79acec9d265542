use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Resolved service configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskerSettings {
    /// SQLite database file.
    pub sqlite: PathBuf,
    pub host: String,
    pub port: u16,
    /// Default tracing level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for TaskerSettings {
    fn default() -> Self {
        Self {
            sqlite: PathBuf::from("./tasker.sqlite"),
            host: "0.0.0.0".into(),
            port: 8888,
            log_level: "info".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = TaskerSettings::default();
        assert_eq!(s.sqlite, PathBuf::from("./tasker.sqlite"));
        assert_eq!(s.port, 8888);
        assert_eq!(s.host, "0.0.0.0");
        assert_eq!(s.log_level, "info");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s: TaskerSettings = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(s.port, 9000);
        assert_eq!(s.sqlite, PathBuf::from("./tasker.sqlite"));
    }
}
