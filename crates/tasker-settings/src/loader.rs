//! Settings loading.
//!
//! Loading flow:
//! 1. Start with [`TaskerSettings::default()`]
//! 2. If the config file exists, merge its top-level keys over the defaults
//!    (`null` values are skipped)
//! 3. Apply environment variable overrides

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{Result, SettingsError};
use crate::types::TaskerSettings;

/// Load settings from `path`, then apply overrides from the process
/// environment.
pub fn load_settings_from_path(path: &Path) -> Result<TaskerSettings> {
    load_settings_with_env(path, |key| std::env::var(key).ok())
}

/// Same as [`load_settings_from_path`] with an injectable environment.
pub fn load_settings_with_env<F>(path: &Path, env: F) -> Result<TaskerSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = serde_json::to_value(TaskerSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading config file");
        let content =
            std::fs::read_to_string(path).map_err(|source| SettingsError::Unreadable {
                path: path.to_owned(),
                source,
            })?;
        let user: Value = serde_json::from_str(&content)?;
        merge(defaults, user)?
    } else {
        debug!(?path, "config file not found, using defaults");
        defaults
    };

    let mut settings: TaskerSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings, env);
    Ok(settings)
}

/// Overlay the top-level keys of `source` onto `target`.
pub fn merge(target: Value, source: Value) -> Result<Value> {
    let (Value::Object(mut target), Value::Object(source)) = (target, source) else {
        return Err(SettingsError::InvalidValue(
            "config root must be a JSON object".into(),
        ));
    };
    for (key, value) in source {
        if !value.is_null() {
            let _ = target.insert(key, value);
        }
    }
    Ok(Value::Object(target))
}

/// Environment overrides. Invalid values are logged and ignored.
pub fn apply_env_overrides<F>(settings: &mut TaskerSettings, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| env(key).filter(|v| !v.is_empty());

    if let Some(v) = read("SQLITE") {
        settings.sqlite = v.into();
    }
    if let Some(v) = read("PORT") {
        match parse_port(&v) {
            Some(port) => settings.port = port,
            None => warn!(key = "PORT", value = %v, "invalid port env var, ignoring"),
        }
    }
    if let Some(v) = read("TASKER_HOST") {
        settings.host = v;
    }
    if let Some(v) = read("TASKER_LOG") {
        settings.log_level = v;
    }
}

/// Parse a listen port in `1..=65535`.
pub fn parse_port(val: &str) -> Option<u16> {
    val.trim().parse::<u16>().ok().filter(|p| *p > 0)
}
