//! Layered configuration for the tasker service.
//!
//! Precedence, highest first: environment, JSON config file, compiled
//! defaults. A missing config file is not an error.

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{load_settings_from_path, load_settings_with_env};
pub use types::TaskerSettings;
