//! Category-scoped task persistence over SQLite.
//!
//! [`TaskStore`] is the only component that issues SQL. Every entry point
//! resolves the caller's category against the [`Category`] whitelist before
//! a statement is built, because the category picks the table and table
//! names cannot be bound as parameters. Everything else is always bound.
//!
//! [`Category`]: tasker_core::Category

pub mod codec;
pub mod connection;
pub mod criteria;
pub mod errors;
pub mod schema;
pub mod store;

pub use connection::ConnectionConfig;
pub use criteria::{Criteria, Criterion};
pub use errors::{Result, StoreError};
pub use store::TaskStore;
