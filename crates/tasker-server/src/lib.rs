pub mod body;
pub mod errors;
pub mod router;
pub mod server;

pub use errors::ApiError;
pub use router::{API_BASE, TaskRouter};
pub use server::{ServerConfig, ServerHandle, build_router, start};
