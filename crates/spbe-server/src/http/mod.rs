//! HTTP surface of the evidence workflow.
//!
//! Every route is served at the root and again under `/api`. Failures render
//! as `{ "error": message }` through [`ApiError`].

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
