//! API middleware components

pub mod auth;
pub mod logging;
pub mod metrics;

pub use auth::{extract_bearer_token, RequireAccount, RequireDoctor, RequirePatient};
pub use logging::logging_middleware;
pub use metrics::metrics_middleware;
