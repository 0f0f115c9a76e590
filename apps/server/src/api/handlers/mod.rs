//! Request handlers for API endpoints
//!
//! Handlers extract request data, call a service and shape the response.
//! Business rules live in [`crate::services`].

pub mod health;
pub mod metrics;
pub mod options;
pub mod records;
pub mod search;

pub use health::*;
pub use metrics::*;
pub use options::*;
pub use records::*;
pub use search::*;
