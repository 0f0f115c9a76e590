//! Middleware stack for the API

pub mod layers;
pub mod metrics;
pub mod request_id;
pub mod security;

pub use layers::{compression, cors, trace};
pub use metrics::metrics_middleware;
pub use request_id::{request_id_middleware, RequestId};
pub use security::security_headers_middleware;
