//! Request-scoped middleware.
//!
//! - [`request_log::log_requests`] -- Logs every completed request with its status and latency.

pub mod request_log;
