//! HTTP connection handling module
//!
//! # Components
//!
//! - [`HttpConnection`]: the per-connection orchestrator that:
//!   - frames and parses one request per cycle under a fresh read deadline
//!   - invokes the application handler with the structured request
//!   - finalizes the accumulated response (status, `Content-Type`,
//!     `Content-Length`, `Date`, keep-alive headers)
//!   - writes the response in a single flush
//!   - loops for the next request on keep-alive, closes otherwise
//!
//! Protocol errors are answered by the connection itself with bare status
//! responses; timeouts and peer-closed streams terminate silently.

mod http_connection;

pub use http_connection::{HttpConnection, DEFAULT_READ_TIMEOUT, KEEP_ALIVE_MAX_REQUESTS};
