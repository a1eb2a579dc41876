//! A minimal HTTP/1.1 protocol engine built directly on raw TCP sockets
//!
//! This crate implements the connection lifecycle of an HTTP/1.1 server without
//! relying on a pre-built HTTP stack: it reads raw bytes from a socket
//! incrementally, frames and parses one request at a time, hands the structured
//! request to an application handler together with a response accumulator, and
//! serializes the accumulated response back to the wire.
//!
//! # Features
//!
//! - Incremental request framing over arbitrary-sized socket reads
//! - Explicit protocol limits (header block size, total request size)
//! - Keep-alive connections with a fresh read deadline per request cycle
//! - Buffered responses so `Content-Length` is always exact
//! - Clean error taxonomy mapped to protocol status codes
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! use minnow_http::connection::HttpConnection;
//! use minnow_http::handler::handler_fn;
//! use minnow_http::protocol::{Request, ResponseWriter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_listener = TcpListener::bind("127.0.0.1:8080").await.unwrap();
//!
//!     let handler = Arc::new(handler_fn(hello_world));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(_) => continue,
//!         };
//!
//!         let handler = Arc::clone(&handler);
//!
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             let connection = HttpConnection::new(reader, writer);
//!             let _ = connection.process(handler).await;
//!         });
//!     }
//! }
//!
//! async fn hello_world(_request: Request, mut response: ResponseWriter) -> ResponseWriter {
//!     response.write("Hello World!\r\n");
//!     response
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`connection`]: the per-connection request/response loop and keep-alive
//!   state machine
//! - [`protocol`]: protocol data types ([`protocol::Request`],
//!   [`protocol::ResponseWriter`], limits, errors)
//! - [`codec`]: framing and serialization between raw bytes and protocol types
//! - [`handler`]: the handler capability trait the application plugs into
//!
//! Request processing is staged: bytes are framed into one complete request
//! (header block plus the declared body), the frame is parsed into a
//! structured request, and only then does application code run. Each stage has
//! its own failure variant, and every failure is terminal for the connection.

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod date;
mod utils;
pub(crate) use utils::ensure;
