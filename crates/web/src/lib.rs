//! Wildcard routing and server setup on top of `minnow-http`
//!
//! This crate supplies the application-facing half of the server: a route
//! table binding `(method, path pattern)` pairs to handlers, and a server
//! builder that owns the accept loop and hands every accepted connection to
//! the protocol engine.
//!
//! # Example
//!
//! ```no_run
//! use minnow_web::{handler_fn, Router, Server};
//! use minnow_web::{Request, ResponseWriter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = Router::builder()
//!         .get("/echo/{text}", handler_fn(echo))
//!         .build();
//!
//!     let server = Server::builder()
//!         .address("127.0.0.1:8000")
//!         .router(router)
//!         .build()
//!         .unwrap();
//!
//!     server.start().await;
//! }
//!
//! async fn echo(request: Request, mut response: ResponseWriter) -> ResponseWriter {
//!     let text = request.path_value("text").unwrap_or_default().to_string();
//!     response.write(text);
//!     response
//! }
//! ```
//!
//! # Routing model
//!
//! Patterns are `/`-separated; a `{name}` segment is a wildcard binding one
//! path segment under that name. Routes with the same literal/wildcard shape
//! share one entry and differ only by method, so a path resolves to at most
//! one route: an unknown path answers 404 and a known shape with an
//! unregistered method answers 405. The route table is built once before the
//! listener starts accepting and is read-only afterwards.

pub mod router;
pub mod server;

pub use router::{RouteOutcome, Router, RouterBuilder};
pub use server::{Server, ServerBuildError, ServerBuilder};

pub use minnow_http::handler::{handler_fn, Handler, HandlerFn};
pub use minnow_http::protocol::{Limits, PathParams, Query, Request, ResponseWriter};
