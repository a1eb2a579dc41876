//! Core HTTP protocol abstractions and implementations.
//!
//! This module provides the building blocks the rest of the crate is assembled
//! from: the structured request and response types exchanged with application
//! handlers, the protocol limits enforced during framing, and the error
//! taxonomy every stage reports through.
//!
//! # Architecture
//!
//! - **Request side** ([`request`]): [`RequestHead`] carries everything parsed
//!   from the header block; [`Request`] attaches the framed body and the
//!   wildcard bindings filled in by routing. [`Query`] exposes the parsed
//!   query string to handlers.
//!
//! - **Response side** ([`response`]): [`ResponseWriter`] is the accumulator a
//!   handler fills in; [`Response`] is the finalized form the codec
//!   serializes. Nothing is written to the socket until the whole response is
//!   buffered, so `Content-Length` is always exact.
//!
//! - **Limits** ([`limits`]): the header-block and total-request byte bounds
//!   enforced before any parsing happens.
//!
//! - **Errors** ([`error`]): [`ParseError`] for the read path (each variant
//!   maps to the status code the connection answers with), [`SendError`] for
//!   the write path, [`HttpError`] as the top-level union.

mod request;
pub use request::PathParams;
pub use request::Request;
pub use request::RequestHead;

mod response;
pub use response::Response;
pub use response::ResponseWriter;

mod query;
pub use query::Query;

mod limits;
pub use limits::Limits;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
