//! Request handler abstractions
//!
//! [`Handler`] is the single capability the connection loop knows about: it
//! receives one fully framed request and a fresh response accumulator, and
//! hands the accumulator back with whatever status, headers and body the
//! application decided on. Everything behind a route, file serving, echoing,
//! compressing, is polymorphic over this one operation.
//!
//! Handler failures are the handler's own business: the loop never inspects
//! what happened inside, it serializes whatever the returned writer holds, so
//! a handler converts its errors into a status code itself.

use std::future::Future;

use async_trait::async_trait;

use crate::protocol::{Request, ResponseWriter};

#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, request: Request, response: ResponseWriter) -> ResponseWriter;
}

/// Adapter that lets a plain async function act as a [`Handler`].
#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Request, ResponseWriter) -> Fut + Send + Sync,
    Fut: Future<Output = ResponseWriter> + Send,
{
    async fn handle(&self, request: Request, response: ResponseWriter) -> ResponseWriter {
        (self.f)(request, response).await
    }
}

pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(Request, ResponseWriter) -> Fut + Send + Sync,
    Fut: Future<Output = ResponseWriter> + Send,
{
    HandlerFn { f }
}
