//! Server setup and the accept loop.
//!
//! [`Server`] ties the route table to the protocol engine: it binds the
//! listen address, accepts connections, and spawns one task per connection
//! that drives [`HttpConnection::process`] with the server itself as the
//! handler. Routing failures are answered here (404/405); everything a
//! matched handler produces passes through untouched.

use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use minnow_http::connection::{HttpConnection, DEFAULT_READ_TIMEOUT};
use minnow_http::handler::Handler;
use minnow_http::protocol::{Limits, Request, ResponseWriter};

use crate::router::{RouteOutcome, Router};

pub struct ServerBuilder {
    router: Option<Router>,
    address: Option<Vec<SocketAddr>>,
    limits: Limits,
    read_timeout: Duration,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { router: None, address: None, limits: Limits::default(), read_timeout: DEFAULT_READ_TIMEOUT }
    }

    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().unwrap().collect::<Vec<_>>());
        self
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let router = self.router.ok_or(ServerBuildError::MissingRouter)?;
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?;
        Ok(Server { router, address, limits: self.limits, read_timeout: self.read_timeout })
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("router must be set")]
    MissingRouter,
    #[error("address must be set")]
    MissingAddress,
}

pub struct Server {
    router: Router,
    address: Vec<SocketAddr>,
    limits: Limits,
    read_timeout: Duration,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Binds the listen address and serves connections until the process
    /// ends. Each accepted connection runs concurrently on its own task.
    pub async fn start(self) {
        let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
        tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

        info!("start listening at {:?}", self.address);
        let tcp_listener = match TcpListener::bind(self.address.as_slice()).await {
            Ok(tcp_listener) => tcp_listener,
            Err(e) => {
                error!(cause = %e, "bind server error");
                return;
            }
        };

        let limits = self.limits;
        let read_timeout = self.read_timeout;
        let handler = Arc::new(self);

        loop {
            let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let handler = Arc::clone(&handler);

            tokio::spawn(async move {
                let (reader, writer) = tcp_stream.into_split();
                let connection = HttpConnection::with_limits(reader, writer, limits, read_timeout);
                match connection.process(handler).await {
                    Ok(()) => {
                        info!("finished process, connection shutdown");
                    }
                    Err(e) => {
                        error!("service has error, cause {}, connection shutdown", e);
                    }
                }
            });
        }
    }
}

/// The server itself is the connection-level handler: it resolves the route
/// and delegates to the registered handler, or answers 404/405 through the
/// normal response path so keep-alive semantics still apply.
#[async_trait]
impl Handler for Server {
    async fn handle(&self, mut request: Request, mut response: ResponseWriter) -> ResponseWriter {
        let outcome = self.router.route(request.method(), request.path());

        match outcome {
            RouteOutcome::Found { handler, params } => {
                request.set_path_params(params);
                handler.handle(request, response).await
            }
            RouteOutcome::MethodNotAllowed => {
                response.set_status(StatusCode::METHOD_NOT_ALLOWED);
                response
            }
            RouteOutcome::NotFound => {
                response.set_status(StatusCode::NOT_FOUND);
                response
            }
        }
    }
}
