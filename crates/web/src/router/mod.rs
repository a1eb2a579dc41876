//! Route table construction and resolution
//!
//! The router owns every `(method, pattern) → handler` binding the
//! application registered. Registration merges patterns with an identical
//! literal/wildcard shape into a single route carrying one handler per
//! method, which is what lets resolution distinguish "no such path" (404)
//! from "path exists, method doesn't" (405).
//!
//! Matching walks routes in registration order and the first structural
//! match wins. Overlapping shapes are the registrant's responsibility; the
//! matcher doesn't forbid them.

mod pattern;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use http::Method;
use tracing::warn;

use minnow_http::handler::Handler;
use minnow_http::protocol::PathParams;

use pattern::{match_path, parse_pattern, shape_eq, Segment};

/// One registered URL shape with its per-method handlers.
struct Route {
    segments: Vec<Segment>,
    handlers: HashMap<Method, Arc<dyn Handler>>,
}

/// The immutable route table, built once before the server starts accepting.
pub struct Router {
    routes: Vec<Route>,
}

/// The result of resolving `(method, path)` against the table.
pub enum RouteOutcome {
    /// A route matched and carries a handler for the method.
    Found {
        handler: Arc<dyn Handler>,
        params: PathParams,
    },
    /// A route matched the path shape but not the method.
    MethodNotAllowed,
    /// No registered route has a matching shape.
    NotFound,
}

impl fmt::Debug for RouteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { params, .. } => f.debug_struct("Found").field("params", params).finish_non_exhaustive(),
            Self::MethodNotAllowed => write!(f, "MethodNotAllowed"),
            Self::NotFound => write!(f, "NotFound"),
        }
    }
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Resolves a request to a handler plus wildcard bindings.
    ///
    /// Routes are tried in registration order; the first route whose shape
    /// matches the path decides the outcome.
    pub fn route(&self, method: &Method, path: &str) -> RouteOutcome {
        for route in &self.routes {
            if let Some(params) = match_path(&route.segments, path) {
                return match route.handlers.get(method) {
                    Some(handler) => RouteOutcome::Found { handler: Arc::clone(handler), params },
                    None => RouteOutcome::MethodNotAllowed,
                };
            }
        }

        RouteOutcome::NotFound
    }
}

/// Collects registrations and produces the immutable [`Router`].
pub struct RouterBuilder {
    routes: Vec<Route>,
}

impl RouterBuilder {
    fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn get(self, pattern: &str, handler: impl Handler + 'static) -> Self {
        self.route(Method::GET, pattern, handler)
    }

    pub fn post(self, pattern: &str, handler: impl Handler + 'static) -> Self {
        self.route(Method::POST, pattern, handler)
    }

    pub fn delete(self, pattern: &str, handler: impl Handler + 'static) -> Self {
        self.route(Method::DELETE, pattern, handler)
    }

    /// Registers a handler, merging into an existing route when the pattern
    /// shape is already known. The first registration's wildcard names stay
    /// authoritative for the shared shape.
    fn route(mut self, method: Method, pattern: &str, handler: impl Handler + 'static) -> Self {
        let segments = parse_pattern(pattern);
        let handler: Arc<dyn Handler> = Arc::new(handler);

        if let Some(route) = self.routes.iter_mut().find(|route| shape_eq(&route.segments, &segments)) {
            if route.handlers.insert(method.clone(), handler).is_some() {
                warn!(%method, pattern, "duplicate registration replaces the previous handler");
            }
            return self;
        }

        let mut handlers = HashMap::new();
        handlers.insert(method, handler);
        self.routes.push(Route { segments, handlers });
        self
    }

    pub fn build(self) -> Router {
        Router { routes: self.routes }
    }
}
