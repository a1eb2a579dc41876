//! HTTP request types.
//!
//! [`RequestHead`] holds everything parsed from the header block of one
//! request cycle. [`Request`] attaches the framed body bytes and the wildcard
//! bindings a router fills in before the request reaches a handler.

use bytes::Bytes;
use http::{header, HeaderMap, Method, Uri, Version};

use crate::protocol::Query;

/// The parsed header block of one request: method, target, version, headers
/// and the declared body length.
#[derive(Debug)]
pub struct RequestHead {
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
    content_length: u64,
}

impl RequestHead {
    pub(crate) fn new(method: Method, uri: Uri, version: Version, headers: HeaderMap, content_length: u64) -> Self {
        Self { method, uri, version, headers, content_length }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// The path component of the request target, query excluded.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// The raw query component, if the request target carries one.
    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The body length declared by `Content-Length`, zero when absent.
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Whether the peer asked for another request cycle on this connection.
    ///
    /// Matches the exact header value `keep-alive`, the value the original
    /// negotiation uses on the wire.
    pub fn is_keep_alive(&self) -> bool {
        self.headers.get(header::CONNECTION).is_some_and(|value| value.as_bytes() == b"keep-alive")
    }
}

/// One fully framed request, ready to be handed to a handler.
///
/// Constructed fresh for each request cycle on a connection and discarded
/// after the handler returns.
#[derive(Debug)]
pub struct Request {
    head: RequestHead,
    body: Bytes,
    params: PathParams,
}

impl Request {
    pub(crate) fn new(head: RequestHead, body: Bytes) -> Self {
        Self { head, body, params: PathParams::empty() }
    }

    pub fn method(&self) -> &Method {
        self.head.method()
    }

    pub fn uri(&self) -> &Uri {
        self.head.uri()
    }

    pub fn path(&self) -> &str {
        self.head.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.head.query()
    }

    /// The query string parsed into ordered key/value pairs.
    pub fn query_pairs(&self) -> Query {
        Query::parse(self.query())
    }

    pub fn version(&self) -> Version {
        self.head.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.head.headers()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }

    pub fn is_keep_alive(&self) -> bool {
        self.head.is_keep_alive()
    }

    /// The wildcard bindings produced by route matching.
    pub fn path_params(&self) -> &PathParams {
        &self.params
    }

    /// Looks up a single wildcard binding by name.
    pub fn path_value(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Attaches the wildcard bindings resolved for this request's route.
    pub fn set_path_params(&mut self, params: PathParams) {
        self.params = params;
    }
}

/// Wildcard bindings in the order the wildcards appear in the route pattern.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathParams {
    pairs: Vec<(String, String)>,
}

impl PathParams {
    pub fn empty() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
