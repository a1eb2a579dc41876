//! HTTP response types.
//!
//! [`ResponseWriter`] is the accumulator handed to a handler: status, headers
//! and body are collected in memory and nothing reaches the socket until the
//! handler returns. The connection loop then fills in the defaulted fields
//! and turns the writer into a [`Response`], the finalized form the codec
//! serializes in one write.

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

/// Response accumulator passed to a handler.
///
/// The handler never sees the wire format: it sets a status (last write
/// wins), adds headers and appends body bytes in any order. `Content-Length`
/// is computed by the connection loop from the final body length, so a
/// handler-supplied value is always overwritten.
#[derive(Debug, Default)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the status code. Repeated calls overwrite; when never called the
    /// response defaults to 200 OK.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Sets a header, replacing any previously set values for the same key.
    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Adds a header value without removing values already set for the key.
    pub fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.append(name, value);
    }

    /// Appends bytes to the response body. Calls accumulate in order.
    pub fn write(&mut self, data: impl AsRef<[u8]>) {
        self.body.extend_from_slice(data.as_ref());
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    pub(crate) fn into_parts(self) -> (Option<StatusCode>, HeaderMap, BytesMut) {
        (self.status, self.headers, self.body)
    }
}

/// A finalized response, ready for serialization.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self { status, headers, body }
    }

    /// A bare status-line response, used for protocol errors the core
    /// answers on its own (400, 413, 431, 500, 505).
    pub fn empty(status: StatusCode) -> Self {
        Self { status, headers: HeaderMap::new(), body: Bytes::new() }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub(crate) fn into_parts(self) -> (StatusCode, HeaderMap, Bytes) {
        (self.status, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header;

    #[test]
    fn body_writes_accumulate_in_order() {
        let mut writer = ResponseWriter::new();
        writer.write("abc");
        writer.write(b"def");
        writer.write(Bytes::from_static(b"ghi"));

        assert_eq!(writer.body_len(), 9);
        let (_, _, body) = writer.into_parts();
        assert_eq!(&body[..], b"abcdefghi");
    }

    #[test]
    fn last_status_wins() {
        let mut writer = ResponseWriter::new();
        assert_eq!(writer.status(), None);

        writer.set_status(StatusCode::NOT_FOUND);
        writer.set_status(StatusCode::CREATED);
        assert_eq!(writer.status(), Some(StatusCode::CREATED));
    }

    #[test]
    fn append_header_keeps_previous_values() {
        let mut writer = ResponseWriter::new();
        writer.append_header(header::VARY, HeaderValue::from_static("accept"));
        writer.append_header(header::VARY, HeaderValue::from_static("accept-encoding"));
        writer.insert_header(header::SERVER, HeaderValue::from_static("minnow"));
        writer.insert_header(header::SERVER, HeaderValue::from_static("minnow/0.1"));

        assert_eq!(writer.headers().get_all(header::VARY).iter().count(), 2);
        assert_eq!(writer.headers().get(header::SERVER), Some(&HeaderValue::from_static("minnow/0.1")));
    }
}
