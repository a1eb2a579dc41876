//! HTTP response encoder
//!
//! Serializes one finalized [`Response`] per call: the head via
//! [`HeaderEncoder`], then the raw body bytes. The whole response lands in
//! the destination buffer so the connection can flush it as a single write.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

use crate::codec::header::HeaderEncoder;
use crate::protocol::{Response, SendError};

pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for ResponseEncoder {
    fn default() -> Self {
        Self { header_encoder: HeaderEncoder }
    }
}

impl Encoder<Response> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, response: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (status, headers, body) = response.into_parts();

        self.header_encoder.encode((status, headers), dst)?;
        dst.reserve(body.len());
        dst.put_slice(&body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{header, HeaderMap, HeaderValue, StatusCode};

    #[test]
    fn body_follows_the_blank_line() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("3"));
        let response = Response::new(StatusCode::OK, headers, Bytes::from_static(b"abc"));

        let mut dst = BytesMut::new();
        ResponseEncoder::new().encode(response, &mut dst).unwrap();

        assert_eq!(&dst[..], b"HTTP/1.1 200 OK\r\ncontent-length: 3\r\n\r\nabc");
    }

    #[test]
    fn bare_status_response() {
        let mut dst = BytesMut::new();
        ResponseEncoder::new().encode(Response::empty(StatusCode::HTTP_VERSION_NOT_SUPPORTED), &mut dst).unwrap();

        assert_eq!(&dst[..], b"HTTP/1.1 505 HTTP Version Not Supported\r\n\r\n");
    }
}
