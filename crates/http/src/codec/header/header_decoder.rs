//! HTTP header block decoder
//!
//! This module turns the header block of one request into a structured
//! [`RequestHead`]. Framing and parsing are interleaved on purpose: the
//! decoder first locates the `\r\n\r\n` header/body boundary and enforces the
//! header-size limit on raw bytes, and only then parses the request line and
//! header fields. The total-request limit is checked as soon as the declared
//! `Content-Length` is known, before any body byte is awaited.
//!
//! # Parsing rules
//!
//! - The request line must be exactly three space-separated tokens; the
//!   version token must be the literal `HTTP/1.1`
//! - Header lines split on the first colon; lines without one are skipped
//! - Names are trimmed and compared case-insensitively; values are trimmed
//!   and comma-separated sub-values become distinct entries under the key
//! - A missing `Content-Length` means an empty body; an unparsable one is a
//!   parse failure

use bytes::BytesMut;
use http::{header, HeaderMap, HeaderName, HeaderValue, Method, Uri, Version};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::ensure;
use crate::protocol::{Limits, ParseError, RequestHead};

const HEAD_END: &[u8] = b"\r\n\r\n";
const SUPPORTED_VERSION: &str = "HTTP/1.1";

/// Decoder for the header block of a request, bounded by [`Limits`].
pub struct HeaderDecoder {
    limits: Limits,
}

impl HeaderDecoder {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }
}

impl Decoder for HeaderDecoder {
    type Item = RequestHead;
    type Error = ParseError;

    /// Attempts to decode a complete header block from the buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(head))` if a complete header block was parsed; the block is
    ///   consumed from the buffer and any body bytes remain
    /// - `Ok(None)` if the header/body boundary has not arrived yet
    /// - `Err(ParseError)` on a limit violation or malformed input
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(position) = find_head_end(src) else {
            // still accumulating, bound the growth before reading further
            ensure!(src.len() <= self.limits.max_head_bytes, ParseError::too_large_header(src.len(), self.limits.max_head_bytes));
            return Ok(None);
        };

        let head_size = position + HEAD_END.len();
        ensure!(head_size <= self.limits.max_head_bytes, ParseError::too_large_header(head_size, self.limits.max_head_bytes));

        let head_bytes = src.split_to(head_size).freeze();
        let head = parse_head(&head_bytes[..head_size - HEAD_END.len()])?;

        // a Content-Length near u64::MAX must trip the limit, not wrap
        let declared_size = (head_size as u64).saturating_add(head.content_length());
        ensure!(
            declared_size <= self.limits.max_request_bytes as u64,
            ParseError::too_large_payload(declared_size, self.limits.max_request_bytes)
        );

        trace!(head_size, content_length = head.content_length(), "parsed request head");
        Ok(Some(head))
    }
}

fn find_head_end(src: &BytesMut) -> Option<usize> {
    src.windows(HEAD_END.len()).position(|window| window == HEAD_END)
}

fn parse_head(bytes: &[u8]) -> Result<RequestHead, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ParseError::invalid_header("header block is not valid utf-8"))?;

    let mut lines = text.split("\r\n");
    let (method, uri) = parse_request_line(lines.next().unwrap_or_default())?;
    let headers = parse_header_lines(lines);
    let content_length = parse_content_length(&headers)?;

    Ok(RequestHead::new(method, uri, Version::HTTP_11, headers, content_length))
}

fn parse_request_line(line: &str) -> Result<(Method, Uri), ParseError> {
    let tokens: Vec<&str> = line.split(' ').collect();
    ensure!(tokens.len() == 3, ParseError::invalid_request_line(line));
    ensure!(tokens[2] == SUPPORTED_VERSION, ParseError::unsupported_version(tokens[2]));

    let method = Method::from_bytes(tokens[0].as_bytes()).map_err(|_| ParseError::InvalidMethod)?;
    let uri = tokens[1].parse::<Uri>().map_err(|_| ParseError::InvalidUri)?;

    Ok((method, uri))
}

fn parse_header_lines<'a>(lines: impl Iterator<Item = &'a str>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let Ok(name) = HeaderName::from_bytes(name.trim().as_bytes()) else {
            continue;
        };

        // combined values like `Accept-Encoding: gzip, br` become one entry
        // per sub-value under the same key
        for sub_value in value.trim().split(',') {
            if let Ok(sub_value) = HeaderValue::from_str(sub_value.trim()) {
                headers.append(name.clone(), sub_value);
            }
        }
    }

    headers
}

fn parse_content_length(headers: &HeaderMap) -> Result<u64, ParseError> {
    match headers.get(header::CONTENT_LENGTH) {
        Some(value) => {
            let value = value.to_str().map_err(|_| ParseError::invalid_content_length("value is not visible ascii"))?;
            value.trim().parse::<u64>().map_err(|_| ParseError::invalid_content_length(format!("value {value} is not u64")))
        }
        None => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use indoc::indoc;

    fn crlf(text: &str) -> BytesMut {
        BytesMut::from(text.replace('\n', "\r\n").as_str())
    }

    fn decoder() -> HeaderDecoder {
        HeaderDecoder::new(Limits::default())
    }

    #[test]
    fn from_curl() {
        let mut buf = crlf(indoc! {"
            GET /index.html HTTP/1.1
            Host: 127.0.0.1:8080
            User-Agent: curl/7.79.1
            Accept: */*

        "});

        let head = decoder().decode(&mut buf).unwrap().unwrap();

        assert_eq!(head.method(), &Method::GET);
        assert_eq!(head.version(), Version::HTTP_11);
        assert_eq!(head.path(), "/index.html");
        assert_eq!(head.query(), None);
        assert_eq!(head.content_length(), 0);

        assert_eq!(head.headers().len(), 3);
        assert_eq!(head.headers().get(header::HOST), Some(&HeaderValue::from_static("127.0.0.1:8080")));
        assert_eq!(head.headers().get(header::USER_AGENT), Some(&HeaderValue::from_static("curl/7.79.1")));
        assert_eq!(head.headers().get(header::ACCEPT), Some(&HeaderValue::from_static("*/*")));

        assert!(buf.is_empty());
    }

    #[test]
    fn query_is_split_from_path() {
        let mut buf = crlf("GET /index/?a=1&b=2&a=3 HTTP/1.1\n\n");

        let head = decoder().decode(&mut buf).unwrap().unwrap();

        assert_eq!(head.path(), "/index/");
        assert_eq!(head.query(), Some("a=1&b=2&a=3"));
    }

    #[test]
    fn combined_header_values_become_distinct_entries() {
        let mut buf = crlf(indoc! {"
            GET / HTTP/1.1
            Accept-Encoding: gzip, deflate, br

        "});

        let head = decoder().decode(&mut buf).unwrap().unwrap();

        let values: Vec<&HeaderValue> = head.headers().get_all(header::ACCEPT_ENCODING).iter().collect();
        assert_eq!(values, vec!["gzip", "deflate", "br"]);
    }

    #[test]
    fn header_names_are_case_insensitive() {
        let mut buf = crlf("GET / HTTP/1.1\nHOST:   example.com  \n\n");

        let head = decoder().decode(&mut buf).unwrap().unwrap();

        assert_eq!(head.headers().get("host"), Some(&HeaderValue::from_static("example.com")));
    }

    #[test]
    fn lines_without_colon_are_skipped() {
        let mut buf = crlf(indoc! {"
            GET / HTTP/1.1
            NotAHeaderLine
            Host: example.com

        "});

        let head = decoder().decode(&mut buf).unwrap().unwrap();

        assert_eq!(head.headers().len(), 1);
    }

    #[test]
    fn body_bytes_stay_in_the_buffer() {
        let mut buf = crlf(indoc! {"
            POST /submit HTTP/1.1
            Content-Length: 5

            hello"});

        let head = decoder().decode(&mut buf).unwrap().unwrap();

        assert_eq!(head.method(), &Method::POST);
        assert_eq!(head.content_length(), 5);
        assert_eq!(&buf[..], b"hello");
    }

    #[test]
    fn incomplete_head_needs_more_data() {
        let mut buf = BytesMut::from("GET / HT");

        let result = decoder().decode(&mut buf).unwrap();

        assert!(result.is_none());
        assert_eq!(&buf[..], b"GET / HT");
    }

    #[test]
    fn wrong_token_count_is_a_hard_failure() {
        let mut buf = crlf("GET /\n\n");

        let error = decoder().decode(&mut buf).unwrap_err();

        assert!(matches!(error, ParseError::InvalidRequestLine { .. }));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn only_http_1_1_is_accepted() {
        let mut buf = crlf("GET / HTTP/1.0\n\n");

        let error = decoder().decode(&mut buf).unwrap_err();

        assert!(matches!(error, ParseError::UnsupportedVersion { .. }));
        assert_eq!(error.status(), StatusCode::HTTP_VERSION_NOT_SUPPORTED);
    }

    #[test]
    fn unparsable_content_length_is_malformed() {
        let mut buf = crlf(indoc! {"
            POST / HTTP/1.1
            Content-Length: five

        "});

        let error = decoder().decode(&mut buf).unwrap_err();

        assert!(matches!(error, ParseError::InvalidContentLength { .. }));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unterminated_head_over_the_limit() {
        let mut buf = BytesMut::from(format!("GET / HTTP/1.1\r\nX-Large-Header: {}", "a".repeat(1500)).as_str());

        let error = decoder().decode(&mut buf).unwrap_err();

        assert!(matches!(error, ParseError::TooLargeHeader { .. }));
        assert_eq!(error.status(), StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE);
    }

    #[test]
    fn terminated_head_over_the_limit() {
        let mut decoder = HeaderDecoder::new(Limits::new(32, 2048));
        let mut buf = crlf("GET / HTTP/1.1\nHost: example.com\n\n");

        let error = decoder.decode(&mut buf).unwrap_err();

        assert!(matches!(error, ParseError::TooLargeHeader { .. }));
    }

    #[test]
    fn declared_body_over_the_request_limit() {
        let mut buf = crlf(indoc! {"
            POST /upload HTTP/1.1
            Content-Length: 5000

        "});

        let error = decoder().decode(&mut buf).unwrap_err();

        assert!(matches!(error, ParseError::TooLargePayload { .. }));
        assert_eq!(error.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn maximum_content_length_does_not_wrap_past_the_limit() {
        let mut buf = crlf(indoc! {"
            POST /upload HTTP/1.1
            Content-Length: 18446744073709551615

        "});

        let error = decoder().decode(&mut buf).unwrap_err();

        assert!(matches!(error, ParseError::TooLargePayload { .. }));
        assert_eq!(error.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
