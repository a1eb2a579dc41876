//! HTTP response head serializer
//!
//! Writes the status line and header map of a finalized response into wire
//! format: `HTTP/1.1 <code> <reason>`, one `name: value` line per header
//! value (a key with multiple values produces one line per value), then the
//! blank separator line.

use std::io;
use std::io::Write;

use bytes::{BufMut, BytesMut};
use http::{HeaderMap, StatusCode};
use tokio_util::codec::Encoder;

use crate::protocol::SendError;

/// Initial buffer size reserved for head serialization
const INIT_HEAD_SIZE: usize = 1024;

pub struct HeaderEncoder;

impl Encoder<(StatusCode, HeaderMap)> for HeaderEncoder {
    type Error = SendError;

    fn encode(&mut self, item: (StatusCode, HeaderMap), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (status, headers) = item;

        dst.reserve(INIT_HEAD_SIZE);
        write!(FastWrite(dst), "HTTP/1.1 {} {}\r\n", status.as_str(), status.canonical_reason().unwrap_or("")).map_err(SendError::io)?;

        for (name, value) in headers.iter() {
            dst.put_slice(name.as_ref());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// Fast writer implementation for writing to BytesMut.
///
/// Space has already been reserved, so every write is a plain append.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
