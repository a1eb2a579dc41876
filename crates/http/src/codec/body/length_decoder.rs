//! Decoder for request bodies with a known content length.

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;

use crate::protocol::ParseError;

/// Accumulates a request body until the length declared by `Content-Length`
/// is fully buffered.
///
/// The total request size was bounded when the head was parsed, so buffering
/// the whole body is fine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    length: u64,
}

impl LengthDecoder {
    pub fn new(length: u64) -> Self {
        Self { length }
    }
}

impl Decoder for LengthDecoder {
    type Item = Bytes;
    type Error = ParseError;

    /// Returns the complete body once the declared length is available,
    /// `Ok(None)` while bytes are still outstanding.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.length == 0 {
            return Ok(Some(Bytes::new()));
        }

        if (src.len() as u64) < self.length {
            return Ok(None);
        }

        Ok(Some(src.split_to(self.length as usize).freeze()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_body_is_immediately_complete() {
        let mut buffer = BytesMut::new();

        let body = LengthDecoder::new(0).decode(&mut buffer).unwrap().unwrap();

        assert!(body.is_empty());
    }

    #[test]
    fn waits_for_the_declared_length() {
        let mut decoder = LengthDecoder::new(10);
        let mut buffer = BytesMut::from(&b"12345"[..]);

        assert!(decoder.decode(&mut buffer).unwrap().is_none());

        buffer.extend_from_slice(b"67890 and the next request");
        let body = decoder.decode(&mut buffer).unwrap().unwrap();

        assert_eq!(&body[..], b"1234567890");
        assert_eq!(&buffer[..], b" and the next request");
    }
}
