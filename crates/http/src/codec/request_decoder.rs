//! HTTP request decoder module
//!
//! This module frames complete requests out of a stream of arbitrary-sized
//! socket reads using a two-phase state machine:
//!
//! 1. Head phase: [`HeaderDecoder`] locates the header/body boundary,
//!    enforces the size limits and parses the header block
//! 2. Body phase: [`LengthDecoder`] accumulates the declared body length
//!
//! One complete [`Request`] is emitted per cycle and the decoder resets to
//! the head phase, which is what lets a keep-alive connection decode several
//! sequential requests from the same buffer.

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::debug;

use crate::codec::body::LengthDecoder;
use crate::codec::header::HeaderDecoder;
use crate::protocol::{Limits, ParseError, Request, RequestHead};

/// A decoder producing one fully framed [`Request`] at a time.
///
/// # State Machine
///
/// The decoder state is carried by the `in_flight` field:
/// - `None`: waiting for a complete header block
/// - `Some((head, decoder))`: head parsed, accumulating the declared body
pub struct RequestDecoder {
    header_decoder: HeaderDecoder,
    in_flight: Option<(RequestHead, LengthDecoder)>,
}

impl RequestDecoder {
    pub fn new(limits: Limits) -> Self {
        Self { header_decoder: HeaderDecoder::new(limits), in_flight: None }
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Attempts to decode one complete request from the buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: a fully framed request, head and body
    /// - `Ok(None)`: need more data
    /// - `Err(_)`: a limit violation or parse failure, terminal for the
    ///   connection
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // finish the in-flight body before looking at new head bytes
        if let Some((head, mut body_decoder)) = self.in_flight.take() {
            return match body_decoder.decode(src)? {
                Some(body) => Ok(Some(Request::new(head, body))),
                None => {
                    self.in_flight = Some((head, body_decoder));
                    Ok(None)
                }
            };
        }

        let Some(head) = self.header_decoder.decode(src)? else {
            return Ok(None);
        };

        let mut body_decoder = LengthDecoder::new(head.content_length());
        match body_decoder.decode(src)? {
            Some(body) => Ok(Some(Request::new(head, body))),
            None => {
                self.in_flight = Some((head, body_decoder));
                Ok(None)
            }
        }
    }

    /// Called when the peer closed the stream.
    ///
    /// A connection that ends between requests, or one abandoned mid-frame,
    /// terminates silently: no item, no error.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(request) => Ok(Some(request)),
            None => {
                if !src.is_empty() || self.in_flight.is_some() {
                    debug!(buffered = src.len(), "peer closed mid-request, dropping partial frame");
                }
                Ok(None)
            }
        }
    }
}
