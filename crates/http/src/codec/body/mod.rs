//! Request body accumulation
//!
//! Bodies are framed by the `Content-Length` declared in the header block;
//! there is no chunked transfer-encoding. [`LengthDecoder`] buffers until the
//! declared length is present and hands the body over in one piece.

mod length_decoder;

pub use length_decoder::LengthDecoder;
