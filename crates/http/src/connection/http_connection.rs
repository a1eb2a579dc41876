use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use http::{header, HeaderName, HeaderValue, StatusCode};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{error, info, warn};

use crate::codec::{RequestDecoder, ResponseEncoder};
use crate::date::stamp_date;
use crate::handler::Handler;
use crate::protocol::{HttpError, Limits, ParseError, Response, ResponseWriter};

/// Fresh read deadline applied at the start of each request cycle.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum request count advertised in the `Keep-Alive` response hint.
pub const KEEP_ALIVE_MAX_REQUESTS: u32 = 100;

/// Chunk size for socket reads while framing a request.
const READ_CHUNK_SIZE: usize = 1024;

const KEEP_ALIVE: HeaderName = HeaderName::from_static("keep-alive");

/// An HTTP connection that manages request framing and response writing
///
/// `HttpConnection` owns one accepted socket for its whole life and drives
/// the request cycle state machine over it:
///
/// - frame and parse one request under the read deadline
/// - invoke the handler with the structured request and a fresh writer
/// - finalize the accumulated response and flush it in a single write
/// - loop for the next request when the peer negotiated keep-alive
///
/// Protocol errors (oversized input, malformed requests, unsupported
/// versions) are answered by the connection itself and are terminal; the
/// handler is never invoked for them.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    framed_write: FramedWrite<W, ResponseEncoder>,
    read_timeout: Duration,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_limits(reader, writer, Limits::default(), DEFAULT_READ_TIMEOUT)
    }

    pub fn with_limits(reader: R, writer: W, limits: Limits, read_timeout: Duration) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, RequestDecoder::new(limits), READ_CHUNK_SIZE),
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
            read_timeout,
        }
    }

    /// Serves request cycles on this connection until it terminates.
    ///
    /// Returns `Ok(())` on orderly shutdown (peer closed, read deadline
    /// elapsed, or a response declared `Connection: close`), and the
    /// underlying error after a protocol violation has been answered.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        loop {
            let request = match timeout(self.read_timeout, self.framed_read.next()).await {
                Err(_elapsed) => {
                    info!(read_timeout = ?self.read_timeout, "read deadline elapsed, closing connection");
                    return Ok(());
                }

                Ok(None) => {
                    info!("peer closed the connection");
                    return Ok(());
                }

                Ok(Some(Err(e))) => return self.reject(e).await,

                Ok(Some(Ok(request))) => request,
            };

            let keep_alive = request.is_keep_alive();

            let writer = handler.handle(request, ResponseWriter::new()).await;
            let response = finalize(writer, keep_alive, self.read_timeout);

            self.framed_write.send(response).await?;

            if !keep_alive {
                return Ok(());
            }
        }
    }

    /// Answers a protocol error with a bare status response and gives up on
    /// the connection. Size violations also terminate the write side so the
    /// peer stops sending.
    async fn reject(&mut self, error: ParseError) -> Result<(), HttpError> {
        let status = error.status();
        error!(cause = %error, %status, "protocol error, aborting connection");

        self.framed_write.send(Response::empty(status)).await?;

        if error.is_size_violation() {
            if let Err(e) = self.framed_write.get_mut().shutdown().await {
                warn!(cause = %e, "terminating write side failed");
            }
        }

        Err(error.into())
    }
}

/// Fills in the response fields the handler is not responsible for.
///
/// Status defaults to 200, `Content-Type` to `text/plain; charset=utf-8`,
/// `Content-Length` is always recomputed from the buffered body, `Date` is
/// always stamped, and the keep-alive decision from the request dictates the
/// `Connection` header.
fn finalize(writer: ResponseWriter, keep_alive: bool, read_timeout: Duration) -> Response {
    let (status, mut headers, body) = writer.into_parts();

    let status = status.unwrap_or(StatusCode::OK);

    if !headers.contains_key(header::CONTENT_TYPE) {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(mime::TEXT_PLAIN_UTF_8.as_ref()).unwrap());
    }

    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len() as u64));

    stamp_date(&mut headers);

    if keep_alive {
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        let hint = format!("timeout={}, max={}", read_timeout.as_secs(), KEEP_ALIVE_MAX_REQUESTS);
        headers.insert(KEEP_ALIVE, HeaderValue::from_str(&hint).unwrap());
    } else {
        headers.insert(header::CONNECTION, HeaderValue::from_static("close"));
    }

    Response::new(status, headers, body.freeze())
}
