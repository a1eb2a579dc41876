//! A small file/echo server: serves and accepts files below a directory,
//! echoes the user agent, and gzip-compresses echo responses when the client
//! advertises support.
//!
//! ```bash
//! cargo run --example file_server -- /tmp/served
//! curl -v "http://localhost:4221/user-agent"
//! curl -v -H "Accept-Encoding: gzip" "http://localhost:4221/echo/abc" --output -
//! curl -v -X POST "http://localhost:4221/files/note.txt" -d "file body"
//! curl -v "http://localhost:4221/files/note.txt"
//! ```

use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use flate2::write::GzEncoder;
use flate2::Compression;
use http::{header, HeaderValue, StatusCode};
use tracing::error;

use minnow_web::{handler_fn, Handler, Request, ResponseWriter, Router, Server};

#[tokio::main]
async fn main() {
    let directory = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let router = Router::builder()
        .get("/", handler_fn(index))
        .get("/user-agent", handler_fn(user_agent))
        .get("/echo/{text}", handler_fn(echo))
        .get("/files/{name}", FileDownload { directory: directory.clone() })
        .post("/files/{name}", FileUpload { directory })
        .build();

    let server = Server::builder().address("127.0.0.1:4221").router(router).build().expect("server configuration is complete");

    server.start().await;
}

async fn index(_request: Request, response: ResponseWriter) -> ResponseWriter {
    response
}

async fn user_agent(request: Request, mut response: ResponseWriter) -> ResponseWriter {
    let agent = request.headers().get(header::USER_AGENT).and_then(|value| value.to_str().ok()).unwrap_or_default().to_string();

    response.write(agent);
    response
}

/// Echoes the wildcard segment, gzip-compressed when the request lists
/// `gzip` among its accepted encodings.
async fn echo(request: Request, mut response: ResponseWriter) -> ResponseWriter {
    let text = request.path_value("text").unwrap_or_default().to_string();

    let accepts_gzip = request.headers().get_all(header::ACCEPT_ENCODING).iter().any(|value| value.as_bytes() == b"gzip");
    if !accepts_gzip {
        response.write(text);
        return response;
    }

    match compress(text.as_bytes()) {
        Ok(compressed) => {
            response.insert_header(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
            response.write(compressed);
        }
        Err(e) => {
            error!(cause = %e, "compressing echo response failed");
            response.set_status(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
    response
}

fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

struct FileDownload {
    directory: PathBuf,
}

#[async_trait]
impl Handler for FileDownload {
    async fn handle(&self, request: Request, mut response: ResponseWriter) -> ResponseWriter {
        let path = self.directory.join(request.path_value("name").unwrap_or_default());

        match tokio::fs::read(&path).await {
            Ok(contents) => {
                response.insert_header(header::CONTENT_TYPE, HeaderValue::from_str(mime::APPLICATION_OCTET_STREAM.as_ref()).unwrap());
                response.write(contents);
            }
            Err(_) => response.set_status(StatusCode::NOT_FOUND),
        }
        response
    }
}

struct FileUpload {
    directory: PathBuf,
}

#[async_trait]
impl Handler for FileUpload {
    async fn handle(&self, request: Request, mut response: ResponseWriter) -> ResponseWriter {
        let path = self.directory.join(request.path_value("name").unwrap_or_default());

        match tokio::fs::write(&path, request.body()).await {
            Ok(()) => response.set_status(StatusCode::CREATED),
            Err(e) => {
                error!(cause = %e, "writing upload failed");
                response.set_status(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
        response
    }
}
