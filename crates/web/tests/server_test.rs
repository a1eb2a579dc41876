//! End-to-end tests driving the full stack over an in-memory connection:
//! framing, parsing, routing, handler invocation and response finalization.

use std::sync::Arc;

use http::header;
use tokio::io::{duplex, split, AsyncReadExt, AsyncWriteExt};

use minnow_http::connection::HttpConnection;
use minnow_web::{handler_fn, Request, ResponseWriter, Router, Server};

async fn index(_request: Request, mut response: ResponseWriter) -> ResponseWriter {
    response.write("Hello world!");
    response
}

async fn echo(request: Request, mut response: ResponseWriter) -> ResponseWriter {
    let text = request.path_value("text").unwrap_or_default().to_string();
    response.write(text);
    response
}

async fn echo_pair(request: Request, mut response: ResponseWriter) -> ResponseWriter {
    let first = request.path_value("echo").unwrap_or_default().to_string();
    let second = request.path_value("echo2").unwrap_or_default().to_string();
    response.write(format!("{first} {second}"));
    response
}

async fn user_agent(request: Request, mut response: ResponseWriter) -> ResponseWriter {
    let agent = request.headers().get(header::USER_AGENT).and_then(|value| value.to_str().ok()).unwrap_or_default().to_string();
    response.write(agent);
    response
}

async fn body_length(request: Request, mut response: ResponseWriter) -> ResponseWriter {
    response.write(format!("{} bytes", request.body().len()));
    response
}

fn test_server() -> Arc<Server> {
    let router = Router::builder()
        .get("/", handler_fn(index))
        .get("/echo/{text}", handler_fn(echo))
        .get("/echo/{echo}/reverse/{echo2}", handler_fn(echo_pair))
        .get("/user-agent", handler_fn(user_agent))
        .post("/submit", handler_fn(body_length))
        .build();

    let server = Server::builder().address("127.0.0.1:0").router(router).build().unwrap();
    Arc::new(server)
}

/// Writes `input` to an in-memory connection served by the full stack and
/// drains everything it answers with.
async fn exchange(input: &[u8]) -> String {
    let (mut client, connection) = duplex(4096);
    let (read_half, write_half) = split(connection);

    let server = test_server();
    let task = tokio::spawn(async move { HttpConnection::new(read_half, write_half).process(server).await });

    client.write_all(input).await.unwrap();
    client.shutdown().await.unwrap();

    let mut output = Vec::new();
    client.read_to_end(&mut output).await.unwrap();

    let _ = task.await.unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn echo_wildcard_round_trip() {
    let output = exchange(b"GET /echo/abc HTTP/1.1\r\n\r\n").await;

    assert!(output.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(output.contains("content-length: 3\r\n"));
    assert!(output.ends_with("\r\n\r\nabc"));
}

#[tokio::test]
async fn wildcards_bind_in_declared_order() {
    let output = exchange(b"GET /echo/Hello/reverse/World HTTP/1.1\r\n\r\n").await;

    assert!(output.ends_with("\r\n\r\nHello World"));
}

#[tokio::test]
async fn query_string_does_not_affect_routing() {
    let output = exchange(b"GET /echo/abc?name=Joe HTTP/1.1\r\n\r\n").await;

    assert!(output.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(output.ends_with("\r\n\r\nabc"));
}

#[tokio::test]
async fn missing_route_answers_404_with_empty_body() {
    let output = exchange(b"GET /missing HTTP/1.1\r\n\r\n").await;

    assert!(output.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(output.contains("content-length: 0\r\n"));
    assert!(output.ends_with("\r\n\r\n"));
}

#[tokio::test]
async fn wrong_method_answers_405() {
    let output = exchange(b"POST /echo/abc HTTP/1.1\r\n\r\n").await;

    assert!(output.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
}

#[tokio::test]
async fn http_1_0_is_rejected_with_505() {
    let output = exchange(b"GET / HTTP/1.0\r\n\r\n").await;

    assert_eq!(output, "HTTP/1.1 505 HTTP Version Not Supported\r\n\r\n");
}

#[tokio::test]
async fn keep_alive_serves_a_second_request_on_the_same_socket() {
    let output = exchange(b"GET /echo/hi HTTP/1.1\r\nConnection: keep-alive\r\n\r\nGET / HTTP/1.1\r\n\r\n").await;

    assert_eq!(output.matches("HTTP/1.1 200 OK\r\n").count(), 2);
    assert!(output.contains("connection: keep-alive\r\n"));
    assert!(output.contains("keep-alive: timeout=5, max=100\r\n"));
    assert!(output.contains("connection: close\r\n"));
    assert!(output.ends_with("Hello world!"));
}

#[tokio::test]
async fn connection_closes_after_one_response_without_keep_alive() {
    let output = exchange(b"GET / HTTP/1.1\r\n\r\nGET /echo/second HTTP/1.1\r\n\r\n").await;

    assert_eq!(output.matches("HTTP/1.1 200 OK\r\n").count(), 1);
    assert!(!output.contains("second"));
}

#[tokio::test]
async fn request_body_reaches_the_handler() {
    let output = exchange(b"POST /submit HTTP/1.1\r\nContent-Length: 11\r\n\r\nhello world").await;

    assert!(output.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(output.ends_with("\r\n\r\n11 bytes"));
}

#[tokio::test]
async fn user_agent_header_reaches_the_handler() {
    let output = exchange(b"GET /user-agent HTTP/1.1\r\nUser-Agent: foobar/1.0\r\n\r\n").await;

    assert!(output.ends_with("\r\n\r\nfoobar/1.0"));
}

#[tokio::test]
async fn oversized_headers_never_reach_a_handler() {
    let input = format!("GET / HTTP/1.1\r\nX-Large-Header: {}\r\n\r\n", "a".repeat(1500));
    let output = exchange(input.as_bytes()).await;

    assert!(output.starts_with("HTTP/1.1 431 Request Header Fields Too Large\r\n"));
    assert!(!output.contains("Hello world!"));
}

#[tokio::test]
async fn oversized_declared_body_answers_413_without_blocking() {
    let output = exchange(b"POST /submit HTTP/1.1\r\nContent-Length: 5000\r\n\r\n").await;

    assert_eq!(output, "HTTP/1.1 413 Payload Too Large\r\n\r\n");
}
