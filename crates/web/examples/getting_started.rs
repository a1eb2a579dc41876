//! The introductory route set: index with query logging, wildcard echo
//! routes, and two POST handlers.
//!
//! ```bash
//! cargo run --example getting_started
//! curl -v "http://localhost:8000/?name=Joe&pets=Turtle&pets=Dog"
//! curl -v "http://localhost:8000/echo/ligma"
//! curl -v "http://localhost:8000/echo/Hello/reverse/World"
//! curl -v -X POST "http://localhost:8000/" -d "some body"
//! curl -v -X POST "http://localhost:8000/create" -d "name=Joe&last_name=Mama"
//! ```

use http::StatusCode;
use tracing::info;

use minnow_web::{handler_fn, Query, Request, ResponseWriter, Router, Server};

#[tokio::main]
async fn main() {
    let router = Router::builder()
        .get("/", handler_fn(index))
        .get("/echo/{echo}", handler_fn(echo))
        .get("/echo/{echo}/reverse/{echo2}", handler_fn(reverse_echo))
        .post("/", handler_fn(post_index))
        .post("/create", handler_fn(create_user))
        .build();

    let server = Server::builder().address("127.0.0.1:8000").router(router).build().expect("server configuration is complete");

    server.start().await;
}

async fn index(request: Request, mut response: ResponseWriter) -> ResponseWriter {
    for (key, value) in request.query_pairs().pairs() {
        info!(key = %key, value = %value, "query pair");
    }

    response.write("Hello world!\n");
    response
}

async fn echo(request: Request, mut response: ResponseWriter) -> ResponseWriter {
    let echo = request.path_value("echo").unwrap_or_default().to_string();

    response.write(echo);
    response.write("\n");
    response
}

async fn reverse_echo(request: Request, mut response: ResponseWriter) -> ResponseWriter {
    let reverse = |s: &str| s.chars().rev().collect::<String>();

    let echo = reverse(request.path_value("echo").unwrap_or_default());
    let echo2 = reverse(request.path_value("echo2").unwrap_or_default());

    response.write(format!("{echo} {echo2}\n"));
    response
}

async fn post_index(request: Request, mut response: ResponseWriter) -> ResponseWriter {
    response.write(format!("Hello world from a post! Body is {} bytes long\n", request.body().len()));
    response
}

async fn create_user(request: Request, mut response: ResponseWriter) -> ResponseWriter {
    let Ok(body) = std::str::from_utf8(request.body()) else {
        response.set_status(StatusCode::BAD_REQUEST);
        response.write("Unable to parse form\n");
        return response;
    };

    let form = Query::parse(Some(body));
    let name = form.get("name").unwrap_or_default().to_string();
    let last_name = form.get("last_name").unwrap_or_default().to_string();

    response.set_status(StatusCode::CREATED);
    response.write(format!("Created user {name} {last_name}\n"));
    response
}
