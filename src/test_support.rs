//! In-process HTTP stub for exercising the Trello and webhook clients.

use std::sync::{Arc, Mutex};

use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::routing::{on, MethodFilter};
use axum::Router;
use tokio::net::TcpListener;

pub struct Route {
    method: &'static str,
    path: &'static str,
    status: u16,
    body: String,
}

impl Route {
    pub fn new(method: &'static str, path: &'static str, status: u16, body: &str) -> Self {
        Self {
            method,
            path,
            status,
            body: body.to_string(),
        }
    }

    pub fn get(path: &'static str, body: &str) -> Self {
        Self::new("GET", path, 200, body)
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path plus query string, as sent.
    pub target: String,
    pub headers: HeaderMap,
    pub body: String,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

pub struct StubServer {
    pub url: String,
    requests: Log,
}

impl StubServer {
    /// Every request is recorded; unknown routes get a 404.
    pub async fn start(routes: Vec<Route>) -> Self {
        let requests: Log = Arc::new(Mutex::new(Vec::new()));

        let mut app = Router::new();
        for Route {
            method,
            path,
            status,
            body,
        } in routes
        {
            let filter = match method {
                "POST" => MethodFilter::POST,
                "PUT" => MethodFilter::PUT,
                _ => MethodFilter::GET,
            };
            let log = requests.clone();
            let status = StatusCode::from_u16(status).unwrap();
            app = app.route(
                path,
                on(
                    filter,
                    move |method: Method, uri: Uri, headers: HeaderMap, req_body: String| {
                        let log = log.clone();
                        let body = body.clone();
                        async move {
                            record(&log, method, uri, headers, req_body);
                            (status, [(header::CONTENT_TYPE, "application/json")], body)
                        }
                    },
                ),
            );
        }

        let log = requests.clone();
        let app = app.fallback(
            move |method: Method, uri: Uri, headers: HeaderMap, req_body: String| {
                let log = log.clone();
                async move {
                    record(&log, method, uri, headers, req_body);
                    (StatusCode::NOT_FOUND, "not found")
                }
            },
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn record(log: &Log, method: Method, uri: Uri, headers: HeaderMap, body: String) {
    log.lock().unwrap().push(Recorded {
        method: method.to_string(),
        target: uri.to_string(),
        headers,
        body,
    });
}
