//! In-process fake of the research engine HTTP service.

use std::io::Read;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

/// One request the fake service received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// Canned behavior for the fake service.
#[derive(Debug, Clone)]
pub struct Script {
    pub report: Value,
    /// `None` omits the `sources` field entirely.
    pub sources: Option<Value>,
    /// Overrides the `POST /research` status and body.
    pub start_response: Option<(u16, String)>,
}

impl Script {
    pub fn reporting(report: Value, sources: Option<Value>) -> Self {
        Self {
            report,
            sources,
            start_response: None,
        }
    }
}

pub struct FakeEngineService {
    pub url: String,
    pub requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeEngineService {
    pub fn start(script: Script) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("fake engine should bind");
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .expect("fake engine should have an IP address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        std::thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let recorded = Recorded {
                    method: request.method().to_string(),
                    path: request.url().to_string(),
                    authorization: request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv("Authorization"))
                        .map(|h| h.value.as_str().to_string()),
                    body,
                };
                let (status, payload) = route(&script, &recorded);
                log.lock().unwrap().push(recorded);

                let response = tiny_http::Response::from_string(payload)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json")
                            .unwrap(),
                    );
                let _ = request.respond(response);
            }
        });

        Self {
            url: format!("http://127.0.0.1:{port}"),
            requests,
        }
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn route(script: &Script, request: &Recorded) -> (u16, String) {
    match (request.method.as_str(), request.path.as_str()) {
        ("POST", "/research") => match &script.start_response {
            Some((status, body)) => (*status, body.clone()),
            None => (200, json!({"id": "r-1"}).to_string()),
        },
        ("POST", "/research/r-1/report") => (200, json!({"report": script.report}).to_string()),
        ("GET", "/research/r-1/sources") => {
            let body = match &script.sources {
                Some(sources) => json!({"sources": sources}),
                None => json!({}),
            };
            (200, body.to_string())
        }
        _ => (404, json!({"detail": "not found"}).to_string()),
    }
}
