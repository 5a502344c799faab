//! Helpers for driving the `delve` binary as a host application would.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

/// Run the binary with a scrubbed environment rooted at `workdir`.
pub fn run_delve(workdir: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_delve"));
    command
        .args(args)
        .current_dir(workdir)
        .env_clear()
        .env("XDG_CONFIG_HOME", workdir.join("xdg"))
        .env("HOME", workdir);
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().expect("delve binary should run")
}

/// Fake engine service that counts requests and returns a fixed report.
pub struct FakeEngine {
    pub url: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl FakeEngine {
    pub fn start(report: Value, sources: Value) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("fake engine should bind");
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .expect("fake engine should have an IP address");
        let hits = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&hits);

        std::thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let path = request.url().to_string();
                log.lock().unwrap().push(path.clone());

                let payload = match path.as_str() {
                    "/research" => json!({"id": "run-7"}),
                    "/research/run-7/report" => json!({"report": report}),
                    "/research/run-7/sources" => json!({"sources": sources}),
                    _ => json!({}),
                };
                let response = tiny_http::Response::from_string(payload.to_string())
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json")
                            .unwrap(),
                    );
                let _ = request.respond(response);
            }
        });

        Self {
            url: format!("http://127.0.0.1:{port}"),
            hits,
        }
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

/// Parse a stream that must hold exactly one JSON document.
pub fn single_document(bytes: &[u8]) -> Value {
    let text = std::str::from_utf8(bytes).expect("stream should be UTF-8");
    let mut documents = serde_json::Deserializer::from_str(text).into_iter::<Value>();
    let first = documents
        .next()
        .expect("stream should hold a document")
        .expect("document should be valid JSON");
    assert!(documents.next().is_none(), "stream holds more than one document");
    first
}

/// The error envelope on stderr: the last line, after any log records.
pub fn envelope(stderr: &[u8]) -> Value {
    let text = std::str::from_utf8(stderr).expect("stderr should be UTF-8");
    let line = text
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .expect("stderr should hold an envelope");
    serde_json::from_str(line).expect("envelope should be one JSON line")
}
