//! Research engine reached over HTTP.
//!
//! The service keeps research state server-side; `conduct_research` returns
//! an id that the report and source calls address.
//!
//! | Call               | Request                                 | Response             |
//! |--------------------|-----------------------------------------|----------------------|
//! | `conduct_research` | `POST /research {query, report_type}`   | `{"id": "..."}`      |
//! | `write_report`     | `POST /research/{id}/report`            | `{"report": ...}`    |
//! | `source_urls`      | `GET /research/{id}/sources`            | `{"sources": ...}`   |

use async_trait::async_trait;
use delve_config::EngineConfig;
use serde_json::{Value, json};

use crate::engine::ResearchEngine;
use crate::error::EngineError;

/// Client for an engine service. No request timeout is set: a hung engine
/// hangs the worker and the host decides when to give up.
pub struct HttpEngine {
    http: reqwest::Client,
    base_url: String,
    credential: String,
    research_id: Option<String>,
}

impl HttpEngine {
    /// Build a client for the configured engine endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Http`] if the underlying `reqwest::Client`
    /// cannot be built.
    pub fn new(config: &EngineConfig, credential: &str) -> Result<Self, EngineError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            credential: credential.to_string(),
            research_id: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn research_path(&self, suffix: &str) -> Result<String, EngineError> {
        let id = self.research_id.as_deref().ok_or(EngineError::NotStarted)?;
        Ok(format!("{}/research/{id}/{suffix}", self.base_url))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, EngineError> {
        let resp = request
            .header("Authorization", format!("Bearer {}", self.credential))
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| EngineError::Protocol(format!("response is not JSON: {e}")))
    }
}

#[async_trait]
impl ResearchEngine for HttpEngine {
    async fn conduct_research(
        &mut self,
        query: &str,
        report_type: &str,
    ) -> Result<(), EngineError> {
        let url = format!("{}/research", self.base_url);
        let body = json!({ "query": query, "report_type": report_type });
        let started = self.send(self.http.post(&url).json(&body)).await?;

        let id = match started.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => {
                return Err(EngineError::Protocol(
                    "research start response has no id".into(),
                ));
            }
        };
        tracing::debug!(research_id = %id, "engine accepted research");
        self.research_id = Some(id);
        Ok(())
    }

    async fn write_report(&mut self) -> Result<Value, EngineError> {
        let url = self.research_path("report")?;
        let mut body = self.send(self.http.post(&url)).await?;
        take_field(&mut body, "report")
            .ok_or_else(|| EngineError::Protocol("report response has no 'report' field".into()))
    }

    async fn source_urls(&mut self) -> Result<Option<Value>, EngineError> {
        let url = self.research_path("sources")?;
        let mut body = self.send(self.http.get(&url)).await?;
        Ok(take_field(&mut body, "sources"))
    }
}

fn take_field(body: &mut Value, field: &str) -> Option<Value> {
    body.as_object_mut().and_then(|map| map.remove(field))
}

/// Map non-success statuses to [`EngineError::Api`].
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, EngineError> {
    if !resp.status().is_success() {
        return Err(EngineError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn check_response_api_error_keeps_body() {
        let resp = mock_response(502, "upstream search provider down");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Api { status: 502, ref message } if message == "upstream search provider down"
        ));
    }

    #[tokio::test]
    async fn check_response_success() {
        let resp = mock_response(200, "{}");
        assert!(check_response(resp).await.is_ok());
    }

    #[test]
    fn take_field_handles_non_objects() {
        let mut body = json!({"report": "text"});
        assert_eq!(take_field(&mut body, "report"), Some(json!("text")));
        assert_eq!(take_field(&mut body, "report"), None);
        assert_eq!(take_field(&mut json!(["report"]), "report"), None);
    }

    #[tokio::test]
    async fn report_before_research_is_rejected() {
        let config = EngineConfig {
            url: "http://127.0.0.1:9".into(),
            ..Default::default()
        };
        let mut engine = HttpEngine::new(&config, "sk-test").unwrap();
        assert!(matches!(
            engine.write_report().await,
            Err(EngineError::NotStarted)
        ));
        assert!(matches!(
            engine.source_urls().await,
            Err(EngineError::NotStarted)
        ));
    }
}
