use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::security::Review;

use super::parser::decode_verdict;
use super::prompt::build_review_prompt;

/// Anything that can review a normalized command before it runs.
pub trait Advisor {
    /// One bounded attempt. Never fails: problems come back as
    /// `Review::Unavailable`.
    fn review(&self, command: &str) -> impl Future<Output = Review>;
}

/// Body of a non-streaming `/api/generate` call.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Error)]
enum AdvisoryError {
    #[error("advisory request timed out after {0:?}")]
    Timeout(Duration),
    #[error("advisory service returned {0}")]
    Status(StatusCode),
    #[error("advisory request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("malformed advisory response: {0}")]
    Malformed(#[source] reqwest::Error),
}

/// HTTP client for a local Ollama-style generate endpoint.
pub struct AdvisoryClient {
    client: reqwest::Client,
    pub url: String,
    pub model: String,
    pub timeout: Duration,
}

impl AdvisoryClient {
    pub fn new(url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build advisory HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
            model: model.into(),
            timeout,
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String, AdvisoryError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AdvisoryError::Timeout(self.timeout)
                } else {
                    AdvisoryError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisoryError::Status(status));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AdvisoryError::Timeout(self.timeout)
            } else {
                AdvisoryError::Malformed(e)
            }
        })?;
        Ok(parsed.response)
    }
}

impl Advisor for AdvisoryClient {
    async fn review(&self, command: &str) -> Review {
        let prompt = build_review_prompt(command);

        // The client timeout covers the request; this bounds the whole call,
        // body read included.
        let reply = match tokio::time::timeout(self.timeout, self.generate(&prompt)).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                warn!("advisory unavailable: {}", e);
                return Review::Unavailable(e.to_string());
            }
            Err(_) => {
                let e = AdvisoryError::Timeout(self.timeout);
                warn!("advisory unavailable: {}", e);
                return Review::Unavailable(e.to_string());
            }
        };

        debug!(reply = %reply.trim(), "advisory reply");
        match decode_verdict(&reply) {
            Some(verdict) => Review::Verdict(verdict),
            None => {
                warn!("advisory reply had no verdict: {:?}", reply);
                Review::Unavailable(format!("unrecognised advisory reply: {}", reply.trim()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::Verdict;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout: Duration) -> AdvisoryClient {
        AdvisoryClient::new(format!("{}/api/generate", server.uri()), "phi3:mini", timeout).unwrap()
    }

    async fn respond_with(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_safe_reply() {
        let server =
            respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "SAFE"})))
                .await;
        let client = client_for(&server, Duration::from_secs(3));

        assert_eq!(client.review("ls -la").await, Review::Verdict(Verdict::Safe));
    }

    #[tokio::test]
    async fn test_warning_reply() {
        let server = respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({"response": "WARNING: this deletes your home directory", "done": true}),
        ))
        .await;
        let client = client_for(&server, Duration::from_secs(3));

        assert_eq!(
            client.review("rm -rf ~").await,
            Review::Verdict(Verdict::Warning("this deletes your home directory".to_string()))
        );
    }

    #[tokio::test]
    async fn test_request_body_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({"model": "phi3:mini", "stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "SAFE"})))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server, Duration::from_secs(3));

        client.review("git status").await;

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let prompt = body["prompt"].as_str().unwrap();
        assert!(prompt.ends_with("Command: git status"));
    }

    #[tokio::test]
    async fn test_unrecognised_reply_is_unavailable() {
        let server = respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "Looks fine to me"})),
        )
        .await;
        let client = client_for(&server, Duration::from_secs(3));

        assert!(matches!(client.review("ls").await, Review::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_unavailable() {
        let server =
            respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "SAFE"}))).await;
        let client = client_for(&server, Duration::from_secs(3));

        assert!(matches!(client.review("ls").await, Review::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_non_json_body_is_unavailable() {
        let server = respond_with(ResponseTemplate::new(200).set_body_string("SAFE")).await;
        let client = client_for(&server, Duration::from_secs(3));

        assert!(matches!(client.review("ls").await, Review::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let server = respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"response": "SAFE"})),
        )
        .await;
        let client = client_for(&server, Duration::from_secs(3));

        match client.review("ls").await {
            Review::Unavailable(reason) => assert!(reason.contains("500")),
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_unavailable() {
        let server = respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"response": "SAFE"}))
                .set_delay(Duration::from_secs(5)),
        )
        .await;
        let client = client_for(&server, Duration::from_millis(200));

        let started = std::time::Instant::now();
        let review = client.review("ls").await;
        assert!(matches!(review, Review::Unavailable(_)));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_connection_refused_is_unavailable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            AdvisoryClient::new(format!("http://{addr}/api/generate"), "phi3:mini", Duration::from_secs(2))
                .unwrap();

        assert!(matches!(client.review("ls").await, Review::Unavailable(_)));
    }
}
