//! # HTTP validator for the availability endpoint.
//!
//! One GET per candidate:
//!
//! ```text
//! GET {endpoint}?request.username={candidate}&request.birthday={birthday}
//!   └─► 200 {"code": 0,  "message": "..."}  → Accepted
//!   └─► 200 {"code": !0, "message": "..."}  → Rejected  (service verdict)
//!   └─► 4xx/5xx, timeout, bad body          → TransportFailed
//! ```
//!
//! The endpoint expects a birthdate alongside every probe; it is fixed for
//! the life of the validator. No retries at this layer.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::candidate::Candidate;
use crate::validate::{Validate, ValidationOutcome};

/// JSON body the endpoint answers with.
#[derive(Debug, Deserialize)]
struct Verdict {
    code: i64,
    #[serde(default)]
    message: String,
}

/// Reqwest-backed validator, safe to share across the worker pool.
pub struct HttpValidator {
    client: reqwest::Client,
    endpoint: String,
    birthday: String,
}

impl HttpValidator {
    /// Builds a validator with a per-probe deadline covering connect,
    /// request, and body read.
    pub fn new(
        endpoint: impl Into<String>,
        birthday: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            birthday: birthday.into(),
        })
    }
}

#[async_trait]
impl Validate for HttpValidator {
    async fn validate(&self, candidate: &Candidate) -> ValidationOutcome {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("request.username", candidate.as_str()),
                ("request.birthday", self.birthday.as_str()),
            ])
            .send()
            .await;

        let response = match response {
            Ok(resp) => resp,
            Err(err) => {
                return ValidationOutcome::TransportFailed {
                    detail: err.to_string(),
                };
            }
        };
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(err) => {
                return ValidationOutcome::TransportFailed {
                    detail: err.to_string(),
                };
            }
        };

        match response.json::<Verdict>().await {
            Ok(verdict) if verdict.code == 0 => ValidationOutcome::Accepted,
            Ok(verdict) => ValidationOutcome::Rejected {
                reason: if verdict.message.is_empty() {
                    format!("code {}", verdict.code)
                } else {
                    verdict.message
                },
            },
            Err(err) => ValidationOutcome::TransportFailed {
                detail: format!("undecodable response body: {err}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BIRTHDAY: &str = "1999-04-20";

    fn validator(server: &MockServer) -> HttpValidator {
        HttpValidator::new(server.uri(), BIRTHDAY, Duration::from_secs(2))
            .expect("build validator")
    }

    #[tokio::test]
    async fn test_code_zero_maps_to_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("request.username", "90125"))
            .and(query_param("request.birthday", BIRTHDAY))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "ok"})),
            )
            .mount(&server)
            .await;

        let outcome = validator(&server).validate(&Candidate::new("90125")).await;
        assert_eq!(outcome, ValidationOutcome::Accepted);
    }

    #[tokio::test]
    async fn test_nonzero_code_maps_to_rejected_with_service_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"code": 1, "message": "already in use"})),
            )
            .mount(&server)
            .await;

        let outcome = validator(&server).validate(&Candidate::new("55555")).await;
        assert_eq!(
            outcome,
            ValidationOutcome::Rejected {
                reason: "already in use".into()
            }
        );
    }

    #[tokio::test]
    async fn test_nonzero_code_without_message_gets_fallback_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 2})))
            .mount(&server)
            .await;

        let outcome = validator(&server).validate(&Candidate::new("31337")).await;
        assert_eq!(
            outcome,
            ValidationOutcome::Rejected {
                reason: "code 2".into()
            }
        );
    }

    #[tokio::test]
    async fn test_server_error_maps_to_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let outcome = validator(&server).validate(&Candidate::new("00001")).await;
        assert!(
            matches!(outcome, ValidationOutcome::TransportFailed { .. }),
            "expected transport failure, got {outcome:?}"
        );
    }

    #[tokio::test]
    async fn test_undecodable_body_maps_to_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let outcome = validator(&server).validate(&Candidate::new("00002")).await;
        assert!(
            matches!(outcome, ValidationOutcome::TransportFailed { .. }),
            "expected transport failure, got {outcome:?}"
        );
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out_as_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"code": 0}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let quick = HttpValidator::new(server.uri(), BIRTHDAY, Duration::from_millis(50))
            .expect("build validator");
        let outcome = quick.validate(&Candidate::new("00003")).await;
        assert!(
            matches!(outcome, ValidationOutcome::TransportFailed { .. }),
            "expected timeout as transport failure, got {outcome:?}"
        );
    }
}
