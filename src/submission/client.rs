//! Backend boundary for application submission.

use super::error::{FieldError, SubmissionError};
use super::payload::ApplicationPayload;
use crate::config::WizardConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Confirmation returned for a created application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: String,
    #[serde(default)]
    pub application_number: Option<String>,
}

impl SubmissionReceipt {
    /// The reference to show the applicant: the application number when
    /// the backend assigned one, otherwise the record id.
    pub fn reference(&self) -> &str {
        self.application_number.as_deref().unwrap_or(&self.id)
    }
}

/// Performs the network call for a submission, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationApi: Send + Sync {
    /// Create an application from the mapped payload
    async fn submit(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<SubmissionReceipt, SubmissionError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<FieldError>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Map a backend response onto the submission outcome.
///
/// - 2xx with a receipt body succeeds.
/// - 400/422 with a non-empty `errors` list is a structured rejection.
/// - Anything else is a generic failure carrying the best message found.
pub fn interpret_response(
    status: StatusCode,
    body: &str,
) -> Result<SubmissionReceipt, SubmissionError> {
    if status.is_success() {
        return serde_json::from_str(body).map_err(|e| {
            SubmissionError::Failed(format!("Unexpected response from server: {e}"))
        });
    }

    let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
    let structured = matches!(
        status,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY
    );

    match parsed {
        Some(body) if structured && !body.errors.is_empty() => {
            Err(SubmissionError::Validation {
                errors: body.errors,
            })
        }
        Some(ErrorBody {
            message: Some(message),
            ..
        })
        | Some(ErrorBody {
            error: Some(message),
            ..
        }) => Err(SubmissionError::Failed(message)),
        _ => Err(SubmissionError::Failed(format!(
            "Server returned {status}"
        ))),
    }
}

/// JSON-over-HTTP implementation posting to `{base_url}/applications`.
#[derive(Debug, Clone)]
pub struct HttpApplicationApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpApplicationApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SubmissionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmissionError::Failed(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Build a client from the configured base URL and request timeout.
    pub fn from_config(config: &WizardConfig) -> Result<Self, SubmissionError> {
        let base_url = config.api_base_url.as_deref().ok_or_else(|| {
            SubmissionError::Failed("No applications API base URL configured".to_string())
        })?;
        Self::new(base_url, config.request_timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn endpoint(&self) -> String {
        format!("{}/applications", self.base_url)
    }
}

#[async_trait]
impl ApplicationApi for HttpApplicationApi {
    async fn submit(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let url = self.endpoint();
        debug!(%url, "Submitting application");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Application request failed");
                SubmissionError::Failed(format!("Could not reach the server: {e}"))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SubmissionError::Failed(e.to_string()))?;
        debug!(%status, "Application response received");

        interpret_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_becomes_receipt() {
        let receipt = interpret_response(
            StatusCode::CREATED,
            r#"{"id": "a1b2", "application_number": "APP-2024-0007"}"#,
        )
        .unwrap();

        assert_eq!(receipt.id, "a1b2");
        assert_eq!(receipt.reference(), "APP-2024-0007");
    }

    #[test]
    fn receipt_without_number_falls_back_to_id() {
        let receipt = interpret_response(StatusCode::OK, r#"{"id": "a1b2"}"#).unwrap();
        assert_eq!(receipt.reference(), "a1b2");
    }

    #[test]
    fn malformed_success_body_is_a_generic_failure() {
        let result = interpret_response(StatusCode::OK, "<html>");
        assert!(matches!(result, Err(SubmissionError::Failed(_))));
    }

    #[test]
    fn field_errors_become_structured_rejection() {
        let result = interpret_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"errors": [{"field": "email_address", "message": "already registered"}]}"#,
        );

        match result {
            Err(SubmissionError::Validation { errors }) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "email_address");
            }
            other => panic!("Expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn server_error_message_is_kept() {
        let result = interpret_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message": "database unavailable"}"#,
        );
        assert_eq!(
            result,
            Err(SubmissionError::Failed("database unavailable".to_string()))
        );
    }

    #[test]
    fn unreadable_error_body_reports_status() {
        let result = interpret_response(StatusCode::BAD_GATEWAY, "");
        match result {
            Err(SubmissionError::Failed(message)) => assert!(message.contains("502")),
            other => panic!("Expected generic failure, got {other:?}"),
        }
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let api = HttpApplicationApi::new("https://api.example.org/v1/", Duration::from_secs(5))
            .unwrap();
        assert_eq!(api.endpoint(), "https://api.example.org/v1/applications");
    }

    #[test]
    fn from_config_uses_base_url_and_timeout() {
        let config = WizardConfig {
            api_base_url: Some("https://members.example.org/".to_string()),
            request_timeout_secs: 12,
            ..Default::default()
        };

        let api = HttpApplicationApi::from_config(&config).unwrap();
        assert_eq!(api.endpoint(), "https://members.example.org/applications");
        assert_eq!(api.timeout(), Duration::from_secs(12));
    }

    #[test]
    fn from_config_requires_base_url() {
        let result = HttpApplicationApi::from_config(&WizardConfig::default());
        assert!(matches!(result, Err(SubmissionError::Failed(_))));
    }
}
