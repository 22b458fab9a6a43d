//! Network access to the records service.
//!
//! [`EmployeeGateway`] is the seam between the directory store and the
//! transport. [`HttpEmployeeGateway`] talks to the REST API with `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::record::{EmployeeInput, EmployeeRecord};

/// Failures surfaced by the client data layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport error text.
        message: String,
    },
    /// The service answered with a non-success status.
    #[error("{method} {url} returned {status}: {message}")]
    Status {
        /// HTTP method of the request.
        method: String,
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
        /// Service error message, or the body or status reason.
        message: String,
    },
    /// A success response carried an unexpected body.
    #[error("could not decode response from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder error text.
        message: String,
    },
}

impl ClientError {
    /// HTTP status for [`ClientError::Status`] failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// Whether the service reported the employee as unknown.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

/// Port for the four records-service calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeGateway: Send + Sync {
    /// Fetch every employee.
    async fn list(&self) -> Result<Vec<EmployeeRecord>, ClientError>;

    /// Create an employee and return it with its assigned identifier.
    async fn create(&self, input: &EmployeeInput) -> Result<EmployeeRecord, ClientError>;

    /// Replace every field of an existing employee.
    async fn update(&self, id: i32, input: &EmployeeInput)
    -> Result<EmployeeRecord, ClientError>;

    /// Delete an employee.
    async fn delete(&self, id: i32) -> Result<(), ClientError>;
}

/// Error envelope returned by the service; only the message is used.
#[derive(Deserialize)]
struct ErrorEnvelope {
    message: String,
}

/// `reqwest`-backed gateway rooted at the collection URL, for example
/// `http://localhost:8080/api/employee`.
#[derive(Debug, Clone)]
pub struct HttpEmployeeGateway {
    client: Client,
    base_url: String,
}

impl HttpEmployeeGateway {
    /// Create a gateway for the given collection URL.
    ///
    /// # Examples
    /// ```
    /// use employee_client::HttpEmployeeGateway;
    ///
    /// let gateway = HttpEmployeeGateway::new("http://localhost:8080/api/employee/");
    /// assert_eq!(gateway.base_url(), "http://localhost:8080/api/employee");
    /// ```
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a gateway reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let url: String = base_url.into();
        Self {
            client,
            base_url: url.trim_end_matches('/').to_owned(),
        }
    }

    /// Collection URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn member_url(&self, id: i32) -> String {
        format!("{}/{id}", self.base_url)
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&EmployeeInput>,
    ) -> Result<Response, ClientError> {
        let mut request = self.client.request(method.clone(), url);
        if let Some(payload) = body {
            request = request.json(payload);
        }
        let response = request.send().await.map_err(|err| ClientError::Transport {
            url: url.to_owned(),
            message: err.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            method: method.to_string(),
            url: url.to_owned(),
            status: status.as_u16(),
            message: error_message(status, &text),
        })
    }
}

/// Prefer the service's error message, falling back to the raw body or the
/// status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_owned()
    } else {
        trimmed.to_owned()
    }
}

async fn decode<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, ClientError> {
    response.json::<T>().await.map_err(|err| ClientError::Decode {
        url: url.to_owned(),
        message: err.to_string(),
    })
}

#[async_trait]
impl EmployeeGateway for HttpEmployeeGateway {
    async fn list(&self) -> Result<Vec<EmployeeRecord>, ClientError> {
        let url = self.base_url.as_str();
        let response = self.send(Method::GET, url, None).await?;
        decode(response, url).await
    }

    async fn create(&self, input: &EmployeeInput) -> Result<EmployeeRecord, ClientError> {
        let url = self.base_url.as_str();
        let response = self.send(Method::POST, url, Some(input)).await?;
        decode(response, url).await
    }

    async fn update(
        &self,
        id: i32,
        input: &EmployeeInput,
    ) -> Result<EmployeeRecord, ClientError> {
        let url = self.member_url(id);
        let response = self.send(Method::PUT, &url, Some(input)).await?;
        decode(response, &url).await
    }

    async fn delete(&self, id: i32) -> Result<(), ClientError> {
        let url = self.member_url(id);
        self.send(Method::DELETE, &url, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        StatusCode::NOT_FOUND,
        r#"{"code":"not_found","message":"employee 9 not found"}"#,
        "employee 9 not found"
    )]
    #[case(StatusCode::BAD_GATEWAY, "upstream down", "upstream down")]
    #[case(StatusCode::SERVICE_UNAVAILABLE, "", "Service Unavailable")]
    fn error_message_prefers_envelope(
        #[case] status: StatusCode,
        #[case] body: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(error_message(status, body), expected);
    }

    #[rstest]
    fn member_url_appends_identifier() {
        let gateway = HttpEmployeeGateway::new("http://records.test/api/employee");
        assert_eq!(gateway.member_url(7), "http://records.test/api/employee/7");
    }

    #[rstest]
    fn not_found_is_detected_from_status() {
        let err = ClientError::Status {
            method: "DELETE".to_owned(),
            url: "http://records.test/api/employee/9".to_owned(),
            status: 404,
            message: "employee 9 not found".to_owned(),
        };
        assert!(err.is_not_found());
        assert!(
            !ClientError::Transport {
                url: String::new(),
                message: "refused".to_owned(),
            }
            .is_not_found()
        );
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        // Port 9 (discard) on loopback is closed in test environments.
        let gateway = HttpEmployeeGateway::new("http://127.0.0.1:9/api/employee");
        let err = gateway.list().await.expect_err("connection refused");
        assert!(matches!(err, ClientError::Transport { .. }));
    }
}
