//! Blocking HTTP client for the remote triangle service.
//!
//! Every call returns the raw status and decoded JSON body; interpreting
//! status codes is left to the caller.

use crate::client::settings::ApiConfig;
use crate::errors::{ProbeError, ProbeResult};
use crate::geometry::sides::SideTriple;
use reqwest::Method;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Separator the service assumes when none is sent.
pub const DEFAULT_SEPARATOR: &str = ";";

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTriangle {
    /// Delimiter between sides in `input`; omitted from the JSON when `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    /// Sides joined by the separator
    pub input: String,
}

impl CreateTriangle {
    /// Builds a request joining `sides` with `separator`.
    #[must_use]
    pub fn new(sides: &SideTriple, separator: &str) -> Self {
        Self {
            separator: Some(separator.to_string()),
            input: sides.to_input(separator),
        }
    }

    /// Builds a request without a `separator` key, relying on the default.
    #[must_use]
    pub fn without_separator(sides: &SideTriple) -> Self {
        Self {
            separator: None,
            input: sides.to_input(DEFAULT_SEPARATOR),
        }
    }
}

/// A stored triangle as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriangleRecord {
    /// Service-assigned identifier
    pub id: String,
    /// First side
    pub first_side: f64,
    /// Second side
    pub second_side: f64,
    /// Third side
    pub third_side: f64,
}

impl TriangleRecord {
    /// The record's sides as a triple.
    #[must_use]
    pub const fn sides(&self) -> SideTriple {
        SideTriple::new(self.first_side, self.second_side, self.third_side)
    }
}

/// Body of the perimeter and area endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// Computed value
    pub result: f64,
}

/// Error body returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceError {
    /// Reason phrase, e.g. `Unprocessable Entity`
    #[serde(default)]
    pub error: String,
    /// Human readable detail, e.g. `Cannot process input`
    #[serde(default)]
    pub message: String,
}

/// Status and decoded body of a service response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Method and path of the request, for diagnostics
    pub endpoint: String,
    /// HTTP status code
    pub status: u16,
    /// `Content-Type` header, if any
    pub content_type: Option<String>,
    /// JSON body; `Null` when empty, a JSON string when not valid JSON
    pub body: Value,
}

impl ApiResponse {
    fn read(endpoint: String, response: Response) -> ProbeResult<Self> {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let text = response.text()?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text))
        };
        log::debug!("{endpoint} -> {status}");
        Ok(Self {
            endpoint,
            status,
            content_type,
            body,
        })
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Whether the body was served as JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|value| value.starts_with("application/json"))
    }

    /// Fails unless the status equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::UnexpectedStatus`] on a mismatch.
    pub fn expect_status(&self, expected: u16) -> ProbeResult<&Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(ProbeError::UnexpectedStatus {
                endpoint: self.endpoint.clone(),
                expected,
                actual: self.status,
                body: self.body.to_string(),
            })
        }
    }

    /// Decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> ProbeResult<T> {
        serde_json::from_value(self.body.clone())
            .map_err(|e| ProbeError::Decode(format!("{}: {e}", self.endpoint)))
    }

    /// Decodes the body as a service error, if it is one.
    #[must_use]
    pub fn service_error(&self) -> Option<ServiceError> {
        self.json::<ServiceError>()
            .ok()
            .filter(|err| !err.error.is_empty())
    }
}

/// Client for the triangle resource.
#[derive(Debug, Clone)]
pub struct TriangleClient {
    client: Client,
    config: ApiConfig,
}

impl TriangleClient {
    /// Builds a client from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: ApiConfig) -> ProbeResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Settings this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Same client with a different token, e.g. for authorization tests.
    #[must_use]
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone().with_token(token),
        }
    }

    /// Resolves path segments beneath the base URL, percent-encoding each.
    fn url(&self, segments: &[&str]) -> ProbeResult<Url> {
        let mut url = self.config.base_url.clone();
        if segments.is_empty() {
            return Ok(url);
        }
        url.path_segments_mut()
            .map_err(|()| {
                ProbeError::InvalidParameters(format!(
                    "base URL {} cannot carry path segments",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn send(&self, method: Method, url: Url, body: Option<String>) -> ProbeResult<ApiResponse> {
        let endpoint = format!("{method} {}", url.path());
        let mut request = self
            .client
            .request(method, url)
            .header(self.config.auth_header.as_str(), self.config.token.as_str())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(body) = body {
            request = request.body(body);
        }
        let response = request.send()?;
        ApiResponse::read(endpoint, response)
    }

    /// Sends an arbitrary method to the given path, for method-not-allowed
    /// checks.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Transport`] if the request fails in transit.
    pub fn request(&self, method: Method, segments: &[&str]) -> ProbeResult<ApiResponse> {
        let url = self.url(segments)?;
        self.send(method, url, None)
    }

    /// `POST /` with a typed body.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Serialization`] if the body cannot be encoded, or
    /// [`ProbeError::Transport`] if the request fails in transit.
    pub fn create(&self, request: &CreateTriangle) -> ProbeResult<ApiResponse> {
        let body = serde_json::to_string(request)
            .map_err(|e| ProbeError::Serialization(e.to_string()))?;
        self.create_raw(Some(&body))
    }

    /// `POST /` with a raw body, or none at all.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Transport`] if the request fails in transit.
    pub fn create_raw(&self, body: Option<&str>) -> ProbeResult<ApiResponse> {
        let url = self.url(&[])?;
        self.send(Method::POST, url, body.map(str::to_string))
    }

    /// `GET /{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Transport`] if the request fails in transit.
    pub fn get(&self, id: &str) -> ProbeResult<ApiResponse> {
        self.request(Method::GET, &[id])
    }

    /// `GET /all`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Transport`] if the request fails in transit.
    pub fn all(&self) -> ProbeResult<ApiResponse> {
        self.request(Method::GET, &["all"])
    }

    /// `DELETE /{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Transport`] if the request fails in transit.
    pub fn delete(&self, id: &str) -> ProbeResult<ApiResponse> {
        self.request(Method::DELETE, &[id])
    }

    /// `GET /{id}/perimeter`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Transport`] if the request fails in transit.
    pub fn perimeter(&self, id: &str) -> ProbeResult<ApiResponse> {
        self.request(Method::GET, &[id, "perimeter"])
    }

    /// `GET /{id}/area`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Transport`] if the request fails in transit.
    pub fn area(&self, id: &str) -> ProbeResult<ApiResponse> {
        self.request(Method::GET, &[id, "area"])
    }
}
