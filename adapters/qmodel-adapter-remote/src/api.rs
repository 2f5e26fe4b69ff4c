//! Remote platform REST API client.
//!
//! Two calls, each a single POST with a JSON body:
//!
//! | Call | Request | Response |
//! |------|---------|----------|
//! | `POST /v1/synthesis` | [`SynthesisRequest`] | [`SynthesisResponse`] |
//! | `POST /v1/execution` | [`ExecutionRequest`] | [`ExecutionResponse`] |

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use qmodel_ir::Model;

use crate::error::{RemoteError, RemoteResult, Stage};

/// Header carrying a per-call identifier for server-side correlation.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Remote platform REST API client.
pub struct RemoteClient {
    /// HTTP client with timeouts configured.
    client: Client,
    /// API base URL (without trailing slash).
    base_url: String,
    /// Bearer token, if any.
    token: Option<String>,
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl RemoteClient {
    /// Create a client with the default 60 s request timeout.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> RemoteResult<Self> {
        Self::with_timeout(base_url, token, Duration::from_secs(60))
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> RemoteResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(RemoteError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// The API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform a POST request with a JSON body.
    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        stage: Stage,
        path: &str,
        body: &impl Serialize,
    ) -> RemoteResult<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let request_id = Uuid::new_v4().to_string();
        debug!(%url, %request_id, "POST");

        let mut request = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, &request_id)
            .json(body);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        self.handle_response(stage, resp).await
    }

    /// Handle HTTP response: deserialize JSON or return an error.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        stage: Stage,
        response: reqwest::Response,
    ) -> RemoteResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.json().await?;
            Ok(body)
        } else {
            let text = response.text().await.unwrap_or_default();
            let message = error_message(&text);
            match status {
                StatusCode::UNAUTHORIZED => Err(RemoteError::AuthFailed(message)),
                _ => Err(RemoteError::ApiError {
                    stage,
                    status: status.as_u16(),
                    message,
                }),
            }
        }
    }

    // -----------------------------------------------------------------------
    // Public API methods
    // -----------------------------------------------------------------------

    /// Submit a model for synthesis.
    #[instrument(skip(self, model), fields(model = model.name()))]
    pub async fn synthesize(&self, model: &Model) -> RemoteResult<SynthesisResponse> {
        debug!("Submitting model for synthesis");
        self.post(Stage::Synthesis, "v1/synthesis", &SynthesisRequest { model })
            .await
    }

    /// Execute a synthesized program.
    #[instrument(skip(self, req), fields(program_id = req.program_id, shots = req.shots))]
    pub async fn execute(&self, req: &ExecutionRequest<'_>) -> RemoteResult<ExecutionResponse> {
        debug!("Submitting program for execution");
        self.post(Stage::Execution, "v1/execution", req).await
    }
}

/// Extract the human-readable text from an error body.
///
/// JSON bodies of the form `{"error": ..., "message": ...}` yield `message`
/// (or `error` when there is no message); anything else is returned as is.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorBody {
            error: Some(error),
            message: None,
        }) => error,
        _ => body.trim().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Request / response serde types
// ---------------------------------------------------------------------------

/// Request body for `POST /v1/synthesis`.
#[derive(Debug, Serialize)]
pub struct SynthesisRequest<'a> {
    /// The model to synthesize.
    pub model: &'a Model,
}

/// Response from `POST /v1/synthesis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisResponse {
    /// Identifier of the synthesized program.
    pub program_id: String,
    /// Opaque program payload.
    pub program: serde_json::Value,
}

/// Request body for `POST /v1/execution`.
#[derive(Debug, Serialize)]
pub struct ExecutionRequest<'a> {
    /// Identifier returned by synthesis.
    pub program_id: &'a str,
    /// Payload returned by synthesis, echoed back.
    pub program: &'a serde_json::Value,
    /// Number of shots.
    pub shots: u32,
}

/// Response from `POST /v1/execution`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResponse {
    /// Bit-string counts.
    pub counts: BTreeMap<String, u64>,
    /// Execution time reported by the platform.
    #[serde(default)]
    pub execution_time_ms: Option<u64>,
}

/// Error body shape used by the platform.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}
