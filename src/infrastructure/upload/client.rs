//! Upload service HTTP client.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, header};
use tracing::{debug, warn};

use super::dto::{ErrorResponse, ImageResponse};
use crate::domain::errors::UploadError;
use crate::domain::ports::UploadPort;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("rpc-image/", env!("CARGO_PKG_VERSION"));
const UPLOAD_PART_NAME: &str = "temp";
const UPLOAD_FILE_NAME: &str = "image.png";
const DEFAULT_RETRY_AFTER_MS: u64 = 5000;

/// HTTP client for the image upload service.
///
/// `GET {base}/image?url=..` resolves external URLs and `POST {base}/upload`
/// accepts a multipart image. Both answer `{"id": "<token>"}`.
pub struct UploadApiClient {
    client: Client,
    base_url: String,
}

impl UploadApiClient {
    /// Creates client for the given service base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, UploadError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| UploadError::unexpected(format!("failed to create HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn map_send_error(e: &reqwest::Error) -> UploadError {
        warn!(error = %e, "Failed to reach upload service");
        if e.is_timeout() {
            UploadError::network("request timed out")
        } else if e.is_connect() {
            UploadError::network("failed to connect to upload service")
        } else {
            UploadError::network(e.to_string())
        }
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> UploadError {
        let retry_after_ms = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map_or(DEFAULT_RETRY_AFTER_MS, |secs| secs.saturating_mul(1000));

        let error_message = match response.json::<ErrorResponse>().await {
            Ok(error) => error.message,
            Err(_) => format!("HTTP {status}"),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => UploadError::rejected(error_message),
            StatusCode::TOO_MANY_REQUESTS => UploadError::RateLimited { retry_after_ms },
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                UploadError::network("upload service is temporarily unavailable")
            }
            _ => UploadError::unexpected(format!("unexpected response: {status} - {error_message}")),
        }
    }

    async fn read_token(response: reqwest::Response) -> Result<String, UploadError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let body: ImageResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse upload service response");
            UploadError::unexpected(format!("failed to parse response: {e}"))
        })?;

        token_from(body)
    }
}

fn token_from(body: ImageResponse) -> Result<String, UploadError> {
    body.id
        .filter(|id| !id.trim().is_empty())
        .ok_or(UploadError::EmptyResponse)
}

#[async_trait]
impl UploadPort for UploadApiClient {
    async fn lookup_external(&self, url: &str) -> Result<String, UploadError> {
        debug!(url = %url, "Requesting external image token");

        let response = self
            .client
            .get(self.endpoint("image"))
            .query(&[("url", url)])
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        Self::read_token(response).await
    }

    async fn upload(&self, bytes: Bytes) -> Result<String, UploadError> {
        debug!(size = bytes.len(), "Uploading image bytes");

        let part = Part::bytes(bytes.to_vec())
            .file_name(UPLOAD_FILE_NAME)
            .mime_str("image/png")
            .map_err(|e| UploadError::unexpected(format!("invalid upload part: {e}")))?;
        let form = Form::new().part(UPLOAD_PART_NAME, part);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        Self::read_token(response).await
    }
}

impl std::fmt::Debug for UploadApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
