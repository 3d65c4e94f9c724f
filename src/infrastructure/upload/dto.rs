use serde::Deserialize;

/// Upload service token response.
#[derive(Debug, Deserialize)]
pub struct ImageResponse {
    /// Token identifying the hosted image.
    #[serde(default)]
    pub id: Option<String>,
}

/// Upload service error response.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error message from the service.
    pub message: String,
}
