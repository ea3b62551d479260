/// Errors surfaced by the list client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// Stable error code from the `code` field, when present.
        code: Option<String>,
        message: String,
    },

    /// The body was not the expected JSON envelope.
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Neither the body nor the headers carried pagination metadata.
    #[error("Response carried no pagination metadata")]
    MissingPagination,
}

impl ClientError {
    /// Message suitable for inline display next to the list.
    pub fn display_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
