use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Backend(String),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid response from {endpoint}: {reason}")]
    Invalid {
        endpoint: &'static str,
        reason: String,
    },

    #[error("Unsupported top_k value: {0}")]
    InvalidTopK(u32),
}

impl ClientError {
    /// Message shown to the user, or `fallback` when the error renders empty.
    pub fn message_or(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
