use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong around one simulation run.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Endpoint unreachable, timed out, or the body stream broke.
    #[error("transport error talking to {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Reserved for input checks; the request path never raises it.
    #[error("invalid run parameters: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("engine returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("engine rejected the run ({status}): {message}")]
    Engine { status: StatusCode, message: String },

    #[error("undecodable engine response: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Transport { .. } => "transport",
            ClientError::Protocol(_) => "protocol",
            ClientError::Validation(_) => "validation",
        }
    }
}
