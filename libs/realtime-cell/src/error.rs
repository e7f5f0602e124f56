use thiserror::Error;

#[derive(Error, Debug)]
pub enum RealtimeError {
    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Send failed: {0}")]
    Send(String),

    #[error("Frame serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
