use thiserror::Error;

pub type Result<T, E = BridgeError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("{0}")]
    Serde(#[from] serde_json::Error),
    /// The client transport hung up and took the outbound queue with it.
    #[error("outbound channel closed")]
    ChannelClosed,
}
