use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("malformed signal message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unknown event `{0}`")]
    UnknownEvent(String),

    #[error("event `{0}` requires a data payload")]
    MissingPayload(&'static str),

    #[error("invalid connection id `{0}`")]
    InvalidConnectionId(String),

    /// The receiving side of a peer link is gone.
    #[error("peer link closed")]
    LinkClosed,

    /// The peer is not draining its outbound queue.
    #[error("peer link queue is full")]
    LinkSaturated,
}
