mod connection;
mod signaling;

pub use connection::ConnectionId;
pub use signaling::{AnswerRequest, CallRequest, ClientMessage, Opaque, RelayRequest, ServerMessage};
