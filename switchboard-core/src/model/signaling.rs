use crate::SignalError;
use crate::model::connection::ConnectionId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Opaque negotiation data (SDP offer/answer, ICE candidate, app payload).
///
/// Kept as raw JSON text so it is forwarded exactly as received.
pub type Opaque = Box<RawValue>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    pub user_to_call: ConnectionId,
    pub signal_data: Opaque,
    pub from: ConnectionId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub signal: Opaque,
    pub to: ConnectionId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayRequest {
    pub to: ConnectionId,
    pub payload: Opaque,
}

/// Frames a browser sends to the relay.
///
/// The relay only decodes these (`from_json`); `Serialize` and `to_json` are
/// the client-side encoder, producing the same envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    Call(CallRequest),
    Answer(AnswerRequest),
    RelayNegotiationUpdate(RelayRequest),
}

/// Frames the relay pushes to a browser.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    IdentityAssigned(ConnectionId),
    IncomingCall {
        signal: Opaque,
        from: ConnectionId,
        name: String,
    },
    CallAccepted(Opaque),
    CallEnded,
    CallFailed {
        to: ConnectionId,
    },
    RelayNegotiationUpdate(Opaque),
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Option<Opaque>,
}

impl ClientMessage {
    pub const CALL: &'static str = "call";
    pub const ANSWER: &'static str = "answer";
    pub const RELAY_NEGOTIATION_UPDATE: &'static str = "relay-negotiation-update";

    /// Parses one text frame. The envelope is read first and the payload is
    /// decoded against the event it names, leaving opaque fields untouched.
    pub fn from_json(text: &str) -> Result<Self, SignalError> {
        let Envelope { event, data } = serde_json::from_str(text)?;

        match event.as_str() {
            Self::CALL => Ok(Self::Call(decode(Self::CALL, data)?)),
            Self::ANSWER => Ok(Self::Answer(decode(Self::ANSWER, data)?)),
            Self::RELAY_NEGOTIATION_UPDATE => Ok(Self::RelayNegotiationUpdate(decode(
                Self::RELAY_NEGOTIATION_UPDATE,
                data,
            )?)),
            _ => Err(SignalError::UnknownEvent(event)),
        }
    }

    /// Encodes the frame as a client would send it.
    pub fn to_json(&self) -> Result<String, SignalError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Call(_) => Self::CALL,
            Self::Answer(_) => Self::ANSWER,
            Self::RelayNegotiationUpdate(_) => Self::RELAY_NEGOTIATION_UPDATE,
        }
    }

    /// The connection this frame is addressed to.
    pub fn target(&self) -> ConnectionId {
        match self {
            Self::Call(req) => req.user_to_call,
            Self::Answer(req) => req.to,
            Self::RelayNegotiationUpdate(req) => req.to,
        }
    }
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, SignalError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn decode<T: DeserializeOwned>(event: &'static str, data: Option<Opaque>) -> Result<T, SignalError> {
    let data = data.ok_or(SignalError::MissingPayload(event))?;
    Ok(serde_json::from_str(data.get())?)
}
