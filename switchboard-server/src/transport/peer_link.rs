use switchboard_core::{ServerMessage, SignalError};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Исходящая половина транспорта участника, как её видит координатор.
/// Отправка без ожидания и без подтверждения: сообщение либо ушло в очередь
/// соединения, либо соединение уже закрыто.
pub trait PeerLink: Send + Sync {
    fn deliver(&self, msg: ServerMessage) -> Result<(), SignalError>;
}

/// Bounded per-socket queue. A full queue drops the message instead of
/// waiting for a slow reader.
impl PeerLink for mpsc::Sender<ServerMessage> {
    fn deliver(&self, msg: ServerMessage) -> Result<(), SignalError> {
        self.try_send(msg).map_err(|e| match e {
            TrySendError::Full(_) => SignalError::LinkSaturated,
            TrySendError::Closed(_) => SignalError::LinkClosed,
        })
    }
}

impl PeerLink for mpsc::UnboundedSender<ServerMessage> {
    fn deliver(&self, msg: ServerMessage) -> Result<(), SignalError> {
        self.send(msg).map_err(|_| SignalError::LinkClosed)
    }
}
