use crate::transport::PeerLink;
use switchboard_core::{ClientMessage, ConnectionId};
use tokio::sync::oneshot;

/// Команды, поступающие в координатор от WebSocket-соединений.
pub enum CoordinatorCommand {
    /// Новое транспортное соединение: выдать идентификатор и зарегистрировать канал.
    Connect {
        link: Box<dyn PeerLink>,
        reply: oneshot::Sender<ConnectionId>,
    },

    /// Сигнальное сообщение от участника, адресованное другому участнику.
    Signal {
        sender: ConnectionId,
        message: ClientMessage,
    },

    /// Сигнал о разрыве WebSocket соединения.
    Disconnect { connection_id: ConnectionId },

    /// Запрос количества подключенных участников.
    Census { reply: oneshot::Sender<usize> },
}
