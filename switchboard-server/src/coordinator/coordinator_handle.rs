use crate::coordinator::CoordinatorCommand;
use crate::error::RelayError;
use crate::transport::PeerLink;
use switchboard_core::{ClientMessage, ConnectionId};
use tokio::sync::{mpsc, oneshot};

/// Cloneable entry point to a running coordinator. Every call is a command
/// queued behind the ones sent before it from the same task.
#[derive(Clone)]
pub struct CoordinatorHandle {
    command_tx: mpsc::Sender<CoordinatorCommand>,
}

impl CoordinatorHandle {
    pub fn new(command_tx: mpsc::Sender<CoordinatorCommand>) -> Self {
        Self { command_tx }
    }

    /// Registers a new participant. The link receives `identity-assigned`
    /// before this returns.
    pub async fn connect<L>(&self, link: L) -> Result<ConnectionId, RelayError>
    where
        L: PeerLink + 'static,
    {
        let (reply, reply_rx) = oneshot::channel();
        self.send(CoordinatorCommand::Connect {
            link: Box::new(link),
            reply,
        })
        .await?;
        reply_rx.await.map_err(|_| RelayError::CoordinatorClosed)
    }

    pub async fn dispatch(
        &self,
        sender: ConnectionId,
        message: ClientMessage,
    ) -> Result<(), RelayError> {
        self.send(CoordinatorCommand::Signal { sender, message }).await
    }

    pub async fn disconnect(&self, connection_id: ConnectionId) -> Result<(), RelayError> {
        self.send(CoordinatorCommand::Disconnect { connection_id }).await
    }

    pub async fn connected_count(&self) -> Result<usize, RelayError> {
        let (reply, reply_rx) = oneshot::channel();
        self.send(CoordinatorCommand::Census { reply }).await?;
        reply_rx.await.map_err(|_| RelayError::CoordinatorClosed)
    }

    async fn send(&self, cmd: CoordinatorCommand) -> Result<(), RelayError> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| RelayError::CoordinatorClosed)
    }
}
