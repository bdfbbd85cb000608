use crate::config::RelayConfig;
use crate::coordinator::{CoordinatorCommand, CoordinatorHandle, Directory};
use crate::transport::PeerLink;
use switchboard_core::{
    AnswerRequest, CallRequest, ClientMessage, ConnectionId, RelayRequest, ServerMessage,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Signaling coordinator: owns the directory of live connections and routes
/// addressed messages between them. Commands are handled strictly one at a
/// time, so a lookup and its forward never interleave with a removal.
pub struct Coordinator {
    directory: Directory,
    command_rx: mpsc::Receiver<CoordinatorCommand>,
    report_unknown_target: bool,
}

impl Coordinator {
    pub fn new(command_rx: mpsc::Receiver<CoordinatorCommand>, config: &RelayConfig) -> Self {
        Self {
            directory: Directory::new(),
            command_rx,
            report_unknown_target: config.report_unknown_target,
        }
    }

    /// Starts the event loop on the current runtime and returns its handle.
    /// The loop ends once every handle has been dropped.
    pub fn spawn(config: &RelayConfig) -> CoordinatorHandle {
        let (tx, rx) = mpsc::channel(config.command_buffer.max(1));
        tokio::spawn(Self::new(rx, config).run());
        CoordinatorHandle::new(tx)
    }

    pub async fn run(mut self) {
        info!("Coordinator event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        info!("Command channel closed. Coordinator finished");
    }

    fn handle_command(&mut self, cmd: CoordinatorCommand) {
        match cmd {
            CoordinatorCommand::Connect { link, reply } => {
                let id = self.connect(link);
                if reply.send(id).is_err() {
                    // The socket task gave up before learning its id; nobody
                    // will ever send Disconnect for it.
                    self.disconnect(id);
                }
            }

            CoordinatorCommand::Signal { sender, message } => self.route(sender, message),

            CoordinatorCommand::Disconnect { connection_id } => self.disconnect(connection_id),

            CoordinatorCommand::Census { reply } => {
                let _ = reply.send(self.directory.len());
            }
        }
    }

    fn connect(&mut self, link: Box<dyn PeerLink>) -> ConnectionId {
        let id = self.directory.insert(link);
        info!("Participant {} connected ({} online)", id, self.directory.len());

        self.forward(&id, ServerMessage::IdentityAssigned(id));
        id
    }

    fn route(&mut self, sender: ConnectionId, message: ClientMessage) {
        match message {
            ClientMessage::Call(CallRequest {
                user_to_call,
                signal_data,
                from,
                name,
            }) => {
                let msg = ServerMessage::IncomingCall {
                    signal: signal_data,
                    from,
                    name,
                };
                if !self.forward(&user_to_call, msg) && self.report_unknown_target {
                    self.forward(&sender, ServerMessage::CallFailed { to: user_to_call });
                }
            }

            ClientMessage::Answer(AnswerRequest { signal, to }) => {
                self.forward(&to, ServerMessage::CallAccepted(signal));
            }

            ClientMessage::RelayNegotiationUpdate(RelayRequest { to, payload }) => {
                self.forward(&to, ServerMessage::RelayNegotiationUpdate(payload));
            }
        }
    }

    /// Delivers to a live entry. Returns `false` when the message was dropped.
    fn forward(&self, target: &ConnectionId, msg: ServerMessage) -> bool {
        let Some(link) = self.directory.get(target) else {
            debug!("Dropping message for unknown target {}", target);
            return false;
        };

        match link.deliver(msg) {
            Ok(()) => true,
            Err(e) => {
                warn!("Dropping message for {}: {}", target, e);
                false
            }
        }
    }

    fn disconnect(&mut self, id: ConnectionId) {
        if !self.directory.remove(&id) {
            debug!("Disconnect for {} ignored, already removed", id);
            return;
        }

        info!(
            "Participant {} disconnected ({} online)",
            id,
            self.directory.len()
        );

        for (peer_id, link) in self.directory.iter() {
            if let Err(e) = link.deliver(ServerMessage::CallEnded) {
                warn!("Failed to notify {} of call end: {}", peer_id, e);
            }
        }
    }
}
