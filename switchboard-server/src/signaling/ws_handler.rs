use crate::SignalingService;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use switchboard_core::{ClientMessage, ServerMessage};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service))
}

async fn handle_socket(socket: WebSocket, service: SignalingService) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(service.outbound_buffer());

    let connection_id = match service.coordinator().connect(tx).await {
        Ok(id) => id,
        Err(e) => {
            error!("Rejecting WebSocket connection: {}", e);
            return;
        }
    };
    info!("New WebSocket connection: {}", connection_id);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match msg.to_json() {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize signal message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let coordinator = service.coordinator().clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match ClientMessage::from_json(text.as_str()) {
                        Ok(signal) => {
                            debug!(
                                "{} from {} to {}",
                                signal.event_name(),
                                connection_id,
                                signal.target()
                            );
                            if let Err(e) = coordinator.dispatch(connection_id, signal).await {
                                error!("Coordinator died: {}", e);
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid signal message from {}: {}", connection_id, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    if let Err(e) = service.coordinator().disconnect(connection_id).await {
        error!("Failed to deregister {}: {}", connection_id, e);
    }
    info!("WebSocket disconnected: {}", connection_id);
}
