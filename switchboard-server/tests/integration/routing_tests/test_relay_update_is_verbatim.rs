use serde_json::json;
use switchboard_server::RelayConfig;

use crate::integration::{init_tracing, start_test_server};
use crate::utils::TestClient;

#[tokio::test]
async fn test_relay_update_is_verbatim() {
    init_tracing();

    let (addr, _coordinator) = start_test_server(RelayConfig::default()).await;

    let mut sender = TestClient::connect(addr).await.expect("Sender failed");
    let mut receiver = TestClient::connect(addr).await.expect("Receiver failed");

    // Odd spacing and key order must survive untouched.
    let candidate = r#"{ "candidate":"candidate:1 1 UDP 2122252543 10.0.0.2 54400 typ host",  "sdpMid":"0", "sdpMLineIndex":0 }"#;
    let frame = format!(
        r#"{{"event":"relay-negotiation-update","data":{{"to":"{}","payload":{}}}}}"#,
        receiver.connection_id, candidate
    );
    sender.send_raw(&frame).await.expect("Send failed");

    let text = receiver.recv_text().await.expect("No update received");
    assert_eq!(
        text,
        format!(r#"{{"event":"relay-negotiation-update","data":{}}}"#, candidate)
    );

    // Application payloads ride the same channel.
    sender
        .relay(receiver.connection_id, json!("hello"))
        .await
        .expect("Relay failed");

    let event = receiver.recv_event().await.expect("No update received");
    assert_eq!(
        event,
        json!({ "event": "relay-negotiation-update", "data": "hello" })
    );
    sender.expect_silence().await.expect("Sender got an echo");

    sender.close().await.expect("Failed to close sender");
    receiver.close().await.expect("Failed to close receiver");
}
