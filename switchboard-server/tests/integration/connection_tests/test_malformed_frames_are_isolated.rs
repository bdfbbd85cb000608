use serde_json::json;
use switchboard_server::RelayConfig;

use crate::integration::{init_tracing, start_test_server};
use crate::utils::TestClient;

#[tokio::test]
async fn test_malformed_frames_are_isolated() {
    init_tracing();

    let (addr, coordinator) = start_test_server(RelayConfig::default()).await;

    let mut client_a = TestClient::connect(addr).await.expect("Client A failed");
    let mut client_b = TestClient::connect(addr).await.expect("Client B failed");

    let garbage = [
        "not json at all".to_string(),
        json!({ "event": "dance", "data": {} }).to_string(),
        json!({ "event": "call" }).to_string(),
        json!({ "event": "call", "data": { "userToCall": client_b.connection_id.to_string() } })
            .to_string(),
        json!({ "event": "answer", "data": { "signal": {}, "to": "B1" } }).to_string(),
    ];
    for frame in &garbage {
        client_a.send_raw(frame).await.expect("Send failed");
    }

    // Nobody hears about rejected frames and nobody is dropped.
    client_b.expect_silence().await.expect("B received a malformed frame");
    client_a.expect_silence().await.expect("A received a reply");
    assert_eq!(coordinator.connected_count().await.unwrap(), 2);

    // The sender's connection keeps working afterwards.
    client_a
        .call(client_b.connection_id, json!({ "sdp": "offer-x" }), "Alice")
        .await
        .expect("Call failed");
    let event = client_b.recv_event().await.expect("No incoming call");
    assert_eq!(event["event"], "incoming-call");

    client_a.close().await.expect("Failed to close A");
    client_b.close().await.expect("Failed to close B");
}
