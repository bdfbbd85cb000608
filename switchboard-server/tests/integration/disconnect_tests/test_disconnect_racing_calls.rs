use serde_json::value::RawValue;
use switchboard_core::{CallRequest, ClientMessage, ServerMessage};
use switchboard_server::RelayConfig;

use crate::integration::{create_test_coordinator, init_tracing};
use crate::utils::RecordingLink;

const CALLS: usize = 200;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_disconnect_racing_calls() {
    init_tracing();

    let coordinator = create_test_coordinator(RelayConfig::default());

    let caller = RecordingLink::new();
    let target = RecordingLink::new();
    let caller_id = coordinator.connect(caller.clone()).await.unwrap();
    let target_id = coordinator.connect(target.clone()).await.unwrap();

    let calls = tokio::spawn({
        let coordinator = coordinator.clone();
        async move {
            for i in 0..CALLS {
                let message = ClientMessage::Call(CallRequest {
                    user_to_call: target_id,
                    signal_data: RawValue::from_string(format!(r#"{{"seq":{i}}}"#)).unwrap(),
                    from: caller_id,
                    name: "Alice".into(),
                });
                coordinator.dispatch(caller_id, message).await.unwrap();
                tokio::task::yield_now().await;
            }
        }
    });

    let hangup = tokio::spawn({
        let coordinator = coordinator.clone();
        async move {
            tokio::task::yield_now().await;
            coordinator.disconnect(target_id).await.unwrap();
        }
    });

    calls.await.unwrap();
    hangup.await.unwrap();
    coordinator.connected_count().await.unwrap();

    // Every call either reached the target before removal or failed after it.
    let failed = caller
        .messages()
        .iter()
        .filter(|m| matches!(m, ServerMessage::CallFailed { .. }))
        .count();
    assert_eq!(target.count_incoming_calls() + failed, CALLS);

    // The caller's stream reads: greeting, then call-ended, then only failures.
    let mut ended = false;
    for msg in caller.messages().iter().skip(1) {
        match msg {
            ServerMessage::CallEnded => {
                assert!(!ended, "call-ended delivered twice");
                ended = true;
            }
            ServerMessage::CallFailed { to } => {
                assert_eq!(*to, target_id);
                assert!(ended, "call failed while the target was still connected");
            }
            other => panic!("Unexpected message for caller: {:?}", other),
        }
    }
    assert!(ended);

    // Nothing reached the target after its removal: its incoming calls carry
    // a contiguous prefix of sequence numbers.
    let seqs: Vec<String> = target
        .messages()
        .iter()
        .filter_map(|m| match m {
            ServerMessage::IncomingCall { signal, .. } => Some(signal.get().to_string()),
            _ => None,
        })
        .collect();
    for (i, seq) in seqs.iter().enumerate() {
        assert_eq!(seq, &format!(r#"{{"seq":{i}}}"#));
    }
}
