use grenmegle_core::{ClientMessage, LeaveRoom, OutgoingSignal, Role, RoomId, ServerMessage};
use serde_json::json;

use crate::integration::{init_tracing, spawn_test_server};
use crate::utils::{TestClient, wait_for_stats};

#[tokio::test]
async fn test_full_session() {
    init_tracing();

    let (addr, state) = spawn_test_server().await;

    let mut alice = TestClient::connect(addr).await.expect("alice connects");
    let mut bob = TestClient::connect(addr).await.expect("bob connects");
    assert_ne!(alice.id, bob.id);

    alice.send(&ClientMessage::FindPartner).await.unwrap();
    assert!(
        wait_for_stats(&state.broker, 5000, |s| s.waiting == 1).await,
        "alice should be waiting"
    );
    bob.send(&ClientMessage::FindPartner).await.unwrap();

    let room_id = RoomId::derive(&alice.id, &bob.id);
    let match_found = ServerMessage::MatchFound {
        room_id: room_id.clone(),
    };

    assert_eq!(alice.recv().await.unwrap(), match_found);
    assert_eq!(
        alice.recv().await.unwrap(),
        ServerMessage::Role(Role::Receiver)
    );
    assert_eq!(bob.recv().await.unwrap(), match_found);
    assert_eq!(
        bob.recv().await.unwrap(),
        ServerMessage::Role(Role::Initiator)
    );

    // garbage is dropped without killing the session
    bob.send_raw("{not json".to_string()).await.unwrap();

    let offer = json!({ "type": "offer", "sdp": "v=0" });
    bob.send(&ClientMessage::Signal(OutgoingSignal {
        room: room_id.clone(),
        kind: "offer".into(),
        payload: offer.clone(),
    }))
    .await
    .unwrap();

    match alice.recv().await.unwrap() {
        ServerMessage::Signal(signal) => {
            assert_eq!(signal.kind, "offer");
            assert_eq!(signal.payload, offer);
            assert_eq!(signal.sender, bob.id);
        }
        other => panic!("expected signal, got {:?}", other),
    }
    bob.expect_silence(100).await.unwrap();

    // bob drops off without saying goodbye
    bob.close().await.unwrap();
    assert_eq!(alice.recv().await.unwrap(), ServerMessage::PartnerLeft);
    assert!(wait_for_stats(&state.broker, 5000, |s| s.connections == 1 && s.rooms == 0).await);

    alice.send(&ClientMessage::FindPartner).await.unwrap();
    assert!(wait_for_stats(&state.broker, 5000, |s| s.waiting == 1).await);
}

#[tokio::test]
async fn test_leave_room_over_websocket() {
    init_tracing();

    let (addr, state) = spawn_test_server().await;

    let mut alice = TestClient::connect(addr).await.unwrap();
    let mut bob = TestClient::connect(addr).await.unwrap();

    alice.send(&ClientMessage::FindPartner).await.unwrap();
    assert!(wait_for_stats(&state.broker, 5000, |s| s.waiting == 1).await);
    bob.send(&ClientMessage::FindPartner).await.unwrap();

    let room_id = match bob.recv().await.unwrap() {
        ServerMessage::MatchFound { room_id } => room_id,
        other => panic!("expected match_found, got {:?}", other),
    };
    // legacy clients send the bare room id
    bob.send_raw(
        json!({ "event": "leave_room", "data": room_id.as_str() }).to_string(),
    )
    .await
    .unwrap();

    // skip match_found and role
    alice.recv().await.unwrap();
    alice.recv().await.unwrap();
    assert_eq!(alice.recv().await.unwrap(), ServerMessage::PartnerLeft);

    alice
        .send(&ClientMessage::LeaveRoom(LeaveRoom::Object { room_id }))
        .await
        .unwrap();
    alice.expect_silence(100).await.unwrap();

    assert!(wait_for_stats(&state.broker, 5000, |s| s.connections == 2 && s.rooms == 0).await);
}
