use grenmegle_core::{Role, RoomId, ServerMessage};

use crate::integration::{create_test_broker, init_tracing};
use crate::utils::settle;

#[tokio::test]
async fn test_fifo_matching() {
    init_tracing();

    let (broker, _rx, signaling) = create_test_broker();

    let mut ids = Vec::new();
    for _ in 0..8 {
        ids.push(broker.register().await.unwrap());
    }
    for id in &ids {
        broker.find_partner(*id).await.unwrap();
    }

    let stats = settle(&broker).await;
    assert_eq!(stats.rooms, 4);
    assert_eq!(stats.waiting, 0);

    // each requester pairs with whoever asked just before it
    for pair in ids.chunks(2) {
        let (waiting, requester) = (pair[0], pair[1]);
        let room_id = RoomId::derive(&waiting, &requester);

        assert_eq!(
            signaling.messages_for(&waiting).await,
            vec![
                ServerMessage::MatchFound {
                    room_id: room_id.clone()
                },
                ServerMessage::Role(Role::Receiver),
            ]
        );
        assert_eq!(
            signaling.messages_for(&requester).await,
            vec![
                ServerMessage::MatchFound { room_id },
                ServerMessage::Role(Role::Initiator),
            ]
        );
    }
}

#[tokio::test]
async fn test_odd_one_out_keeps_waiting() {
    init_tracing();

    let (broker, _rx, signaling) = create_test_broker();

    let mut ids = Vec::new();
    for _ in 0..3 {
        let id = broker.register().await.unwrap();
        broker.find_partner(id).await.unwrap();
        ids.push(id);
    }

    let stats = settle(&broker).await;
    assert_eq!(stats.rooms, 1);
    assert_eq!(stats.waiting, 1);
    assert!(signaling.messages_for(&ids[2]).await.is_empty());
}
