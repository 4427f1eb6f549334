use grenmegle_core::{OutgoingSignal, Role, ServerMessage};
use serde_json::json;

use crate::integration::{create_test_broker, init_tracing};
use crate::utils::{pair, settle};

#[tokio::test]
async fn test_disconnect_notifies_partner() {
    init_tracing();

    let (broker, _rx, signaling) = create_test_broker();
    let (a, b, room) = pair(&broker).await;

    broker.disconnect(a).await.unwrap();
    // a late duplicate from the transport must not notify b twice
    broker.disconnect(a).await.unwrap();
    broker.leave_room(a, room.clone()).await.unwrap();

    let stats = settle(&broker).await;
    assert_eq!(stats.connections, 1);
    assert_eq!(stats.rooms, 0);

    let partner_left = signaling
        .messages_for(&b)
        .await
        .into_iter()
        .filter(|msg| *msg == ServerMessage::PartnerLeft)
        .count();
    assert_eq!(partner_left, 1, "B should be told exactly once");

    // b is idle again and can look for someone new
    broker.find_partner(b).await.unwrap();
    let stats = settle(&broker).await;
    assert_eq!(stats.waiting, 1);

    let c = broker.register().await.unwrap();
    broker.find_partner(c).await.unwrap();
    settle(&broker).await;
    assert_eq!(
        signaling.messages_for(&c).await.last(),
        Some(&ServerMessage::Role(Role::Initiator))
    );

    // signals into the dead room go nowhere
    let before = signaling.message_count().await;
    broker
        .signal(
            b,
            OutgoingSignal {
                room,
                kind: "offer".into(),
                payload: json!("stale"),
            },
        )
        .await
        .unwrap();
    settle(&broker).await;
    assert_eq!(signaling.message_count().await, before);
}
