use crate::broker::broker::Broker;
use crate::broker::broker_command::BrokerCommand;
use crate::broker::broker_state::{BrokerState, BrokerStats};
use crate::error::BrokerError;
use crate::signaling::SignalingOutput;
use grenmegle_core::{ConnectionId, OutgoingSignal, RoomId};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Cloneable entry point to a running [`Broker`].
#[derive(Clone)]
pub struct BrokerHandle {
    command_tx: mpsc::Sender<BrokerCommand>,
}

impl BrokerHandle {
    /// Spawns the broker event loop on the current runtime.
    pub fn spawn(
        state: BrokerState,
        signaling: Arc<dyn SignalingOutput>,
        buffer: usize,
    ) -> (Self, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(buffer.max(1));
        let broker = Broker::new(state, command_rx, signaling);
        let task = tokio::spawn(broker.run());

        (Self { command_tx }, task)
    }

    pub async fn register(&self) -> Result<ConnectionId, BrokerError> {
        let (reply, rx) = oneshot::channel();
        self.send(BrokerCommand::Register { reply }).await?;
        rx.await.map_err(|_| BrokerError::BrokerGone)
    }

    pub async fn find_partner(&self, connection_id: ConnectionId) -> Result<(), BrokerError> {
        self.send(BrokerCommand::FindPartner { connection_id }).await
    }

    pub async fn signal(
        &self,
        connection_id: ConnectionId,
        signal: OutgoingSignal,
    ) -> Result<(), BrokerError> {
        self.send(BrokerCommand::Signal {
            connection_id,
            signal,
        })
        .await
    }

    pub async fn leave_room(
        &self,
        connection_id: ConnectionId,
        room_id: RoomId,
    ) -> Result<(), BrokerError> {
        self.send(BrokerCommand::LeaveRoom {
            connection_id,
            room_id,
        })
        .await
    }

    pub async fn disconnect(&self, connection_id: ConnectionId) -> Result<(), BrokerError> {
        self.send(BrokerCommand::Disconnect { connection_id }).await
    }

    pub async fn stats(&self) -> Result<BrokerStats, BrokerError> {
        let (reply, rx) = oneshot::channel();
        self.send(BrokerCommand::Stats { reply }).await?;
        rx.await.map_err(|_| BrokerError::BrokerGone)
    }

    pub async fn shutdown(&self) -> Result<(), BrokerError> {
        self.send(BrokerCommand::Shutdown).await
    }

    async fn send(&self, cmd: BrokerCommand) -> Result<(), BrokerError> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| BrokerError::BrokerGone)
    }
}
