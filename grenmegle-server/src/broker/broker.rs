use crate::broker::broker_command::BrokerCommand;
use crate::broker::broker_state::{BrokerState, Outbound};
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns the broker state and applies commands one at a time.
pub struct Broker {
    state: BrokerState,
    command_rx: mpsc::Receiver<BrokerCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Broker {
    pub fn new(
        state: BrokerState,
        command_rx: mpsc::Receiver<BrokerCommand>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            state,
            command_rx,
            signaling,
        }
    }

    pub async fn run(mut self) {
        info!("Broker event loop started");

        loop {
            match self.command_rx.recv().await {
                Some(BrokerCommand::Shutdown) => {
                    self.shutdown().await;
                    break;
                }
                Some(cmd) => self.handle_command(cmd).await,
                None => {
                    info!("Command channel closed. Shutting down broker.");
                    break;
                }
            }
        }

        info!("Broker event loop finished");
    }

    async fn handle_command(&mut self, cmd: BrokerCommand) {
        debug!("Handling {}", cmd.name());

        let outbound = match cmd {
            BrokerCommand::Register { reply } => {
                let id = self.state.register();
                if reply.send(id).is_err() {
                    warn!("Connection {} went away before registration finished", id);
                    self.state.unregister(&id)
                } else {
                    Vec::new()
                }
            }

            BrokerCommand::FindPartner { connection_id } => {
                self.state.request_pairing(&connection_id)
            }

            BrokerCommand::Signal {
                connection_id,
                signal,
            } => self
                .state
                .relay(&signal.room, &connection_id, signal.kind, signal.payload),

            BrokerCommand::LeaveRoom {
                connection_id,
                room_id,
            } => self.state.leave(&connection_id, &room_id),

            BrokerCommand::Disconnect { connection_id } => self.state.disconnect(&connection_id),

            BrokerCommand::Stats { reply } => {
                let _ = reply.send(self.state.stats());
                Vec::new()
            }

            BrokerCommand::Shutdown => Vec::new(),
        };

        self.dispatch(outbound).await;
    }

    async fn dispatch(&self, outbound: Vec<Outbound>) {
        for Outbound { to, message } in outbound {
            self.signaling.send(to, message).await;
        }
    }

    async fn shutdown(&mut self) {
        let ids = self.state.connection_ids();
        info!("Closing {} connections", ids.len());

        for id in ids {
            self.state.unregister(&id);
            self.signaling.close(id).await;
        }

        info!("Broker stopped with {:?}", self.state.stats());
    }
}
