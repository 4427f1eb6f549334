mod broker;
mod broker_command;
mod broker_handle;
mod broker_state;
mod lifecycle;
mod matchmaker;
mod registry;
mod room_table;
mod signal_relay;
mod waiting_queue;

pub use broker::*;
pub use broker_command::*;
pub use broker_handle::*;
pub use broker_state::*;
pub use registry::*;
pub use room_table::*;
pub use waiting_queue::*;
