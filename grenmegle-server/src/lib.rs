mod broker;
mod config;
mod error;
mod server;
mod signaling;

pub use broker::*;
pub use config::*;
pub use error::*;
pub use server::*;
pub use signaling::*;
