use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "grenmegle-server",
    version,
    about = "Pairs anonymous strangers and relays their WebRTC signaling"
)]
pub struct ServerConfig {
    /// Address to bind the HTTP/WebSocket listener to.
    #[arg(long, env = "GRENMEGLE_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Capacity of the broker command channel.
    #[arg(long, env = "GRENMEGLE_COMMAND_BUFFER", default_value_t = 1024)]
    pub command_buffer: usize,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            command_buffer: 1024,
        }
    }
}
