//! Listen address configuration

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Args;

/// Address the API binds to.
#[derive(Debug, Args)]
pub struct ListenConfig {
    /// Interface to bind
    #[arg(short = 'H', long, env = "REBATE_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to bind
    #[arg(short, long, env = "REBATE_PORT", default_value_t = 8698)]
    pub port: u16,
}

impl ListenConfig {
    /// Socket address for the listener.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
