//! UDP transport: telemetry out, parameter updates in.

pub mod doctor;
pub mod limiter;
pub mod listener;
pub mod telemetry;

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::Deserialize;

pub use listener::ParamListener;
pub use telemetry::UdpTelemetry;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Where parameter updates arrive (clients broadcast or unicast here).
    pub listen: SocketAddr,

    /// Telemetry destination.
    pub telemetry: SocketAddr,

    /// Minimum gap between two warnings about the same transport problem.
    pub warn_interval_s: f64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::UNSPECIFIED, quad_proto::PARAM_PORT)),
            telemetry: SocketAddr::from((Ipv4Addr::LOCALHOST, quad_proto::TELEMETRY_PORT)),
            warn_interval_s: 5.0,
        }
    }
}

impl LinkConfig {
    pub fn warn_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.warn_interval_s).unwrap_or(Duration::from_secs(5))
    }
}
