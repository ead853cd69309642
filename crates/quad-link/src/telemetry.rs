use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::UdpSocket;
use tracing::warn;

use quad_fc::sink::TelemetrySink;
use quad_proto::telemetry::TelemetryFrame;

use crate::limiter::WarnLimiter;

/// Fire-and-forget UDP telemetry, one datagram per tick.
pub struct UdpTelemetry {
    socket: UdpSocket,
    target: SocketAddr,
    limiter: WarnLimiter,
    sent: u64,
}

impl UdpTelemetry {
    pub async fn bind(target: SocketAddr, warn_interval: Duration) -> Result<Self> {
        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local).await.with_context(|| format!("bind telemetry socket {}", local))?;
        // try_send_to only succeeds once the reactor has seen the socket writable
        socket.writable().await.context("telemetry socket readiness")?;
        Ok(Self { socket, target, limiter: WarnLimiter::new(warn_interval), sent: 0 })
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }

    fn try_send(&self, frame: &TelemetryFrame) -> io::Result<usize> {
        let bytes = frame.to_json().map_err(io::Error::other)?;
        // non-blocking: a full socket buffer drops the frame
        self.socket.try_send_to(&bytes, self.target)
    }
}

impl TelemetrySink for UdpTelemetry {
    fn publish(&mut self, frame: &TelemetryFrame) {
        match self.try_send(frame) {
            Ok(_) => self.sent += 1,
            Err(e) => {
                if let Some(skipped) = self.limiter.allow("telemetry") {
                    warn!("telemetry to {} failed ({} more suppressed): {}", self.target, skipped, e);
                }
            }
        }
    }
}
