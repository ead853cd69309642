use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

use quad_params::{ParamError, ParamStore, ParamValue};
use quad_proto::param::ParamUpdate;
use quad_proto::{ProtoError, MAX_DATAGRAM};

use crate::limiter::WarnLimiter;

#[derive(Debug, Error)]
pub enum Rejected {
    #[error(transparent)]
    Malformed(#[from] ProtoError),
    #[error(transparent)]
    Invalid(#[from] ParamError),
}

/// Decode one datagram and merge it into the store. Nothing is written
/// unless the whole message checks out.
pub fn apply_datagram(store: &ParamStore, bytes: &[u8]) -> Result<(String, ParamValue), Rejected> {
    let update = ParamUpdate::decode(bytes)?;
    let value = store.apply_update(&update.param, &update.value)?;
    Ok((update.param, value))
}

/// Receives `{"param", "value"}` datagrams and merges them into the
/// shared parameter store.
pub struct ParamListener {
    socket: UdpSocket,
    limiter: WarnLimiter,
}

impl ParamListener {
    pub async fn bind(addr: SocketAddr, warn_interval: Duration) -> Result<Self> {
        let socket = UdpSocket::bind(addr).await.with_context(|| format!("bind param listener {}", addr))?;
        Ok(Self { socket, limiter: WarnLimiter::new(warn_interval) })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    pub async fn run(mut self, store: Arc<ParamStore>) {
        if let Ok(addr) = self.socket.local_addr() {
            info!("param listener: waiting for updates on {}", addr);
        }
        let mut buf = [0u8; MAX_DATAGRAM];
        loop {
            match self.socket.recv_from(&mut buf).await {
                Ok((n, from)) => match apply_datagram(&store, &buf[..n]) {
                    Ok((name, _)) => debug!("param listener: {} from {}", name, from),
                    Err(e) => debug!("param listener: dropped datagram from {}: {}", from, e),
                },
                Err(e) => {
                    if let Some(skipped) = self.limiter.allow("recv") {
                        warn!("param listener: recv failed ({} more suppressed): {}", skipped, e);
                    }
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
            }
        }
    }
}
