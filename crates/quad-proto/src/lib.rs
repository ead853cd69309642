//! Datagram formats shared by the flight loop and its tuning/visualizer clients.
//!
//! Both directions are one JSON object per UDP datagram.

pub mod param;
pub mod telemetry;

use thiserror::Error;

/// Default port the flight loop listens on for parameter updates.
pub const PARAM_PORT: u16 = 5005;
/// Default port telemetry is sent to.
pub const TELEMETRY_PORT: u16 = 5006;
/// Largest datagram the listener reads.
pub const MAX_DATAGRAM: usize = 1024;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("datagram is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing or empty \"param\" field")]
    MissingName,
    #[error("missing \"value\" field")]
    MissingValue,
}
