use time::OffsetDateTime;

use quad_params::FailureMode;

use crate::mixer::MotorCommand;

/// Loop bookkeeping, published after every tick. The refresh fields
/// change only when parameters are re-read.
#[derive(Debug, Clone, Default)]
pub struct LoopStatus {
    pub ticks: u64,
    pub refreshes: u64,
    pub last_refresh: Option<OffsetDateTime>,
    pub failure: FailureMode,
    pub last_motors: MotorCommand,
}

impl LoopStatus {
    pub fn refresh_age(&self) -> Option<time::Duration> {
        self.last_refresh.map(|t| OffsetDateTime::now_utc() - t)
    }
}
