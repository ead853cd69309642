use anyhow::Result;

use crate::LoopConfig;

pub fn check_loop(cfg: &LoopConfig) -> Result<()> {
    anyhow::ensure!(cfg.period_s.is_finite() && cfg.period_s > 0.0, "control.period_s must be > 0");
    anyhow::ensure!(cfg.period_s <= 0.1, "control.period_s above 100ms is too slow to stabilize");
    anyhow::ensure!(
        cfg.refresh_interval_s.is_finite() && cfg.refresh_interval_s >= cfg.period_s,
        "control.refresh_interval_s must be >= period_s"
    );
    Ok(())
}
