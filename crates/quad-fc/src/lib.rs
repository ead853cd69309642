pub mod attitude;
pub mod doctor;
pub mod failure;
pub mod flight;
pub mod mixer;
pub mod pid;
pub mod sink;
pub mod stabilizer;
pub mod state;

use serde::Deserialize;

/// What the motors do while the attitude sensing is being corrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorFaultPolicy {
    /// Keep sending the last command produced before the fault.
    #[default]
    Hold,
    /// Cut all motors.
    Zero,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Tick period in seconds. Also the `dt` fed to the controllers.
    pub period_s: f64,

    /// How often the loop re-reads the shared parameters. Updates pushed
    /// over the network become visible with up to this much delay.
    pub refresh_interval_s: f64,

    pub sensor_fault_motors: SensorFaultPolicy,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self { period_s: 0.01, refresh_interval_s: 1.0, sensor_fault_motors: SensorFaultPolicy::Hold }
    }
}

impl LoopConfig {
    /// Ticks between two parameter refreshes: the fewest whole periods
    /// covering the refresh interval, and at least one.
    pub fn refresh_ticks(&self) -> u64 {
        // slack so 1.0 / 0.01 stays 100 despite float error
        let n = (self.refresh_interval_s / self.period_s - 1e-9).ceil();
        if n.is_finite() && n >= 1.0 { n as u64 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_ticks() {
        assert_eq!(LoopConfig::default().refresh_ticks(), 100);
        let cfg = LoopConfig { period_s: 0.5, refresh_interval_s: 0.1, ..LoopConfig::default() };
        assert_eq!(cfg.refresh_ticks(), 1);
    }

    #[test]
    fn refresh_never_fires_before_interval() {
        for (period_s, refresh_interval_s) in [(0.01, 0.014), (0.01, 0.015), (0.003, 1.0), (0.02, 0.25)] {
            let cfg = LoopConfig { period_s, refresh_interval_s, ..LoopConfig::default() };
            let n = cfg.refresh_ticks();
            assert!(n as f64 * period_s >= refresh_interval_s - 1e-9, "{} ticks of {}s", n, period_s);
            assert!((n - 1) as f64 * period_s < refresh_interval_s, "{} ticks of {}s", n, period_s);
        }
        let cfg = LoopConfig { period_s: 0.01, refresh_interval_s: 0.014, ..LoopConfig::default() };
        assert_eq!(cfg.refresh_ticks(), 2);
    }
}
