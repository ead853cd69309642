use anyhow::Result;

use crate::LinkConfig;

pub fn check_link(cfg: &LinkConfig) -> Result<()> {
    anyhow::ensure!(cfg.telemetry.port() != 0, "link.telemetry needs a port");
    anyhow::ensure!(!cfg.telemetry.ip().is_unspecified(), "link.telemetry needs a concrete host");
    anyhow::ensure!(cfg.warn_interval_s.is_finite() && cfg.warn_interval_s >= 0.0, "link.warn_interval_s invalid");
    if cfg.listen.port() == cfg.telemetry.port() {
        anyhow::ensure!(
            !cfg.listen.ip().is_unspecified() && cfg.listen.ip() != cfg.telemetry.ip(),
            "link.listen and link.telemetry would loop back into each other"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass() {
        check_link(&LinkConfig::default()).unwrap();
    }

    #[test]
    fn rejects_self_loop() {
        let cfg = LinkConfig { telemetry: "127.0.0.1:5005".parse().unwrap(), ..LinkConfig::default() };
        assert!(check_link(&cfg).is_err());
    }
}
