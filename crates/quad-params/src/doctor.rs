use anyhow::Result;

use crate::{FailureMode, ParamKey, ParamKind, Params};

/// Sanity checks for a parameter set before flying it.
pub fn check_params(params: &Params) -> Result<()> {
    for key in ParamKey::ALL {
        let Some(v) = params.get(key.name()) else { continue };
        anyhow::ensure!(v.kind() == key.kind(), "{} should be a {}, found {}", key.name(), key.kind(), v);
        if key.kind() == ParamKind::Float {
            anyhow::ensure!(params.float(key).is_finite(), "{} is not finite", key.name());
        }
    }

    let throttle = params.float(ParamKey::TargetThrottle);
    anyhow::ensure!((0.0..=1.0).contains(&throttle), "target_throttle must be within 0..1, got {}", throttle);

    for key in [ParamKey::AccelNoise, ParamKey::GyroNoise, ParamKey::GpsAccuracy, ParamKey::WindStrength] {
        anyhow::ensure!(params.float(key) >= 0.0, "{} must not be negative", key.name());
    }

    if let Some(s) = params.get(ParamKey::FailureType.name()).and_then(|v| v.as_str()) {
        s.parse::<FailureMode>()?;
    }
    Ok(())
}
