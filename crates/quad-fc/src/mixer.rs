use serde::{Deserialize, Serialize};

use crate::stabilizer::StabilizerOutput;

/// Thrust for m1..m4, each within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotorCommand(pub [f64; 4]);

impl MotorCommand {
    pub const ZERO: MotorCommand = MotorCommand([0.0; 4]);

    /// The only output bound in the system; there is no slew limiting.
    pub fn clamped(m: [f64; 4]) -> Self {
        Self(m.map(|v| v.clamp(0.0, 1.0)))
    }

    /// Average thrust across the four motors.
    pub fn collective(&self) -> f64 {
        self.0.iter().sum::<f64>() / 4.0
    }
}

/// X-configuration mixing.
pub fn mix(throttle: f64, out: &StabilizerOutput) -> MotorCommand {
    let (r, p, y) = (out.roll, out.pitch, out.yaw);
    MotorCommand::clamped([
        throttle + r + p - y,
        throttle - r + p + y,
        throttle - r - p - y,
        throttle + r - p + y,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn out(roll: f64, pitch: f64, yaw: f64) -> StabilizerOutput {
        StabilizerOutput { roll, pitch, yaw, throttle: 0.0 }
    }

    #[test]
    fn hover_is_uniform() {
        assert_eq!(mix(0.5, &out(0.0, 0.0, 0.0)), MotorCommand([0.5; 4]));
    }

    #[test]
    fn signs_follow_x_layout() {
        let m = mix(0.5, &out(0.1, 0.0, 0.0)).0;
        assert_relative_eq!(m[0], 0.6);
        assert_relative_eq!(m[1], 0.4);
        assert_relative_eq!(m[2], 0.4);
        assert_relative_eq!(m[3], 0.6);

        let m = mix(0.5, &out(0.0, 0.1, 0.0)).0;
        assert_relative_eq!(m[0], 0.6);
        assert_relative_eq!(m[1], 0.6);
        assert_relative_eq!(m[2], 0.4);
        assert_relative_eq!(m[3], 0.4);

        let m = mix(0.5, &out(0.0, 0.0, 0.1)).0;
        assert_relative_eq!(m[0], 0.4);
        assert_relative_eq!(m[1], 0.6);
        assert_relative_eq!(m[2], 0.4);
        assert_relative_eq!(m[3], 0.6);
    }

    #[test]
    fn always_within_bounds() {
        let values = [-1e9, -3.0, -0.2, 0.0, 0.3, 0.5, 1.0, 2.5, 1e9];
        for &t in &values {
            for &r in &values {
                for &p in &values {
                    for &y in &values {
                        let m = mix(t, &out(r, p, y));
                        assert!(m.0.iter().all(|v| (0.0..=1.0).contains(v)), "{:?}", m);
                    }
                }
            }
        }
    }

    #[test]
    fn collective() {
        assert_relative_eq!(MotorCommand([0.0, 0.7, 0.3, 0.7]).collective(), 0.425);
    }
}
