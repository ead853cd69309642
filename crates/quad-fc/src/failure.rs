//! Fault profiles that replace the normal control output.

use quad_params::FailureMode;

use crate::attitude::Attitude;
use crate::mixer::MotorCommand;

/// Peak bias, in degrees, added to roll and pitch under a sensor fault.
pub const SENSOR_BIAS_DEG: f64 = 10.0;

/// Fixed fallback pattern for a dead motor: the failed motor gets
/// nothing, its two neighbours 0.7, the opposite one 0.3.
pub fn motor_override(mode: FailureMode) -> Option<MotorCommand> {
    let m = match mode {
        FailureMode::Motor1 => [0.0, 0.7, 0.3, 0.7],
        FailureMode::Motor2 => [0.7, 0.0, 0.7, 0.3],
        FailureMode::Motor3 => [0.3, 0.7, 0.0, 0.7],
        FailureMode::Motor4 => [0.7, 0.3, 0.7, 0.0],
        FailureMode::None | FailureMode::Sensor => return None,
    };
    Some(MotorCommand::clamped(m))
}

/// Skew the reported tilt by a positive, non zero-mean bias.
/// `u_roll` and `u_pitch` are uniform samples in [0, 1).
pub fn corrupt_attitude(att: Attitude, u_roll: f64, u_pitch: f64) -> Attitude {
    Attitude {
        roll: att.roll + SENSOR_BIAS_DEG * u_roll,
        pitch: att.pitch + SENSOR_BIAS_DEG * u_pitch,
        yaw: att.yaw,
    }
}
