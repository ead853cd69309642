use serde::{Deserialize, Serialize};

use quad_sim::Vec3;

/// Orientation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Attitude {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

/// Tilt from the gravity vector alone.
///
/// No gyro integration or filtering: each call only looks at the current
/// accelerometer sample. `_gyro` and `_dt` are accepted so a fusing
/// estimator can take their place. Yaw is not observable this way and
/// stays at zero.
pub fn estimate(accel: Vec3, _gyro: Vec3, _dt: f64) -> Attitude {
    let [ax, ay, az] = accel;
    let roll = ay.atan2((ax * ax + az * az).sqrt()).to_degrees();
    let pitch = (-ax).atan2((ay * ay + az * az).sqrt()).to_degrees();
    Attitude { roll, pitch, yaw: 0.0 }
}
