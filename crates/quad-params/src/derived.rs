use serde::{Deserialize, Serialize};

use crate::{ParamKey, Params};

/// Control axes, each with its own PID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Roll,
    Pitch,
    Yaw,
    Throttle,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Roll, Axis::Pitch, Axis::Yaw, Axis::Throttle];

    fn gain_keys(self) -> [ParamKey; 3] {
        match self {
            Axis::Roll => [ParamKey::RollKp, ParamKey::RollKi, ParamKey::RollKd],
            Axis::Pitch => [ParamKey::PitchKp, ParamKey::PitchKi, ParamKey::PitchKd],
            Axis::Yaw => [ParamKey::YawKp, ParamKey::YawKi, ParamKey::YawKd],
            Axis::Throttle => [ParamKey::ThrottleKp, ParamKey::ThrottleKi, ParamKey::ThrottleKd],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }
}

/// Target attitude in degrees plus collective throttle (0..1).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Setpoint {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub throttle: f64,
}

impl Params {
    pub fn gains(&self, axis: Axis) -> PidGains {
        let [p, i, d] = axis.gain_keys();
        PidGains::new(self.float(p), self.float(i), self.float(d))
    }

    pub fn setpoint(&self) -> Setpoint {
        Setpoint {
            roll: self.float(ParamKey::TargetRoll),
            pitch: self.float(ParamKey::TargetPitch),
            yaw: self.float(ParamKey::TargetYaw),
            throttle: self.float(ParamKey::TargetThrottle),
        }
    }
}
