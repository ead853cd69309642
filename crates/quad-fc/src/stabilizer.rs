use quad_params::{Axis, Params, Setpoint};

use crate::attitude::Attitude;
use crate::pid::Pid;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StabilizerOutput {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    /// Computed every tick but not fed to the mixer, which takes the
    /// throttle setpoint directly.
    pub throttle: f64,
}

/// The four axis controllers.
#[derive(Debug, Clone, Default)]
pub struct Stabilizer {
    roll: Pid,
    pitch: Pid,
    yaw: Pid,
    throttle: Pid,
}

impl Stabilizer {
    pub fn from_params(params: &Params) -> Self {
        let mut s = Self::default();
        s.retune(params);
        s
    }

    /// Replace gains on every axis without touching controller state.
    pub fn retune(&mut self, params: &Params) {
        for axis in Axis::ALL {
            self.axis_mut(axis).set_gains(params.gains(axis));
        }
    }

    pub fn axis(&self, axis: Axis) -> &Pid {
        match axis {
            Axis::Roll => &self.roll,
            Axis::Pitch => &self.pitch,
            Axis::Yaw => &self.yaw,
            Axis::Throttle => &self.throttle,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut Pid {
        match axis {
            Axis::Roll => &mut self.roll,
            Axis::Pitch => &mut self.pitch,
            Axis::Yaw => &mut self.yaw,
            Axis::Throttle => &mut self.throttle,
        }
    }

    /// `collective` is the thrust actually commanded last tick; it is the
    /// throttle controller's process value.
    pub fn update(&mut self, sp: &Setpoint, att: &Attitude, collective: f64, dt: f64) -> StabilizerOutput {
        StabilizerOutput {
            roll: self.roll.compute(sp.roll, att.roll, dt),
            pitch: self.pitch.compute(sp.pitch, att.pitch, dt),
            yaw: self.yaw.compute(sp.yaw, att.yaw, dt),
            throttle: self.throttle.compute(sp.throttle, collective, dt),
        }
    }
}
