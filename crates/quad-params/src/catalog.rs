use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::{ParamError, ParamValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Float,
    Bool,
    Text,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParamKind::Float => "float",
            ParamKind::Bool => "bool",
            ParamKind::Text => "string",
        })
    }
}

/// Every parameter the flight loop understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    RollKp,
    RollKi,
    RollKd,
    PitchKp,
    PitchKi,
    PitchKd,
    YawKp,
    YawKi,
    YawKd,
    ThrottleKp,
    ThrottleKi,
    ThrottleKd,
    TargetRoll,
    TargetPitch,
    TargetYaw,
    TargetThrottle,
    AccelNoise,
    GyroNoise,
    SimulateWind,
    WindStrength,
    WindDirection,
    EnableGps,
    GpsAccuracy,
    SimulateFailure,
    FailureType,
}

impl ParamKey {
    pub const ALL: [ParamKey; 25] = [
        ParamKey::RollKp,
        ParamKey::RollKi,
        ParamKey::RollKd,
        ParamKey::PitchKp,
        ParamKey::PitchKi,
        ParamKey::PitchKd,
        ParamKey::YawKp,
        ParamKey::YawKi,
        ParamKey::YawKd,
        ParamKey::ThrottleKp,
        ParamKey::ThrottleKi,
        ParamKey::ThrottleKd,
        ParamKey::TargetRoll,
        ParamKey::TargetPitch,
        ParamKey::TargetYaw,
        ParamKey::TargetThrottle,
        ParamKey::AccelNoise,
        ParamKey::GyroNoise,
        ParamKey::SimulateWind,
        ParamKey::WindStrength,
        ParamKey::WindDirection,
        ParamKey::EnableGps,
        ParamKey::GpsAccuracy,
        ParamKey::SimulateFailure,
        ParamKey::FailureType,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParamKey::RollKp => "roll_kp",
            ParamKey::RollKi => "roll_ki",
            ParamKey::RollKd => "roll_kd",
            ParamKey::PitchKp => "pitch_kp",
            ParamKey::PitchKi => "pitch_ki",
            ParamKey::PitchKd => "pitch_kd",
            ParamKey::YawKp => "yaw_kp",
            ParamKey::YawKi => "yaw_ki",
            ParamKey::YawKd => "yaw_kd",
            ParamKey::ThrottleKp => "throttle_kp",
            ParamKey::ThrottleKi => "throttle_ki",
            ParamKey::ThrottleKd => "throttle_kd",
            ParamKey::TargetRoll => "target_roll",
            ParamKey::TargetPitch => "target_pitch",
            ParamKey::TargetYaw => "target_yaw",
            ParamKey::TargetThrottle => "target_throttle",
            ParamKey::AccelNoise => "accel_noise",
            ParamKey::GyroNoise => "gyro_noise",
            ParamKey::SimulateWind => "simulate_wind",
            ParamKey::WindStrength => "wind_strength",
            ParamKey::WindDirection => "wind_direction",
            ParamKey::EnableGps => "enable_gps",
            ParamKey::GpsAccuracy => "gps_accuracy",
            ParamKey::SimulateFailure => "simulate_failure",
            ParamKey::FailureType => "failure_type",
        }
    }

    pub fn from_name(name: &str) -> Option<ParamKey> {
        ParamKey::ALL.iter().copied().find(|k| k.name() == name)
    }

    pub fn kind(self) -> ParamKind {
        match self {
            ParamKey::SimulateWind | ParamKey::EnableGps | ParamKey::SimulateFailure => ParamKind::Bool,
            ParamKey::FailureType => ParamKind::Text,
            _ => ParamKind::Float,
        }
    }

    pub fn default_value(self) -> ParamValue {
        let v = match self {
            ParamKey::RollKp | ParamKey::PitchKp => 2.5,
            ParamKey::RollKi | ParamKey::PitchKi => 0.1,
            ParamKey::RollKd | ParamKey::PitchKd => 0.5,
            ParamKey::YawKp => 1.0,
            ParamKey::YawKi => 0.05,
            ParamKey::YawKd => 0.2,
            ParamKey::ThrottleKp => 5.0,
            ParamKey::ThrottleKi => 0.2,
            ParamKey::ThrottleKd => 1.0,
            ParamKey::TargetRoll | ParamKey::TargetPitch | ParamKey::TargetYaw => 0.0,
            ParamKey::TargetThrottle => 0.5,
            ParamKey::AccelNoise | ParamKey::GyroNoise => 0.01,
            ParamKey::WindStrength => 0.1,
            ParamKey::WindDirection => 0.0,
            ParamKey::GpsAccuracy => 0.5,
            ParamKey::SimulateWind | ParamKey::SimulateFailure => return ParamValue::Bool(false),
            ParamKey::EnableGps => return ParamValue::Bool(true),
            ParamKey::FailureType => return ParamValue::Text(FailureMode::None.as_str().into()),
        };
        ParamValue::Float(v)
    }

    /// Check a wire value against this key's kind.
    pub fn validate(self, value: &Value) -> Result<ParamValue, ParamError> {
        let wrong = || ParamError::WrongKind { name: self.name().to_string(), expected: self.kind() };
        match self.kind() {
            ParamKind::Float => value.as_f64().map(ParamValue::Float).ok_or_else(wrong),
            ParamKind::Bool => value.as_bool().map(ParamValue::Bool).ok_or_else(wrong),
            ParamKind::Text => {
                let s = value.as_str().ok_or_else(wrong)?;
                let mode: FailureMode = s.parse()?;
                Ok(ParamValue::Text(mode.as_str().to_string()))
            }
        }
    }
}

/// Validate one `{name, value}` pair from the network.
///
/// Known names must carry their kind. Unknown names are let through as
/// long as the value is a scalar.
pub fn validate_update(name: &str, value: &Value) -> Result<ParamValue, ParamError> {
    if let Some(key) = ParamKey::from_name(name) {
        return key.validate(value);
    }
    match value {
        Value::Bool(b) => Ok(ParamValue::Bool(*b)),
        Value::Number(n) => n.as_f64().map(ParamValue::Float).ok_or_else(|| ParamError::NotScalar(name.to_string())),
        Value::String(s) => Ok(ParamValue::Text(s.clone())),
        _ => Err(ParamError::NotScalar(name.to_string())),
    }
}

/// Fault profile selected through `simulate_failure` / `failure_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    #[default]
    None,
    Motor1,
    Motor2,
    Motor3,
    Motor4,
    Sensor,
}

impl FailureMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureMode::None => "none",
            FailureMode::Motor1 => "motor1",
            FailureMode::Motor2 => "motor2",
            FailureMode::Motor3 => "motor3",
            FailureMode::Motor4 => "motor4",
            FailureMode::Sensor => "sensor",
        }
    }

    pub fn is_active(self) -> bool {
        self != FailureMode::None
    }
}

impl FromStr for FailureMode {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(FailureMode::None),
            "motor1" => Ok(FailureMode::Motor1),
            "motor2" => Ok(FailureMode::Motor2),
            "motor3" => Ok(FailureMode::Motor3),
            "motor4" => Ok(FailureMode::Motor4),
            "sensor" => Ok(FailureMode::Sensor),
            other => Err(ParamError::BadFailureType(other.to_string())),
        }
    }
}

impl fmt::Display for FailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
