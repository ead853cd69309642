//! Flight parameters: the typed catalogue, the shared store the listener
//! writes into, and the JSON file they are persisted in.

pub mod catalog;
pub mod derived;
pub mod doctor;
pub mod file;
pub mod store;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use catalog::{validate_update, FailureMode, ParamKey, ParamKind};
pub use derived::{Axis, PidGains, Setpoint};
pub use store::{ParamStore, StoreStats};

/// A single parameter value as found on disk or on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Float(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Text(_) => ParamKind::Text,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self { ParamValue::Float(v) }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self { ParamValue::Bool(v) }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self { ParamValue::Text(v.to_string()) }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("{name} expects a {expected} value")]
    WrongKind { name: String, expected: ParamKind },
    #[error("unknown failure_type {0:?} (none, motor1..motor4, sensor)")]
    BadFailureType(String),
    #[error("{0} must be a number, boolean or string")]
    NotScalar(String),
}

/// Parameter name → value. Names outside the catalogue are kept (and
/// persisted) but nothing reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// The documented default set, one entry per catalogue key.
    pub fn defaults() -> Self {
        Self(ParamKey::ALL.iter().map(|k| (k.name().to_string(), k.default_value())).collect())
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn get_or(&self, name: &str, default: ParamValue) -> ParamValue {
        self.0.get(name).cloned().unwrap_or(default)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Float parameter, or the catalogue default when absent or mistyped.
    pub fn float(&self, key: ParamKey) -> f64 {
        self.get(key.name())
            .and_then(ParamValue::as_f64)
            .or_else(|| key.default_value().as_f64())
            .unwrap_or(0.0)
    }

    pub fn flag(&self, key: ParamKey) -> bool {
        self.get(key.name())
            .and_then(ParamValue::as_bool)
            .or_else(|| key.default_value().as_bool())
            .unwrap_or(false)
    }

    /// `failure_type` as configured, regardless of `simulate_failure`.
    pub fn failure_type(&self) -> FailureMode {
        self.get(ParamKey::FailureType.name())
            .and_then(ParamValue::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or(FailureMode::None)
    }

    /// The failure profile in effect: `failure_type` when
    /// `simulate_failure` is set, otherwise none.
    pub fn failure_mode(&self) -> FailureMode {
        if self.flag(ParamKey::SimulateFailure) {
            self.failure_type()
        } else {
            FailureMode::None
        }
    }
}

impl FromIterator<(String, ParamValue)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(String, ParamValue)> for Params {
    fn extend<I: IntoIterator<Item = (String, ParamValue)>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_catalogue() {
        let p = Params::defaults();
        assert_eq!(p.len(), ParamKey::ALL.len());
        assert_eq!(p.get("roll_kp"), Some(&ParamValue::Float(2.5)));
        assert_eq!(p.get("enable_gps"), Some(&ParamValue::Bool(true)));
        assert_eq!(p.get("failure_type"), Some(&ParamValue::Text("none".into())));
    }

    #[test]
    fn typed_reads_fall_back_to_catalogue_default() {
        let mut p = Params::default();
        assert_eq!(p.float(ParamKey::TargetThrottle), 0.5);
        assert!(p.flag(ParamKey::EnableGps));

        // wrong kind, e.g. a hand-edited file
        p.insert("target_throttle", "high");
        assert_eq!(p.float(ParamKey::TargetThrottle), 0.5);
    }

    #[test]
    fn get_or_uses_caller_default() {
        let p = Params::default();
        assert_eq!(p.get_or("nope", ParamValue::Float(3.0)), ParamValue::Float(3.0));
    }

    #[test]
    fn failure_mode_requires_flag() {
        let mut p = Params::defaults();
        p.insert("failure_type", "motor2");
        assert_eq!(p.failure_type(), FailureMode::Motor2);
        assert_eq!(p.failure_mode(), FailureMode::None);
        p.insert("simulate_failure", true);
        assert_eq!(p.failure_mode(), FailureMode::Motor2);
    }

    #[test]
    fn json_values_map_to_kinds() {
        let p: Params = serde_json::from_str(r#"{"a": 1, "b": 2.5, "c": false, "d": "sensor"}"#).unwrap();
        assert_eq!(p.get("a"), Some(&ParamValue::Float(1.0)));
        assert_eq!(p.get("b"), Some(&ParamValue::Float(2.5)));
        assert_eq!(p.get("c"), Some(&ParamValue::Bool(false)));
        assert_eq!(p.get("d"), Some(&ParamValue::Text("sensor".into())));
    }
}
