use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProtoError;

/// `{"param": <name>, "value": <value>}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamUpdate {
    pub param: String,
    pub value: Value,
}

#[derive(Debug, Deserialize)]
struct RawUpdate {
    param: Option<String>,
    value: Option<Value>,
}

impl ParamUpdate {
    pub fn new(param: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { param: param.into(), value: value.into() }
    }

    /// Decode one datagram. Only the envelope is checked here; whether the
    /// value suits the named parameter is decided by the parameter store.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtoError> {
        let raw: RawUpdate = serde_json::from_slice(bytes)?;
        let param = raw.param.filter(|p| !p.is_empty()).ok_or(ProtoError::MissingName)?;
        // an explicit `null` deserializes to None as well
        let value = raw.value.ok_or(ProtoError::MissingValue)?;
        Ok(Self { param, value })
    }

    pub fn encode(&self) -> Vec<u8> {
        // a struct of String + Value always serializes
        serde_json::to_vec(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_float_update() {
        let up = ParamUpdate::decode(br#"{"param": "target_roll", "value": 15.0}"#).unwrap();
        assert_eq!(up.param, "target_roll");
        assert_eq!(up.value, json!(15.0));
    }

    #[test]
    fn ignores_extra_fields() {
        let up = ParamUpdate::decode(br#"{"param": "simulate_wind", "value": true, "from": "ui"}"#).unwrap();
        assert_eq!(up.value, json!(true));
    }

    #[test]
    fn rejects_missing_param() {
        let err = ParamUpdate::decode(br#"{"value": 15.0}"#).unwrap_err();
        assert!(matches!(err, ProtoError::MissingName));
        let err = ParamUpdate::decode(br#"{"param": "", "value": 15.0}"#).unwrap_err();
        assert!(matches!(err, ProtoError::MissingName));
    }

    #[test]
    fn rejects_missing_or_null_value() {
        assert!(matches!(ParamUpdate::decode(br#"{"param": "roll_kp"}"#), Err(ProtoError::MissingValue)));
        assert!(matches!(ParamUpdate::decode(br#"{"param": "roll_kp", "value": null}"#), Err(ProtoError::MissingValue)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(ParamUpdate::decode(b"\xff\x00not json"), Err(ProtoError::Json(_))));
        assert!(matches!(ParamUpdate::decode(b"[1, 2, 3]"), Err(ProtoError::Json(_))));
    }

    #[test]
    fn encode_matches_client_format() {
        let bytes = ParamUpdate::new("failure_type", "motor2").encode();
        let v: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v, json!({"param": "failure_type", "value": "motor2"}));
    }
}
