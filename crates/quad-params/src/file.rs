use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::{validate_update, Params};

pub const DEFAULT_PARAM_FILE: &str = "flight_params.json";

/// Read the parameter file. Fails when the file is missing or is not a
/// JSON object; entries that do not validate are skipped with a warning.
pub fn read(path: &Path) -> Result<Params> {
    let s = fs::read_to_string(path).with_context(|| format!("read param file {}", path.display()))?;
    let raw: Map<String, Value> =
        serde_json::from_str(&s).with_context(|| format!("parse param file {}", path.display()))?;

    let mut params = Params::default();
    for (name, value) in &raw {
        match validate_update(name, value) {
            Ok(v) => params.insert(name.as_str(), v),
            Err(e) => warn!("params: skipping {} in {}: {}", name, path.display(), e),
        }
    }
    Ok(params)
}

/// Load the persisted parameters. A missing or corrupt file is replaced
/// by the default set, which is written back so external tools see it.
pub fn load_from_disk(path: &Path) -> Params {
    match read(path) {
        Ok(params) => {
            info!("params: loaded {} entries from {}", params.len(), path.display());
            params
        }
        Err(e) => {
            warn!("params: {:#}; using defaults", e);
            let params = Params::defaults();
            if let Err(e) = persist(path, &params) {
                warn!("params: could not write defaults: {:#}", e);
            }
            params
        }
    }
}

/// Write the full set, replacing the file atomically.
pub fn persist(path: &Path, params: &Params) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(params).context("serialize params")?;
    let tmp = path.with_extension("json.new");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamValue;

    #[test]
    fn missing_file_yields_and_persists_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flight_params.json");
        let params = load_from_disk(&path);
        assert_eq!(params, Params::defaults());
        assert_eq!(read(&path).unwrap(), Params::defaults());
    }

    #[test]
    fn corrupt_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flight_params.json");
        fs::write(&path, "{ \"roll_kp\": ").unwrap();
        assert_eq!(load_from_disk(&path), Params::defaults());
        assert_eq!(read(&path).unwrap(), Params::defaults());
    }

    #[test]
    fn persist_then_load_is_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("params.json");
        let mut params = Params::defaults();
        params.insert("target_roll", 12.25);
        params.insert("failure_type", "sensor");
        params.insert("custom_note", "kept");

        persist(&path, &params).unwrap();
        let first = load_from_disk(&path);
        assert_eq!(first, params);

        persist(&path, &first).unwrap();
        assert_eq!(load_from_disk(&path), first);
        assert_eq!(first.get("custom_note"), Some(&ParamValue::Text("kept".into())));
    }

    #[test]
    fn bad_entries_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flight_params.json");
        let text = r#"{"roll_kp": 3.0, "target_roll": 7.0, "ui_layout": {"w": 800}, "note": null, "pitch_kp": "fast"}"#;
        fs::write(&path, text).unwrap();

        let p = load_from_disk(&path);
        assert_eq!(p.float(crate::ParamKey::RollKp), 3.0);
        assert_eq!(p.float(crate::ParamKey::TargetRoll), 7.0);
        assert_eq!(p.get("ui_layout"), None);
        assert_eq!(p.get("note"), None);
        // mistyped known key falls back to its default
        assert_eq!(p.get("pitch_kp"), None);
        assert_eq!(p.float(crate::ParamKey::PitchKp), 2.5);

        // the file itself is left alone
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn non_object_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flight_params.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert_eq!(load_from_disk(&path), Params::defaults());
        assert_eq!(read(&path).unwrap(), Params::defaults());
    }

    #[test]
    fn integer_values_in_file_read_as_floats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        fs::write(&path, r#"{"target_throttle": 1, "simulate_wind": true}"#).unwrap();
        let p = load_from_disk(&path);
        assert_eq!(p.float(crate::ParamKey::TargetThrottle), 1.0);
        assert!(p.flag(crate::ParamKey::SimulateWind));
    }
}
