use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReport {
    pub accel: [f64; 3],
    pub gyro: [f64; 3],
    pub baro: f64,
}

/// One tick of flight state, as seen by the visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryFrame {
    // degrees
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    // thrust 0..1, m1..m4
    pub motors: [f64; 4],
    pub sensors: SensorReport,
}

impl TelemetryFrame {
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
