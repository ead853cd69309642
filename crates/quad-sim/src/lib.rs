//! Synthetic IMU / barometer / GPS readings for a hovering quad.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use quad_params::{ParamKey, Params};

pub type Vec3 = [f64; 3];

pub const GRAVITY: f64 = 9.8;
/// Sea-level pressure, hPa.
pub const BARO_BASE: f64 = 1013.25;
pub const BARO_NOISE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorFrame {
    pub accelerometer: Vec3,
    pub gyroscope: Vec3,
    pub barometer: f64,
    pub gps: Vec3,
}

impl SensorFrame {
    /// Noise-free frame of a level vehicle at rest.
    pub fn hover() -> Self {
        Self { accelerometer: [0.0, 0.0, GRAVITY], gyroscope: [0.0; 3], barometer: BARO_BASE, gps: [0.0; 3] }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wind {
    pub strength: f64,
    /// radians
    pub direction: f64,
}

/// The subset of parameters the simulator reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub accel_noise: f64,
    pub gyro_noise: f64,
    pub baro_noise: f64,
    pub wind: Option<Wind>,
    /// GPS noise scale; `None` when GPS is disabled.
    pub gps_accuracy: Option<f64>,
}

impl SimConfig {
    pub fn from_params(p: &Params) -> Self {
        let wind = p.flag(ParamKey::SimulateWind).then(|| Wind {
            strength: p.float(ParamKey::WindStrength),
            direction: p.float(ParamKey::WindDirection),
        });
        let gps_accuracy = p.flag(ParamKey::EnableGps).then(|| p.float(ParamKey::GpsAccuracy));
        Self {
            accel_noise: p.float(ParamKey::AccelNoise),
            gyro_noise: p.float(ParamKey::GyroNoise),
            baro_noise: BARO_NOISE,
            wind,
            gps_accuracy,
        }
    }

    /// No noise, no wind, no GPS.
    pub fn noiseless() -> Self {
        Self { accel_noise: 0.0, gyro_noise: 0.0, baro_noise: 0.0, wind: None, gps_accuracy: None }
    }
}

pub struct SensorSim<R = StdRng> {
    rng: R,
}

impl SensorSim<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> SensorSim<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Zero-mean Gaussian sample with standard deviation `sigma`.
    fn gauss(&mut self, sigma: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        z * sigma
    }

    pub fn read(&mut self, cfg: &SimConfig) -> SensorFrame {
        let mut accel = [
            self.gauss(cfg.accel_noise),
            self.gauss(cfg.accel_noise),
            GRAVITY + self.gauss(cfg.accel_noise),
        ];
        let gyroscope = [self.gauss(cfg.gyro_noise), self.gauss(cfg.gyro_noise), self.gauss(cfg.gyro_noise)];

        if let Some(w) = cfg.wind {
            accel[0] += w.strength * w.direction.cos();
            accel[1] += w.strength * w.direction.sin();
        }

        let barometer = BARO_BASE + self.gauss(cfg.baro_noise);
        let gps = match cfg.gps_accuracy {
            Some(acc) => [self.gauss(acc), self.gauss(acc), self.gauss(acc)],
            None => [0.0; 3],
        };

        SensorFrame { accelerometer: accel, gyroscope, barometer, gps }
    }

    /// Uniform sample in [0, 1), for fault injection sharing this source.
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
