use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use quad_params::{FailureMode, ParamStore, Setpoint};
use quad_proto::telemetry::{SensorReport, TelemetryFrame};
use quad_sim::{SensorFrame, SensorSim, SimConfig};

use crate::attitude::{self, Attitude};
use crate::failure;
use crate::mixer::{self, MotorCommand};
use crate::sink::{MotorSink, TelemetrySink};
use crate::stabilizer::{Stabilizer, StabilizerOutput};
use crate::state::LoopStatus;
use crate::{LoopConfig, SensorFaultPolicy};

/// Everything one tick produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub sensors: SensorFrame,
    /// Attitude as reported, i.e. after any sensor fault was applied.
    pub attitude: Attitude,
    pub failure: FailureMode,
    /// `None` when a failure override skipped the controllers.
    pub stabilizer: Option<StabilizerOutput>,
    pub motors: MotorCommand,
}

impl TickReport {
    pub fn telemetry(&self) -> TelemetryFrame {
        TelemetryFrame {
            roll: self.attitude.roll,
            pitch: self.attitude.pitch,
            yaw: self.attitude.yaw,
            motors: self.motors.0,
            sensors: SensorReport {
                accel: self.sensors.accelerometer,
                gyro: self.sensors.gyroscope,
                baro: self.sensors.barometer,
            },
        }
    }
}

/// Sensors → attitude → stabilizer or failure override → mixer → sinks.
///
/// Parameters are copied out of the shared store once per refresh
/// interval; between refreshes the loop only works on its local copy.
pub struct FlightLoop {
    cfg: LoopConfig,
    store: Arc<ParamStore>,
    sim: SensorSim,
    motors: Box<dyn MotorSink>,
    telemetry: Box<dyn TelemetrySink>,

    sim_cfg: SimConfig,
    setpoint: Setpoint,
    failure: FailureMode,
    stabilizer: Stabilizer,
    last_motors: MotorCommand,
    refresh_ticks: u64,
    ticks_since_refresh: u64,

    status: Arc<Mutex<LoopStatus>>,
    local: LoopStatus,
}

impl FlightLoop {
    pub fn new(
        cfg: LoopConfig,
        store: Arc<ParamStore>,
        sim: SensorSim,
        motors: Box<dyn MotorSink>,
        telemetry: Box<dyn TelemetrySink>,
    ) -> Self {
        let refresh_ticks = cfg.refresh_ticks();
        let mut fl = Self {
            cfg,
            store,
            sim,
            motors,
            telemetry,
            sim_cfg: SimConfig::noiseless(),
            setpoint: Setpoint::default(),
            failure: FailureMode::None,
            stabilizer: Stabilizer::default(),
            last_motors: MotorCommand::ZERO,
            refresh_ticks,
            ticks_since_refresh: 0,
            status: Arc::new(Mutex::new(LoopStatus::default())),
            local: LoopStatus::default(),
        };
        fl.refresh();
        fl
    }

    /// Shared view of the loop's progress, updated after every tick.
    pub fn status(&self) -> Arc<Mutex<LoopStatus>> {
        self.status.clone()
    }

    pub fn setpoint(&self) -> Setpoint {
        self.setpoint
    }

    pub fn stabilizer(&self) -> &Stabilizer {
        &self.stabilizer
    }

    /// Override the simulator configuration until the next refresh.
    pub fn set_sim_config(&mut self, cfg: SimConfig) {
        self.sim_cfg = cfg;
    }

    fn refresh(&mut self) {
        let params = self.store.snapshot();
        self.stabilizer.retune(&params);
        self.setpoint = params.setpoint();
        self.sim_cfg = SimConfig::from_params(&params);

        let failure = params.failure_mode();
        if failure != self.failure {
            if failure.is_active() {
                warn!("failure injection: {}", failure);
            } else {
                info!("failure injection cleared");
            }
        }
        self.failure = failure;
        self.ticks_since_refresh = 0;

        let stats = self.store.stats();
        self.local.refreshes += 1;
        self.local.last_refresh = Some(time::OffsetDateTime::now_utc());
        self.local.failure = failure;
        self.local.last_motors = self.last_motors;
        debug!(
            "refresh #{}: setpoint={:?} failure={} merges={}",
            self.local.refreshes, self.setpoint, failure, stats.merges
        );
        self.publish_status();
    }

    /// Run one control cycle. Never blocks.
    pub fn tick(&mut self) -> TickReport {
        self.ticks_since_refresh += 1;
        if self.ticks_since_refresh >= self.refresh_ticks {
            self.refresh();
        }

        let dt = self.cfg.period_s;
        let sensors = self.sim.read(&self.sim_cfg);
        let mut att = attitude::estimate(sensors.accelerometer, sensors.gyroscope, dt);
        let mut stabilizer = None;

        let motors = if !self.failure.is_active() {
            let out = self.stabilizer.update(&self.setpoint, &att, self.last_motors.collective(), dt);
            stabilizer = Some(out);
            mixer::mix(self.setpoint.throttle, &out)
        } else if let Some(cmd) = failure::motor_override(self.failure) {
            cmd
        } else {
            let (u_roll, u_pitch) = (self.sim.uniform(), self.sim.uniform());
            att = failure::corrupt_attitude(att, u_roll, u_pitch);
            match self.cfg.sensor_fault_motors {
                SensorFaultPolicy::Hold => self.last_motors,
                SensorFaultPolicy::Zero => MotorCommand::ZERO,
            }
        };

        let report = TickReport { sensors, attitude: att, failure: self.failure, stabilizer, motors };
        self.motors.write(&motors);
        self.telemetry.publish(&report.telemetry());

        self.last_motors = motors;
        self.local.ticks += 1;
        self.local.last_motors = motors;
        self.publish_status();
        report
    }

    fn publish_status(&self) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = self.local.clone();
    }

    /// Tick forever at the configured period.
    pub async fn run(mut self) {
        let period = Duration::from_secs_f64(self.cfg.period_s);
        info!(
            "flight loop: period={:?} refresh every {} ticks, sensor faults {:?}",
            period, self.refresh_ticks, self.cfg.sensor_fault_motors
        );
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.tick();
        }
    }
}
